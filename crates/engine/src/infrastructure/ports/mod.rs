//! Port traits for infrastructure boundaries.
//!
//! The rule book and the sheet come from a data-access layer. The runner reads
//! them from files; tests substitute mocks.

mod error;

pub use error::SourceError;

use sheetwright_domain::{CharacterSheet, RuleBook};

/// Supplies the reference data for one session.
#[cfg_attr(test, mockall::automock)]
pub trait RuleBookSource: Send + Sync {
    fn load_rule_book(&self) -> Result<RuleBook, SourceError>;
}

/// Supplies the sheet being built, checked against the session's rule book.
#[cfg_attr(test, mockall::automock)]
pub trait SheetSource: Send + Sync {
    fn load_sheet(&self, book: &RuleBook) -> Result<CharacterSheet, SourceError>;
}
