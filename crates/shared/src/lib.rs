//! Sheetwright Shared - Contract types between the rules engine and its collaborators
//!
//! This crate contains what the UI, validation and recap/export layers consume:
//! - Read models rebuilt from a sheet on demand (allocation, derived stats, steps)
//! - The versioned JSON sheet format
//! - Rule book loading from JSON
//!
//! # Design Principles
//!
//! 1. **No rule logic** - every number comes from `sheetwright-domain`
//! 2. **Lossless** - an exported sheet imports back to an equal value
//! 3. **Checked at the boundary** - imported data is validated before use

pub mod error;
pub mod rule_book_json;
pub mod sheet_json;
pub mod views;

pub use error::SheetFormatError;
pub use rule_book_json::{check_rule_book, parse_rule_book};
pub use sheet_json::{check_sheet, export_sheet, import_sheet, SheetEnvelope, SHEET_FORMAT_VERSION};
pub use views::{
    AllocationView, AttributeView, BonusNote, DerivedStatsView, OpenChoiceView, SkillScoreView,
    SkillView, StepValidation,
};
