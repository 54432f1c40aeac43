//! Character build rules engine
//!
//! Every component borrows a [`RuleBook`] and works on a [`CharacterSheet`]
//! value: operations return a new sheet or a [`BuildError`] and never keep
//! state of their own.
//!
//! # Components
//!
//! - [`Predilections`]: resolves species predilections against player choices
//! - [`AttributeAllocator`]: point-buy above the species floors
//! - [`SkillLedger`]: useful and hobby skill pools, ceilings and overflow
//! - [`SpecialtyAcquisition`]: specialty purchases and catalog extension
//! - [`DerivedStatsCalculator`]: hit points, defenses, profile ranks, bonuses
//! - [`Selections`]: identity, profile, bonus and predilection choices
//! - [`WizardStep`]: per-step completion predicates
//!
//! [`CharacterSheet`]: crate::entities::CharacterSheet

mod attributes;
mod book;
mod config;
mod derived;
mod hobby;
mod ledger;
mod predilection;
mod score;
mod selection;
mod specialties;
pub mod standard;
mod validation;


pub use attributes::AttributeAllocator;
pub use book::RuleBook;
pub use config::{BuildRules, DefenseRule};
pub use derived::{
    AttributeBonusLine, BonusSummary, DefenseValue, DerivedStats, DerivedStatsCalculator,
    FormState, ProfileRank, SkillBonusLine, SpecialtyGrantLine,
};
pub use ledger::SkillLedger;
pub use predilection::{resolve, resolve_partial, Predilections, Resolution};
pub use score::{ContributionSource, ScoreBreakdown, ScoreContribution};
pub use selection::Selections;
pub use specialties::{OwnedSpecialty, SpecialtyAcquisition, SpecialtyOrigin};
pub use validation::{first_incomplete_step, WizardStep};

use crate::error::BuildError;

/// Log a rejected operation.
///
/// Ordinary rejections are player feedback and go to debug; broken reference
/// data is a warning.
pub(crate) fn log_rejection(operation: &'static str, subject: &str, err: &BuildError) {
    if err.is_fatal() {
        tracing::warn!(operation, subject = %subject, error = %err, "Build operation failed");
    } else {
        tracing::debug!(operation, subject = %subject, error = %err, "Build operation rejected");
    }
}
