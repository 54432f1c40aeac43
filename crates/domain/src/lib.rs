//! Character build rules for the Sheetwright character creator.
//!
//! The crate is a pure computation library: it holds the character sheet, the
//! reference data it is built against, and the rules that allocate points,
//! enforce bounds and derive statistics. It performs no I/O.

pub mod entities;
pub mod error;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use entities::{
    AttributeBounds, CharacterSheet, SizeCategory, SkillCatalog, SkillCatalogEntry, SkillKind,
    SkillLedgerEntry, SpeciesDefinition,
};

pub use error::BuildError;

pub use ids::CharacterId;

pub use rules::{
    first_incomplete_step, AttributeAllocator, BonusSummary, BuildRules, ContributionSource,
    DefenseRule, DefenseValue, DerivedStats, DerivedStatsCalculator, FormState, OwnedSpecialty,
    Predilections, ProfileRank, RuleBook, ScoreBreakdown, ScoreContribution, Selections,
    SkillLedger, SpecialtyAcquisition, SpecialtyOrigin, WizardStep,
};

pub use value_objects::{
    Attribute, AttributeBonus, AttributeSet, BonusKind, BonusSource, BudgetSnapshot, PoolCapacity,
    PoolKind, PredilectionChoices, PredilectionEntry, ProfileAssignment, ProfileTier,
    ResolvedPredilection, SkillBonus, SpecialtyGrant,
};
