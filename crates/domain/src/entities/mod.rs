//! Domain entities - Character sheet and the reference data it is built against

mod character_sheet;
mod skill;
mod species;

pub use character_sheet::{CharacterSheet, SkillLedgerEntry};
pub use skill::{SkillCatalog, SkillCatalogEntry, SkillKind};
pub use species::{AttributeBounds, SizeCategory, SpeciesDefinition};
