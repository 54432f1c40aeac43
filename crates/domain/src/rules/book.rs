//! Rule book - All reference data a build session runs against
//!
//! The data-access layer supplies one rule book per session. Catalog extension
//! (new specialties, new hobby skills) writes through to it; everything else
//! reads it.

use serde::{Deserialize, Serialize};

use super::{
    AttributeAllocator, BuildRules, DerivedStatsCalculator, Selections, SkillLedger,
    SpecialtyAcquisition,
};
use crate::entities::{CharacterSheet, SkillCatalog, SkillCatalogEntry, SkillKind, SpeciesDefinition};
use crate::error::BuildError;
use crate::value_objects::BonusSource;

/// Reference data for building characters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleBook {
    #[serde(default)]
    pub rules: BuildRules,
    /// Canonical profile list, in display order
    pub profiles: Vec<String>,
    pub skills: SkillCatalog,
    #[serde(default)]
    pub hobbies: SkillCatalog,
    pub species: Vec<SpeciesDefinition>,
    /// Capabilities and powers
    #[serde(default)]
    pub bonuses: Vec<BonusSource>,
}

impl RuleBook {
    pub fn find_species(&self, id: &str) -> Option<&SpeciesDefinition> {
        self.species.iter().find(|s| s.id == id)
    }

    /// Species a sheet was built for; missing species is a configuration gap.
    pub fn species(&self, id: &str) -> Result<&SpeciesDefinition, BuildError> {
        self.find_species(id).ok_or_else(|| {
            BuildError::incomplete(format!("species '{}' is not in the rule book", id))
        })
    }

    pub fn catalog(&self, kind: SkillKind) -> &SkillCatalog {
        match kind {
            SkillKind::Useful => &self.skills,
            SkillKind::Hobby => &self.hobbies,
        }
    }

    pub fn catalog_mut(&mut self, kind: SkillKind) -> &mut SkillCatalog {
        match kind {
            SkillKind::Useful => &mut self.skills,
            SkillKind::Hobby => &mut self.hobbies,
        }
    }

    /// Catalog entry the player is about to spend on.
    pub fn skill(&self, kind: SkillKind, name: &str) -> Result<&SkillCatalogEntry, BuildError> {
        self.catalog(kind)
            .get(name)
            .ok_or_else(|| BuildError::UnknownSkill {
                kind,
                skill: name.to_string(),
            })
    }

    pub fn has_profile(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p == name)
    }

    pub fn bonus(&self, id: &str) -> Option<&BonusSource> {
        self.bonuses.iter().find(|b| b.id == id)
    }

    /// Capability (first) and powers selected on the sheet.
    pub fn active_bonuses(&self, sheet: &CharacterSheet) -> Result<Vec<&BonusSource>, BuildError> {
        sheet
            .capability()
            .into_iter()
            .chain(sheet.powers().iter().map(String::as_str))
            .map(|id| {
                self.bonus(id).ok_or_else(|| {
                    BuildError::incomplete(format!("bonus source '{}' is not in the rule book", id))
                })
            })
            .collect()
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Components
    // ──────────────────────────────────────────────────────────────────────────

    pub fn allocator(&self) -> AttributeAllocator<'_> {
        AttributeAllocator::new(self)
    }

    pub fn ledger(&self, kind: SkillKind) -> SkillLedger<'_> {
        SkillLedger::new(self, kind)
    }

    pub fn specialties(&self) -> SpecialtyAcquisition<'_> {
        SpecialtyAcquisition::new(self)
    }

    pub fn derived(&self) -> DerivedStatsCalculator<'_> {
        DerivedStatsCalculator::new(self)
    }

    pub fn selections(&self) -> Selections<'_> {
        Selections::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_species_is_incomplete_configuration() {
        let book = RuleBook::standard();
        assert!(book.species("human").is_ok());
        let err = book.species("naiad").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn unknown_bonus_on_sheet_is_incomplete_configuration() {
        let book = RuleBook::standard();
        let species = book.species("human").unwrap();
        let sheet = CharacterSheet::new("Ada", species).with_capability(Some("telepathy".into()));
        assert!(matches!(
            book.active_bonuses(&sheet),
            Err(BuildError::IncompleteConfiguration(_))
        ));
    }

    #[test]
    fn rule_book_json_round_trip() {
        let book = RuleBook::standard();
        let json = serde_json::to_string(&book).unwrap();
        let parsed: RuleBook = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }
}
