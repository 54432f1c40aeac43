//! Specialty acquisition for useful skills
//!
//! A skill owns specialties from three places: resolved predilections, bonus
//! sources, and purchases. Only purchases cost budget and only purchases can
//! be refunded here.

use serde::{Deserialize, Serialize};

use super::predilection::Predilections;
use super::{log_rejection, RuleBook};
use crate::entities::{CharacterSheet, SkillKind};
use crate::error::BuildError;
use crate::value_objects::PoolKind;

/// How a skill came to own a specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecialtyOrigin {
    Predilection,
    /// Capability or power, by display name
    Bonus { source: String },
    Purchased,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedSpecialty {
    pub name: String,
    pub origin: SpecialtyOrigin,
}

impl OwnedSpecialty {
    pub fn is_removable(&self) -> bool {
        self.origin == SpecialtyOrigin::Purchased
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpecialtyAcquisition<'a> {
    book: &'a RuleBook,
}

impl<'a> SpecialtyAcquisition<'a> {
    pub fn new(book: &'a RuleBook) -> Self {
        Self { book }
    }

    /// Every specialty `skill` owns, granted ones first.
    pub fn owned(&self, sheet: &CharacterSheet, skill: &str) -> Result<Vec<OwnedSpecialty>, BuildError> {
        let species = self.book.species(sheet.species())?;
        let predilections = Predilections::for_species(species, sheet.predilections());
        let mut owned: Vec<OwnedSpecialty> = predilections
            .granted_specialties(SkillKind::Useful, skill)
            .map(|name| OwnedSpecialty {
                name: name.to_string(),
                origin: SpecialtyOrigin::Predilection,
            })
            .collect();
        for source in self.book.active_bonuses(sheet)? {
            owned.extend(source.specialties_for(skill).map(|name| OwnedSpecialty {
                name: name.to_string(),
                origin: SpecialtyOrigin::Bonus {
                    source: source.name.clone(),
                },
            }));
        }
        if let Some(entry) = sheet.ledger_entry(SkillKind::Useful, skill) {
            owned.extend(entry.specialties.iter().map(|name| OwnedSpecialty {
                name: name.clone(),
                origin: SpecialtyOrigin::Purchased,
            }));
        }
        Ok(owned)
    }

    pub fn owns(&self, sheet: &CharacterSheet, skill: &str, specialty: &str) -> Result<bool, BuildError> {
        Ok(self.owned(sheet, skill)?.iter().any(|o| o.name == specialty))
    }

    fn check_purchase(
        &self,
        sheet: &CharacterSheet,
        skill: &str,
        specialty: &str,
        require_known: bool,
    ) -> Result<(), BuildError> {
        let entry = self.book.skill(SkillKind::Useful, skill)?;
        let ledger = self.book.ledger(SkillKind::Useful);
        ledger.predilections(sheet)?.ensure_resolved()?;

        if self.owns(sheet, skill, specialty)? {
            return Err(BuildError::DuplicateSpecialty {
                skill: skill.to_string(),
                specialty: specialty.to_string(),
            });
        }
        if require_known && !entry.knows_specialty(specialty) {
            return Err(BuildError::UnknownSpecialty {
                skill: skill.to_string(),
                specialty: specialty.to_string(),
            });
        }

        let ledger_entry = sheet.ledger_entry(SkillKind::Useful, skill);
        let free_slot = entry.first_specialty_free
            && ledger_entry.is_some_and(|e| e.invested_ranks > 0 && e.specialties.is_empty());
        if free_slot {
            return Ok(());
        }
        let budget = ledger.budget(sheet)?;
        let conditional_open = entry.conditional_pool && budget.conditional_remaining() > 0;
        if budget.general_remaining() <= 0 && !conditional_open {
            return Err(BuildError::BudgetExceeded {
                pool: PoolKind::General,
            });
        }
        Ok(())
    }

    /// The authoritative gate for buying a catalog specialty.
    pub fn can_add_specialty(&self, sheet: &CharacterSheet, skill: &str, specialty: &str) -> bool {
        self.check_purchase(sheet, skill, specialty, true).is_ok()
    }

    pub fn add_specialty(
        &self,
        sheet: &CharacterSheet,
        skill: &str,
        specialty: &str,
    ) -> Result<CharacterSheet, BuildError> {
        self.check_purchase(sheet, skill, specialty, true)
            .inspect_err(|err| log_rejection("add_specialty", skill, err))?;
        Ok(purchase(sheet, skill, specialty))
    }

    /// Refund a purchased specialty.
    pub fn remove_specialty(
        &self,
        sheet: &CharacterSheet,
        skill: &str,
        specialty: &str,
    ) -> Result<CharacterSheet, BuildError> {
        let mut entry = match sheet.ledger_entry(SkillKind::Useful, skill) {
            Some(entry) if entry.has_specialty(specialty) => entry.clone(),
            _ => {
                let err = BuildError::NotPurchased {
                    skill: skill.to_string(),
                    specialty: specialty.to_string(),
                };
                log_rejection("remove_specialty", skill, &err);
                return Err(err);
            }
        };
        entry.specialties.retain(|s| s != specialty);
        Ok(sheet.clone().with_ledger_entry(SkillKind::Useful, skill, entry))
    }

    /// Add a new specialty to the catalog, then buy it.
    ///
    /// The purchase is checked before the catalog is touched, so a rejected
    /// purchase leaves the rule book unchanged.
    pub fn create_specialty(
        book: &mut RuleBook,
        sheet: &CharacterSheet,
        skill: &str,
        specialty: &str,
    ) -> Result<CharacterSheet, BuildError> {
        let specialty = specialty.trim();
        if specialty.is_empty() {
            return Err(BuildError::invalid_selection("Specialty name cannot be empty"));
        }
        SpecialtyAcquisition::new(book)
            .check_purchase(sheet, skill, specialty, false)
            .inspect_err(|err| log_rejection("create_specialty", skill, err))?;
        if book.catalog_mut(SkillKind::Useful).add_specialty(SkillKind::Useful, skill, specialty)? {
            tracing::info!(skill = %skill, specialty = %specialty, "Added specialty to catalog");
        }
        SpecialtyAcquisition::new(book).add_specialty(sheet, skill, specialty)
    }
}

fn purchase(sheet: &CharacterSheet, skill: &str, specialty: &str) -> CharacterSheet {
    let mut entry = sheet
        .ledger_entry(SkillKind::Useful, skill)
        .cloned()
        .unwrap_or_default();
    entry.specialties.push(specialty.to_string());
    sheet.clone().with_ledger_entry(SkillKind::Useful, skill, entry)
}
