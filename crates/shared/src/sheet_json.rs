//! Versioned JSON import/export of character sheets
//!
//! The envelope carries a format version next to the sheet. Every field of the
//! sheet round-trips; nothing derived is written. On import the sheet is
//! checked against the rule book so a hand-edited file cannot smuggle in an
//! overspent ledger or an out-of-range attribute.

use serde::{Deserialize, Serialize};
use sheetwright_domain::{
    BonusKind, BuildError, CharacterSheet, PoolKind, RuleBook, SkillKind,
};

use crate::error::SheetFormatError;

/// Version written by [`export_sheet`].
pub const SHEET_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetEnvelope {
    pub format_version: u32,
    pub sheet: CharacterSheet,
}

pub fn export_sheet(sheet: &CharacterSheet) -> Result<String, SheetFormatError> {
    let envelope = SheetEnvelope {
        format_version: SHEET_FORMAT_VERSION,
        sheet: sheet.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse an exported sheet and check it against `book`.
pub fn import_sheet(book: &RuleBook, json: &str) -> Result<CharacterSheet, SheetFormatError> {
    let envelope: SheetEnvelope = serde_json::from_str(json)?;
    if envelope.format_version != SHEET_FORMAT_VERSION {
        return Err(SheetFormatError::UnsupportedVersion {
            found: envelope.format_version,
            expected: SHEET_FORMAT_VERSION,
        });
    }
    check_sheet(book, &envelope.sheet).inspect_err(|err| {
        tracing::warn!(sheet = %envelope.sheet.name(), error = %err, "Imported sheet rejected");
    })?;
    tracing::debug!(sheet = %envelope.sheet.name(), id = %envelope.sheet.id(), "Imported sheet");
    Ok(envelope.sheet)
}

/// Every invariant a sheet built through the rules engine satisfies.
///
/// Incomplete sheets are fine (open choices, unspent points); inconsistent
/// ones are not.
pub fn check_sheet(book: &RuleBook, sheet: &CharacterSheet) -> Result<(), BuildError> {
    let species = book.species(sheet.species())?;

    let allocator = book.allocator();
    for (attribute, value) in sheet.attributes().iter() {
        let floor = species.floor(attribute);
        let ceiling = allocator.ceiling(species, attribute);
        if value < floor {
            return Err(BuildError::floor(attribute.display_name(), floor));
        }
        if value > ceiling {
            return Err(BuildError::ceiling(attribute.display_name(), ceiling));
        }
    }
    if allocator.remaining_for(species, sheet.attributes()) < 0 {
        return Err(BuildError::BudgetExceeded {
            pool: PoolKind::Attributes,
        });
    }

    if let Some(gender) = sheet.gender() {
        if !species.allows_gender(gender) {
            return Err(BuildError::invalid_selection(format!(
                "{} does not allow the gender '{}'",
                species.name, gender
            )));
        }
    }

    if let Some(profiles) = sheet.profiles() {
        if profiles.major == profiles.minor
            || !book.has_profile(&profiles.major)
            || !book.has_profile(&profiles.minor)
        {
            return Err(BuildError::invalid_selection(format!(
                "Invalid profiles: {} / {}",
                profiles.major, profiles.minor
            )));
        }
    }

    for kind in [SkillKind::Useful, SkillKind::Hobby] {
        let entries = species.predilections(kind);
        for (index, value) in sheet.predilections().iter(kind) {
            let valid = entries
                .get(index)
                .is_some_and(|entry| entry.needs_choice() && entry.options().iter().any(|o| o == value));
            if !valid {
                return Err(BuildError::InvalidChoice {
                    list: kind,
                    index,
                    value: value.to_string(),
                });
            }
        }
    }

    for kind in [SkillKind::Useful, SkillKind::Hobby] {
        let ledger = book.ledger(kind);
        let budget = ledger.budget(sheet)?;
        if budget.general_remaining() < 0 {
            return Err(BuildError::BudgetExceeded {
                pool: ledger.general_pool(),
            });
        }
        if let Some(skill) = ledger.over_ceiling(sheet)?.into_iter().next() {
            let ceiling = ledger.breakdown(sheet, &skill)?.ceiling;
            return Err(BuildError::ceiling(skill, ceiling));
        }
        for (skill, entry) in sheet.ledger(kind) {
            let catalog_entry = book.skill(kind, skill)?;
            for (position, specialty) in entry.specialties.iter().enumerate() {
                if !catalog_entry.knows_specialty(specialty) {
                    return Err(BuildError::UnknownSpecialty {
                        skill: skill.clone(),
                        specialty: specialty.clone(),
                    });
                }
                if entry.specialties[..position].contains(specialty) {
                    return Err(BuildError::DuplicateSpecialty {
                        skill: skill.clone(),
                        specialty: specialty.clone(),
                    });
                }
            }
        }
    }

    // Purchased specialties must not shadow granted ones.
    let specialties = book.specialties();
    for skill in sheet.ledger(SkillKind::Useful).keys() {
        let owned = specialties.owned(sheet, skill)?;
        for (position, specialty) in owned.iter().enumerate() {
            if owned[..position].iter().any(|o| o.name == specialty.name) {
                return Err(BuildError::DuplicateSpecialty {
                    skill: skill.clone(),
                    specialty: specialty.name.clone(),
                });
            }
        }
    }

    let expect_kind = |id: &str, kind: BonusKind| match book.bonus(id) {
        Some(source) if source.kind == kind => Ok(()),
        _ => Err(BuildError::invalid_selection(format!("Unknown {:?} '{}'", kind, id))),
    };
    if let Some(capability) = sheet.capability() {
        expect_kind(capability, BonusKind::Capability)?;
    }
    for power in sheet.powers() {
        expect_kind(power.as_str(), BonusKind::Power)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetwright_domain::{Attribute, AttributeSet, SkillLedgerEntry};

    fn built_sheet(book: &RuleBook) -> CharacterSheet {
        let selections = book.selections();
        let sheet = CharacterSheet::new("Brann", book.species("dwarf").unwrap());
        let sheet = selections
            .choose_predilection(&sheet, SkillKind::Useful, 1, "History")
            .unwrap();
        let sheet = selections.choose_gender(&sheet, Some("male")).unwrap();
        let sheet = selections.assign_profiles(&sheet, "Traveler", "Fighter").unwrap();
        let sheet = selections.choose_capability(&sheet, Some("iron-hide")).unwrap();
        let sheet = book.allocator().increment(&sheet, Attribute::Constitution).unwrap();
        let sheet = book.ledger(SkillKind::Useful).add_rank(&sheet, "Melee").unwrap();
        let sheet = book.specialties().add_specialty(&sheet, "Melee", "Axe").unwrap();
        book.ledger(SkillKind::Hobby).add_rank(&sheet, "Chess").unwrap()
    }

    #[test]
    fn export_then_import_keeps_every_field() {
        let book = RuleBook::standard();
        let sheet = built_sheet(&book);
        let json = export_sheet(&sheet).unwrap();
        assert!(json.contains("\"formatVersion\": 1"));
        let imported = import_sheet(&book, &json).unwrap();
        assert_eq!(imported, sheet);
    }

    #[test]
    fn unknown_version_is_refused() {
        let book = RuleBook::standard();
        let json = export_sheet(&built_sheet(&book))
            .unwrap()
            .replace("\"formatVersion\": 1", "\"formatVersion\": 7");
        assert!(matches!(
            import_sheet(&book, &json),
            Err(SheetFormatError::UnsupportedVersion { found: 7, expected: 1 })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let book = RuleBook::standard();
        let err = import_sheet(&book, "{ not json").unwrap_err();
        assert!(matches!(err, SheetFormatError::Json(_)));
        assert!(!err.is_rejection());
    }

    #[test]
    fn overspent_attributes_are_rejected() {
        let book = RuleBook::standard();
        let sheet = built_sheet(&book).with_attributes(AttributeSet::uniform(3));
        assert_eq!(
            check_sheet(&book, &sheet),
            Err(BuildError::BudgetExceeded {
                pool: PoolKind::Attributes
            })
        );
    }

    #[test]
    fn skill_over_ceiling_is_rejected() {
        let book = RuleBook::standard();
        let sheet = built_sheet(&book).with_ledger_entry(
            SkillKind::Useful,
            "Stealth",
            SkillLedgerEntry {
                invested_ranks: 5,
                specialties: vec![],
            },
        );
        assert_eq!(check_sheet(&book, &sheet), Err(BuildError::ceiling("Stealth", 4)));
    }

    #[test]
    fn purchased_copy_of_granted_specialty_is_rejected() {
        let book = RuleBook::standard();
        let sheet = built_sheet(&book).with_ledger_entry(
            SkillKind::Useful,
            "Crafts",
            SkillLedgerEntry {
                invested_ranks: 1,
                specialties: vec!["Smithing".into()],
            },
        );
        let json = export_sheet(&sheet).unwrap();
        let err = import_sheet(&book, &json).unwrap_err();
        assert!(err.is_rejection());
        assert!(err.to_string().contains("Smithing"));
    }

    #[test]
    fn stored_choice_outside_options_is_rejected() {
        let book = RuleBook::standard();
        let sheet = built_sheet(&book);
        let choices = sheet
            .predilections()
            .clone()
            .with_choice(SkillKind::Useful, 0, "Smithing");
        let sheet = sheet.with_predilections(choices);
        assert!(matches!(
            check_sheet(&book, &sheet),
            Err(BuildError::InvalidChoice { index: 0, .. })
        ));
    }
}
