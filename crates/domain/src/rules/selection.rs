//! Identity, profile, bonus and predilection selections
//!
//! These operations only record choices. They validate the choice against the
//! rule book and leave every budget to be recomputed by the ledgers.

use super::{log_rejection, RuleBook};
use crate::entities::{CharacterSheet, SkillKind};
use crate::error::BuildError;
use crate::value_objects::{BonusKind, BonusSource, PredilectionEntry, ProfileAssignment};

#[derive(Debug, Clone, Copy)]
pub struct Selections<'a> {
    book: &'a RuleBook,
}

impl<'a> Selections<'a> {
    pub fn new(book: &'a RuleBook) -> Self {
        Self { book }
    }

    pub fn rename(&self, sheet: &CharacterSheet, name: &str) -> Result<CharacterSheet, BuildError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BuildError::invalid_selection("Character name cannot be empty"));
        }
        Ok(sheet.clone().with_name(name))
    }

    /// Switch species.
    ///
    /// Attributes go back to the new floors and both ledgers and all
    /// predilection choices are cleared. A gender the new species does not
    /// allow is cleared too. Re-selecting the current species changes nothing.
    pub fn select_species(&self, sheet: &CharacterSheet, species_id: &str) -> Result<CharacterSheet, BuildError> {
        let species = self.book.find_species(species_id).ok_or_else(|| {
            let err = BuildError::invalid_selection(format!("Unknown species: {}", species_id));
            log_rejection("select_species", species_id, &err);
            err
        })?;
        if sheet.species() == species.id {
            return Ok(sheet.clone());
        }
        let gender = sheet
            .gender()
            .filter(|g| species.allows_gender(g))
            .map(str::to_string);
        tracing::debug!(from = %sheet.species(), to = %species.id, "Species changed, resetting allocations");
        Ok(sheet.clone().with_species(species).with_gender(gender))
    }

    /// Set or clear the gender.
    pub fn choose_gender(&self, sheet: &CharacterSheet, gender: Option<&str>) -> Result<CharacterSheet, BuildError> {
        let Some(gender) = gender.map(str::trim) else {
            return Ok(sheet.clone().with_gender(None));
        };
        let species = self.book.species(sheet.species())?;
        if gender.is_empty() || !species.allows_gender(gender) {
            let err = BuildError::invalid_selection(format!(
                "{} does not allow the gender '{}'",
                species.name, gender
            ));
            log_rejection("choose_gender", gender, &err);
            return Err(err);
        }
        Ok(sheet.clone().with_gender(Some(gender.to_string())))
    }

    /// Assign the major and minor profiles; they must differ.
    pub fn assign_profiles(
        &self,
        sheet: &CharacterSheet,
        major: &str,
        minor: &str,
    ) -> Result<CharacterSheet, BuildError> {
        for profile in [major, minor] {
            if !self.book.has_profile(profile) {
                return Err(BuildError::invalid_selection(format!("Unknown profile: {}", profile)));
            }
        }
        if major == minor {
            return Err(BuildError::invalid_selection(
                "Major and minor profiles must be different",
            ));
        }
        Ok(sheet
            .clone()
            .with_profiles(Some(ProfileAssignment::new(major, minor))))
    }

    pub fn clear_profiles(&self, sheet: &CharacterSheet) -> CharacterSheet {
        sheet.clone().with_profiles(None)
    }

    fn bonus_of_kind(&self, id: &str, kind: BonusKind) -> Result<&'a BonusSource, BuildError> {
        match self.book.bonus(id) {
            Some(source) if source.kind == kind => Ok(source),
            Some(source) => Err(BuildError::invalid_selection(format!(
                "{} is not a {}",
                source.name,
                match kind {
                    BonusKind::Capability => "capability",
                    BonusKind::Power => "power",
                }
            ))),
            None => Err(BuildError::invalid_selection(format!("Unknown bonus source: {}", id))),
        }
    }

    /// Set or clear the capability.
    pub fn choose_capability(&self, sheet: &CharacterSheet, id: Option<&str>) -> Result<CharacterSheet, BuildError> {
        let capability = match id {
            Some(id) => Some(self.bonus_of_kind(id, BonusKind::Capability)?.id.clone()),
            None => None,
        };
        Ok(sheet.clone().with_capability(capability))
    }

    pub fn add_power(&self, sheet: &CharacterSheet, id: &str) -> Result<CharacterSheet, BuildError> {
        let source = self.bonus_of_kind(id, BonusKind::Power)?;
        if sheet.powers().iter().any(|p| p == id) {
            return Err(BuildError::invalid_selection(format!(
                "{} is already selected",
                source.name
            )));
        }
        let mut powers = sheet.powers().to_vec();
        powers.push(source.id.clone());
        Ok(sheet.clone().with_powers(powers))
    }

    pub fn remove_power(&self, sheet: &CharacterSheet, id: &str) -> Result<CharacterSheet, BuildError> {
        if !sheet.powers().iter().any(|p| p == id) {
            return Err(BuildError::invalid_selection(format!("Power {} is not selected", id)));
        }
        let powers = sheet.powers().iter().filter(|p| *p != id).cloned().collect();
        Ok(sheet.clone().with_powers(powers))
    }

    fn entry(&self, sheet: &CharacterSheet, kind: SkillKind, index: usize) -> Result<&'a PredilectionEntry, BuildError> {
        let species = self.book.species(sheet.species())?;
        species.predilections(kind).get(index).ok_or_else(|| {
            BuildError::invalid_selection(format!(
                "{} has no {} predilection at index {}",
                species.name, kind, index
            ))
        })
    }

    /// Answer the choice entry at `index` of the `kind` list.
    pub fn choose_predilection(
        &self,
        sheet: &CharacterSheet,
        kind: SkillKind,
        index: usize,
        value: &str,
    ) -> Result<CharacterSheet, BuildError> {
        let entry = self.entry(sheet, kind, index)?;
        if !entry.needs_choice() {
            return Err(BuildError::invalid_selection(format!(
                "Predilection {} of the {} list is fixed",
                index, kind
            )));
        }
        if !entry.options().iter().any(|o| o == value) {
            let err = BuildError::InvalidChoice {
                list: kind,
                index,
                value: value.to_string(),
            };
            log_rejection("choose_predilection", value, &err);
            return Err(err);
        }
        let choices = sheet.predilections().clone().with_choice(kind, index, value);
        Ok(sheet.clone().with_predilections(choices))
    }

    /// Reopen a choice; spending is blocked again until it is answered.
    pub fn clear_predilection(
        &self,
        sheet: &CharacterSheet,
        kind: SkillKind,
        index: usize,
    ) -> Result<CharacterSheet, BuildError> {
        self.entry(sheet, kind, index)?;
        let choices = sheet.predilections().clone().without_choice(kind, index);
        Ok(sheet.clone().with_predilections(choices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::standard::{FIGHTER, ROGUE};

    fn human(book: &RuleBook) -> CharacterSheet {
        CharacterSheet::new("Ada", book.species("human").unwrap())
    }

    #[test]
    fn rename_trims_and_rejects_blank() {
        let book = RuleBook::standard();
        let sheet = book.selections().rename(&human(&book), "  Ada Lark ").unwrap();
        assert_eq!(sheet.name(), "Ada Lark");
        assert!(book.selections().rename(&sheet, " ").is_err());
    }

    #[test]
    fn species_switch_resets_and_drops_disallowed_gender() {
        let book = RuleBook::standard();
        let selections = book.selections();
        let sheet = selections.choose_gender(&human(&book), Some("female")).unwrap();
        let sheet = selections
            .choose_predilection(&sheet, SkillKind::Useful, 0, "Trade")
            .unwrap();

        let same = selections.select_species(&sheet, "human").unwrap();
        assert_eq!(same, sheet);

        let dwarf = selections.select_species(&sheet, "dwarf").unwrap();
        assert_eq!(dwarf.gender(), Some("female"));
        assert_eq!(dwarf.predilections().get(SkillKind::Useful, 0), None);

        let troll = selections.select_species(&dwarf, "troll").unwrap();
        assert_eq!(troll.gender(), Some("female"));

        assert!(matches!(
            selections.select_species(&sheet, "naiad"),
            Err(BuildError::InvalidSelection(_))
        ));
    }

    #[test]
    fn gender_must_be_allowed_by_species() {
        let book = RuleBook::standard();
        let selections = book.selections();
        assert!(selections.choose_gender(&human(&book), Some("male")).is_ok());
        assert!(selections.choose_gender(&human(&book), Some("other")).is_err());
        let cleared = selections.choose_gender(&human(&book), None).unwrap();
        assert_eq!(cleared.gender(), None);
    }

    #[test]
    fn profiles_must_be_known_and_distinct() {
        let book = RuleBook::standard();
        let selections = book.selections();
        let sheet = selections.assign_profiles(&human(&book), FIGHTER, ROGUE).unwrap();
        assert_eq!(sheet.profiles().map(|p| p.major.as_str()), Some(FIGHTER));
        assert!(selections.assign_profiles(&sheet, FIGHTER, FIGHTER).is_err());
        assert!(selections.assign_profiles(&sheet, "Pirate", FIGHTER).is_err());
        assert_eq!(selections.clear_profiles(&sheet).profiles(), None);
    }

    #[test]
    fn capability_and_powers_check_kind() {
        let book = RuleBook::standard();
        let selections = book.selections();
        let sheet = selections
            .choose_capability(&human(&book), Some("iron-hide"))
            .unwrap();
        assert_eq!(sheet.capability(), Some("iron-hide"));
        assert!(selections.choose_capability(&sheet, Some("keen-senses")).is_err());

        let sheet = selections.add_power(&sheet, "keen-senses").unwrap();
        assert!(selections.add_power(&sheet, "keen-senses").is_err());
        assert!(selections.add_power(&sheet, "iron-hide").is_err());

        let sheet = selections.remove_power(&sheet, "keen-senses").unwrap();
        assert!(sheet.powers().is_empty());
        assert!(selections.remove_power(&sheet, "keen-senses").is_err());
    }

    #[test]
    fn predilection_choice_is_validated() {
        let book = RuleBook::standard();
        let selections = book.selections();
        let sheet = human(&book);

        assert_eq!(
            selections
                .choose_predilection(&sheet, SkillKind::Useful, 0, "Melee")
                .unwrap_err(),
            BuildError::InvalidChoice {
                list: SkillKind::Useful,
                index: 0,
                value: "Melee".into()
            }
        );
        assert!(matches!(
            selections.choose_predilection(&sheet, SkillKind::Useful, 3, "Trade"),
            Err(BuildError::InvalidSelection(_))
        ));

        let sheet = selections
            .choose_predilection(&sheet, SkillKind::Hobby, 0, "Gambling")
            .unwrap();
        assert_eq!(sheet.predilections().get(SkillKind::Hobby, 0), Some("Gambling"));

        let sheet = selections.clear_predilection(&sheet, SkillKind::Hobby, 0).unwrap();
        assert_eq!(sheet.predilections().get(SkillKind::Hobby, 0), None);
    }

    #[test]
    fn fixed_predilection_takes_no_choice() {
        let book = RuleBook::standard();
        let sheet = CharacterSheet::new("Brann", book.species("dwarf").unwrap());
        assert!(matches!(
            book.selections()
                .choose_predilection(&sheet, SkillKind::Useful, 0, "Crafts"),
            Err(BuildError::InvalidSelection(_))
        ));
    }
}
