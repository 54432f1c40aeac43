//! Wizard step validation
//!
//! One boolean predicate per creation step. The UI and the recap call the
//! same predicates; nothing here re-derives a budget on its own.

use serde::{Deserialize, Serialize};

use super::RuleBook;
use crate::entities::{CharacterSheet, SkillKind};
use crate::error::BuildError;
use crate::value_objects::BonusKind;

/// Steps of the character creation wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Identity,
    Attributes,
    Predilections,
    Profiles,
    UsefulSkills,
    HobbySkills,
    Capability,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        Self::Identity,
        Self::Attributes,
        Self::Predilections,
        Self::Profiles,
        Self::UsefulSkills,
        Self::HobbySkills,
        Self::Capability,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Attributes => "Attributes",
            Self::Predilections => "Predilections",
            Self::Profiles => "Profiles",
            Self::UsefulSkills => "Useful skills",
            Self::HobbySkills => "Hobby skills",
            Self::Capability => "Capability",
        }
    }

    /// Whether the sheet is complete enough to leave this step.
    ///
    /// Broken reference data makes every step incomplete; the error is logged
    /// so it is not lost behind a disabled button.
    pub fn is_complete(&self, book: &RuleBook, sheet: &CharacterSheet) -> bool {
        match self.check(book, sheet) {
            Ok(complete) => complete,
            Err(err) => {
                tracing::warn!(step = ?self, error = %err, "Step validation failed");
                false
            }
        }
    }

    fn check(&self, book: &RuleBook, sheet: &CharacterSheet) -> Result<bool, BuildError> {
        match self {
            Self::Identity => {
                let species = book.species(sheet.species())?;
                let gender_ok = match sheet.gender() {
                    Some(gender) => species.allows_gender(gender),
                    None => species.allowed_genders.is_empty(),
                };
                Ok(!sheet.name().trim().is_empty() && gender_ok)
            }
            Self::Attributes => book.allocator().is_complete(sheet),
            Self::Predilections => Ok(book.ledger(SkillKind::Useful).predilections(sheet)?.is_complete()),
            Self::Profiles => Ok(sheet.profiles().is_some_and(|p| {
                p.major != p.minor && book.has_profile(&p.major) && book.has_profile(&p.minor)
            })),
            Self::UsefulSkills => book.ledger(SkillKind::Useful).is_complete(sheet),
            Self::HobbySkills => book.ledger(SkillKind::Hobby).is_complete(sheet),
            Self::Capability => {
                let kind_of = |id: &str| book.bonus(id).map(|b| b.kind);
                let capability_ok = sheet
                    .capability()
                    .is_some_and(|id| kind_of(id) == Some(BonusKind::Capability));
                let powers_ok = sheet
                    .powers()
                    .iter()
                    .all(|id| kind_of(id.as_str()) == Some(BonusKind::Power));
                Ok(capability_ok && powers_ok)
            }
        }
    }
}

/// First step the sheet does not satisfy yet.
pub fn first_incomplete_step(book: &RuleBook, sheet: &CharacterSheet) -> Option<WizardStep> {
    WizardStep::ALL
        .into_iter()
        .find(|step| !step.is_complete(book, sheet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SpeciesDefinition;

    #[test]
    fn identity_needs_gender_when_species_lists_them() {
        let book = RuleBook::standard();
        let human = CharacterSheet::new("Ada", book.species("human").unwrap());
        assert!(!WizardStep::Identity.is_complete(&book, &human));
        let human = human.with_gender(Some("female".into()));
        assert!(WizardStep::Identity.is_complete(&book, &human));

        let troll = CharacterSheet::new("Grok", book.species("troll").unwrap());
        assert!(WizardStep::Identity.is_complete(&book, &troll));
    }

    #[test]
    fn fresh_sheet_stops_at_attributes() {
        let book = RuleBook::standard();
        let troll = CharacterSheet::new("Grok", book.species("troll").unwrap());
        assert_eq!(first_incomplete_step(&book, &troll), Some(WizardStep::Attributes));
    }

    #[test]
    fn troll_predilections_need_no_choice() {
        let book = RuleBook::standard();
        let troll = CharacterSheet::new("Grok", book.species("troll").unwrap());
        assert!(WizardStep::Predilections.is_complete(&book, &troll));
        let elf = CharacterSheet::new("Lia", book.species("elf").unwrap());
        assert!(!WizardStep::Predilections.is_complete(&book, &elf));
    }

    #[test]
    fn capability_step_requires_a_capability() {
        let book = RuleBook::standard();
        let sheet = CharacterSheet::new("Grok", book.species("troll").unwrap());
        assert!(!WizardStep::Capability.is_complete(&book, &sheet));
        let sheet = sheet.with_capability(Some("iron-hide".into()));
        assert!(WizardStep::Capability.is_complete(&book, &sheet));
        let sheet = sheet.with_powers(vec!["quicksilver".into()]);
        assert!(!WizardStep::Capability.is_complete(&book, &sheet));
    }

    #[test]
    fn missing_species_fails_every_step() {
        let book = RuleBook::standard();
        let orphan = CharacterSheet::new("Ghost", &SpeciesDefinition::new("wraith", "Wraith"));
        assert!(!WizardStep::Attributes.is_complete(&book, &orphan));
        assert_eq!(first_incomplete_step(&book, &orphan), Some(WizardStep::Identity));
    }
}
