//! Predilection resolver
//!
//! Resolution is positional: the choice stored at index `i` answers entry `i`
//! of the species' list. Fixed entries never need a choice; a choice entry is
//! open until a non-blank value that matches one of its options is stored.

use crate::entities::{SkillKind, SpeciesDefinition};
use crate::error::BuildError;
use crate::value_objects::{PredilectionChoices, PredilectionEntry, ResolvedPredilection};

/// Outcome of resolving one predilection list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Resolved entries, in declaration order
    pub resolved: Vec<ResolvedPredilection>,
    /// Indices still waiting for a (valid) choice
    pub unresolved: Vec<usize>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn first_unresolved(&self) -> Option<usize> {
        self.unresolved.first().copied()
    }
}

/// Resolve what can be resolved and report the rest.
pub fn resolve_partial(
    kind: SkillKind,
    entries: &[PredilectionEntry],
    choices: &PredilectionChoices,
) -> Resolution {
    let mut resolution = Resolution::default();
    for (index, entry) in entries.iter().enumerate() {
        let choice = choices
            .get(kind, index)
            .filter(|value| entry.options().iter().any(|o| o == value));
        let resolved = match (entry, choice) {
            (PredilectionEntry::Fixed { skill, specialty }, _) => Some(ResolvedPredilection {
                skill: skill.clone(),
                specialty: specialty.clone(),
            }),
            (PredilectionEntry::ChoiceOfSkill { .. }, Some(value)) => Some(ResolvedPredilection {
                skill: value.to_string(),
                specialty: None,
            }),
            (PredilectionEntry::ChoiceOfSpecialty { skill, .. }, Some(value)) => {
                Some(ResolvedPredilection {
                    skill: skill.clone(),
                    specialty: Some(value.to_string()),
                })
            }
            (_, None) => None,
        };
        match resolved {
            Some(r) => resolution.resolved.push(r),
            None => resolution.unresolved.push(index),
        }
    }
    resolution
}

/// Resolve a list, failing on the first open choice.
pub fn resolve(
    kind: SkillKind,
    entries: &[PredilectionEntry],
    choices: &PredilectionChoices,
) -> Result<Vec<ResolvedPredilection>, BuildError> {
    let resolution = resolve_partial(kind, entries, choices);
    match resolution.first_unresolved() {
        Some(index) => Err(BuildError::UnresolvedChoice { list: kind, index }),
        None => Ok(resolution.resolved),
    }
}

/// Both predilection lists of a character, resolved as far as possible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Predilections {
    useful: Resolution,
    hobby: Resolution,
}

impl Predilections {
    pub fn for_species(species: &SpeciesDefinition, choices: &PredilectionChoices) -> Self {
        Self {
            useful: resolve_partial(SkillKind::Useful, species.predilections(SkillKind::Useful), choices),
            hobby: resolve_partial(SkillKind::Hobby, species.predilections(SkillKind::Hobby), choices),
        }
    }

    pub fn resolution(&self, kind: SkillKind) -> &Resolution {
        match kind {
            SkillKind::Useful => &self.useful,
            SkillKind::Hobby => &self.hobby,
        }
    }

    /// Spending gate: every choice in both lists must be made.
    pub fn ensure_resolved(&self) -> Result<(), BuildError> {
        for kind in [SkillKind::Useful, SkillKind::Hobby] {
            if let Some(index) = self.resolution(kind).first_unresolved() {
                return Err(BuildError::UnresolvedChoice { list: kind, index });
            }
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.useful.is_complete() && self.hobby.is_complete()
    }

    pub fn is_predilection(&self, kind: SkillKind, skill: &str) -> bool {
        self.resolution(kind).resolved.iter().any(|r| r.skill == skill)
    }

    /// Specialties granted on `skill` by resolved predilections.
    pub fn granted_specialties<'a>(
        &'a self,
        kind: SkillKind,
        skill: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.resolution(kind)
            .resolved
            .iter()
            .filter(move |r| r.skill == skill)
            .filter_map(|r| r.specialty.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<PredilectionEntry> {
        vec![
            PredilectionEntry::fixed_with_specialty("Crafts", "Smithing"),
            PredilectionEntry::choice_of_skill(["Ranged", "Stealth"]),
            PredilectionEntry::choice_of_specialty("Lore", ["History", "Heraldry"]),
        ]
    }

    #[test]
    fn fixed_entries_resolve_without_choices() {
        let resolution = resolve_partial(SkillKind::Useful, &entries(), &PredilectionChoices::new());
        assert_eq!(resolution.resolved.len(), 1);
        assert_eq!(resolution.resolved[0].skill, "Crafts");
        assert_eq!(resolution.unresolved, vec![1, 2]);
    }

    #[test]
    fn strict_resolution_names_first_open_index() {
        let choices = PredilectionChoices::new().with_choice(SkillKind::Useful, 1, "Stealth");
        let err = resolve(SkillKind::Useful, &entries(), &choices).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnresolvedChoice {
                list: SkillKind::Useful,
                index: 2
            }
        );
    }

    #[test]
    fn full_resolution_is_positional() {
        let choices = PredilectionChoices::new()
            .with_choice(SkillKind::Useful, 1, "Stealth")
            .with_choice(SkillKind::Useful, 2, "Heraldry");
        let resolved = resolve(SkillKind::Useful, &entries(), &choices).unwrap();
        assert_eq!(
            resolved,
            vec![
                ResolvedPredilection {
                    skill: "Crafts".into(),
                    specialty: Some("Smithing".into())
                },
                ResolvedPredilection {
                    skill: "Stealth".into(),
                    specialty: None
                },
                ResolvedPredilection {
                    skill: "Lore".into(),
                    specialty: Some("Heraldry".into())
                },
            ]
        );
    }

    #[test]
    fn value_outside_options_stays_unresolved() {
        let choices = PredilectionChoices::new()
            .with_choice(SkillKind::Useful, 1, "Melee")
            .with_choice(SkillKind::Useful, 2, "History");
        let resolution = resolve_partial(SkillKind::Useful, &entries(), &choices);
        assert_eq!(resolution.unresolved, vec![1]);
    }

    #[test]
    fn choices_in_one_list_do_not_answer_the_other() {
        let species = SpeciesDefinition::new("elf", "Elf")
            .with_predilection(SkillKind::Hobby, PredilectionEntry::choice_of_skill(["Dancing"]));
        let choices = PredilectionChoices::new().with_choice(SkillKind::Useful, 0, "Dancing");
        let predilections = Predilections::for_species(&species, &choices);
        assert_eq!(
            predilections.ensure_resolved(),
            Err(BuildError::UnresolvedChoice {
                list: SkillKind::Hobby,
                index: 0
            })
        );
    }

    #[test]
    fn granted_specialties_follow_resolved_entries() {
        let species = SpeciesDefinition::new("dwarf", "Dwarf");
        let species = entries()
            .into_iter()
            .fold(species, |s, e| s.with_predilection(SkillKind::Useful, e));
        let choices = PredilectionChoices::new()
            .with_choice(SkillKind::Useful, 1, "Ranged")
            .with_choice(SkillKind::Useful, 2, "History");
        let predilections = Predilections::for_species(&species, &choices);
        assert!(predilections.is_complete());
        assert!(predilections.is_predilection(SkillKind::Useful, "Lore"));
        assert!(!predilections.is_predilection(SkillKind::Hobby, "Lore"));
        assert_eq!(
            predilections
                .granted_specialties(SkillKind::Useful, "Lore")
                .collect::<Vec<_>>(),
            vec!["History"]
        );
        assert_eq!(
            predilections
                .granted_specialties(SkillKind::Useful, "Ranged")
                .count(),
            0
        );
    }
}
