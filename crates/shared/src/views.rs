//! Read models handed to the UI, validation and recap collaborators
//!
//! Every view is rebuilt from the sheet on demand. Views carry the guard
//! results (`can_increment`, `can_add_rank`, ...) computed by the rules engine
//! so no consumer has to re-derive them.

use serde::{Deserialize, Serialize};
use sheetwright_domain::{
    Attribute, BonusSummary, BudgetSnapshot, BuildError, CharacterSheet, ContributionSource,
    DefenseValue, FormState, OwnedSpecialty, ProfileRank, RuleBook, ScoreBreakdown, SkillKind,
    WizardStep,
};

// =============================================================================
// Allocation
// =============================================================================

/// One attribute row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeView {
    pub attribute: Attribute,
    pub value: i32,
    pub floor: i32,
    pub ceiling: i32,
    /// Bonus from capability and powers while masked
    pub masked_bonus: i32,
    /// Bonus from capability and powers once unmasked
    pub unmasked_bonus: i32,
    pub can_increment: bool,
    pub can_decrement: bool,
}

/// One skill row of either ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillView {
    pub name: String,
    pub kind: SkillKind,
    pub invested_ranks: u32,
    /// Score the ceiling applies to
    pub base: i32,
    /// Score including bonus sources
    pub total: i32,
    pub ceiling: i32,
    pub is_predilection: bool,
    pub conditional_pool: bool,
    pub breakdown: ScoreBreakdown,
    pub specialties: Vec<OwnedSpecialty>,
    pub can_add_rank: bool,
    pub can_remove_rank: bool,
}

/// A predilection choice the player still has to make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenChoiceView {
    pub list: SkillKind,
    pub index: usize,
    pub options: Vec<String>,
}

/// Everything the allocation screens render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationView {
    pub attributes: Vec<AttributeView>,
    pub attribute_points_remaining: i32,
    pub useful_budget: BudgetSnapshot,
    pub hobby_budget: BudgetSnapshot,
    pub skills: Vec<SkillView>,
    pub hobbies: Vec<SkillView>,
    pub open_choices: Vec<OpenChoiceView>,
}

impl AllocationView {
    pub fn build(book: &RuleBook, sheet: &CharacterSheet) -> Result<Self, BuildError> {
        let species = book.species(sheet.species())?;
        let allocator = book.allocator();
        let bonuses = book.derived().aggregate_bonuses(sheet)?;

        let attributes = sheet
            .attributes()
            .iter()
            .map(|(attribute, value)| AttributeView {
                attribute,
                value,
                floor: species.floor(attribute),
                ceiling: allocator.ceiling(species, attribute),
                masked_bonus: bonuses.attribute_bonus(attribute, FormState::Masked),
                unmasked_bonus: bonuses.attribute_bonus(attribute, FormState::Unmasked),
                can_increment: allocator.can_increment(sheet, attribute),
                can_decrement: allocator.can_decrement(sheet, attribute),
            })
            .collect();

        let predilections = book.ledger(SkillKind::Useful).predilections(sheet)?;
        let mut open_choices = Vec::new();
        for kind in [SkillKind::Useful, SkillKind::Hobby] {
            let entries = species.predilections(kind);
            for &index in &predilections.resolution(kind).unresolved {
                open_choices.push(OpenChoiceView {
                    list: kind,
                    index,
                    options: entries
                        .get(index)
                        .map(|entry| entry.options().to_vec())
                        .unwrap_or_default(),
                });
            }
        }

        Ok(Self {
            attributes,
            attribute_points_remaining: allocator.remaining_for(species, sheet.attributes()),
            useful_budget: book.ledger(SkillKind::Useful).budget(sheet)?,
            hobby_budget: book.ledger(SkillKind::Hobby).budget(sheet)?,
            skills: skill_views(book, sheet, SkillKind::Useful)?,
            hobbies: skill_views(book, sheet, SkillKind::Hobby)?,
            open_choices,
        })
    }

    pub fn skill(&self, kind: SkillKind, name: &str) -> Option<&SkillView> {
        let rows = match kind {
            SkillKind::Useful => &self.skills,
            SkillKind::Hobby => &self.hobbies,
        };
        rows.iter().find(|row| row.name == name)
    }
}

fn skill_views(
    book: &RuleBook,
    sheet: &CharacterSheet,
    kind: SkillKind,
) -> Result<Vec<SkillView>, BuildError> {
    let ledger = book.ledger(kind);
    let specialties = book.specialties();
    let breakdowns = match kind {
        SkillKind::Useful => book.derived().final_breakdowns(sheet)?,
        SkillKind::Hobby => ledger.breakdowns(sheet)?,
    };
    breakdowns
        .into_iter()
        .map(|breakdown| {
            let entry = book.skill(kind, &breakdown.skill)?;
            let owned = match kind {
                SkillKind::Useful => specialties.owned(sheet, &breakdown.skill)?,
                SkillKind::Hobby => Vec::new(),
            };
            Ok(SkillView {
                name: breakdown.skill.clone(),
                kind,
                invested_ranks: sheet.invested_ranks(kind, &breakdown.skill),
                base: breakdown.ledger_score(),
                total: breakdown.total(),
                ceiling: breakdown.ceiling,
                is_predilection: breakdown.is_predilection,
                conditional_pool: kind == SkillKind::Useful && entry.conditional_pool,
                specialties: owned,
                can_add_rank: ledger.can_add_rank(sheet, &breakdown.skill),
                can_remove_rank: ledger.can_remove_rank(sheet, &breakdown.skill),
                breakdown,
            })
        })
        .collect()
}

// =============================================================================
// Derived stats
// =============================================================================

/// A "base / total (+N from source)" line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusNote {
    pub source: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillScoreView {
    pub name: String,
    pub base: i32,
    pub total: i32,
    pub notes: Vec<BonusNote>,
}

/// What the recap and export collaborators consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStatsView {
    pub hit_points: i32,
    pub defenses: Vec<DefenseValue>,
    pub profiles: Vec<ProfileRank>,
    pub character_points: i32,
    pub bonuses: BonusSummary,
    /// Useful skills with a non-zero score, in catalog order
    pub skills: Vec<SkillScoreView>,
}

impl DerivedStatsView {
    pub fn build(book: &RuleBook, sheet: &CharacterSheet) -> Result<Self, BuildError> {
        let calculator = book.derived();
        let stats = calculator.derive(sheet)?;
        let skills = calculator
            .final_breakdowns(sheet)?
            .into_iter()
            .filter(|b| b.total() != 0)
            .map(|b| SkillScoreView {
                base: b.ledger_score(),
                total: b.total(),
                notes: b
                    .contributions
                    .iter()
                    .filter_map(|c| match &c.source {
                        ContributionSource::Bonus { source } => Some(BonusNote {
                            source: source.clone(),
                            amount: c.amount,
                        }),
                        _ => None,
                    })
                    .collect(),
                name: b.skill,
            })
            .collect();
        Ok(Self {
            hit_points: stats.hit_points,
            defenses: stats.defenses,
            profiles: stats.profiles,
            character_points: stats.character_points,
            bonuses: stats.bonuses,
            skills,
        })
    }
}

// =============================================================================
// Step validation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepValidation {
    pub step: WizardStep,
    pub label: String,
    pub complete: bool,
}

impl StepValidation {
    /// One entry per wizard step, in order.
    pub fn all(book: &RuleBook, sheet: &CharacterSheet) -> Vec<Self> {
        WizardStep::ALL
            .into_iter()
            .map(|step| Self {
                step,
                label: step.display_name().to_string(),
                complete: step.is_complete(book, sheet),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetwright_domain::SpeciesDefinition;

    fn human(book: &RuleBook) -> CharacterSheet {
        let sheet = CharacterSheet::new("Ada", book.species("human").unwrap());
        let selections = book.selections();
        let sheet = selections
            .choose_predilection(&sheet, SkillKind::Useful, 0, "Riding")
            .unwrap();
        selections
            .choose_predilection(&sheet, SkillKind::Hobby, 0, "Singing")
            .unwrap()
    }

    #[test]
    fn allocation_view_mirrors_guards() {
        let book = RuleBook::standard();
        let sheet = human(&book);
        let view = AllocationView::build(&book, &sheet).unwrap();

        assert_eq!(view.attributes.len(), 8);
        assert!(view.attributes.iter().all(|a| a.can_increment && !a.can_decrement));
        assert_eq!(view.attribute_points_remaining, 10);
        assert_eq!(view.useful_budget.general_remaining(), 15);
        assert_eq!(view.hobby_budget.capacity.general, 10);
        assert!(view.open_choices.is_empty());

        let riding = view.skill(SkillKind::Useful, "Riding").unwrap();
        assert!(riding.is_predilection);
        assert_eq!(riding.ceiling, 5);
        assert!(riding.can_add_rank);
        assert!(!riding.can_remove_rank);

        let lore = view.skill(SkillKind::Useful, "Lore").unwrap();
        assert!(lore.conditional_pool);
        assert_eq!(view.hobbies.len(), book.hobbies.len());
    }

    #[test]
    fn open_choices_list_their_options() {
        let book = RuleBook::standard();
        let sheet = CharacterSheet::new("Lia", book.species("elf").unwrap());
        let view = AllocationView::build(&book, &sheet).unwrap();
        assert_eq!(
            view.open_choices,
            vec![
                OpenChoiceView {
                    list: SkillKind::Useful,
                    index: 0,
                    options: vec!["Ranged".into(), "Stealth".into()],
                },
                OpenChoiceView {
                    list: SkillKind::Hobby,
                    index: 0,
                    options: vec!["Dancing".into(), "Calligraphy".into()],
                },
            ]
        );
        assert!(view.skills.iter().all(|s| !s.can_add_rank));
    }

    #[test]
    fn derived_view_notes_bonus_sources() {
        let book = RuleBook::standard();
        let sheet = book.selections().add_power(&human(&book), "silver-tongue").unwrap();
        let view = DerivedStatsView::build(&book, &sheet).unwrap();

        let eloquence = view.skills.iter().find(|s| s.name == "Eloquence").unwrap();
        assert_eq!(eloquence.base, 0);
        assert_eq!(eloquence.total, 1);
        assert_eq!(
            eloquence.notes,
            vec![BonusNote {
                source: "Silver Tongue".into(),
                amount: 1
            }]
        );
        assert!(view.skills.iter().any(|s| s.name == "Riding" && s.base == 2));
        assert_eq!(view.hit_points, 12);
    }

    #[test]
    fn step_validation_covers_every_step() {
        let book = RuleBook::standard();
        let steps = StepValidation::all(&book, &human(&book));
        assert_eq!(steps.len(), WizardStep::ALL.len());
        assert_eq!(steps[0].label, "Identity");
        let predilections = steps
            .iter()
            .find(|s| s.step == WizardStep::Predilections)
            .unwrap();
        assert!(predilections.complete);
        assert!(!steps.iter().find(|s| s.step == WizardStep::Attributes).unwrap().complete);
    }

    #[test]
    fn missing_species_surfaces_as_error() {
        let book = RuleBook::standard();
        let sheet = CharacterSheet::new("Ghost", &SpeciesDefinition::new("wraith", "Wraith"));
        assert!(AllocationView::build(&book, &sheet).unwrap_err().is_fatal());
        assert!(DerivedStatsView::build(&book, &sheet).unwrap_err().is_fatal());
    }
}
