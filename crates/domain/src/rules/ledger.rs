//! Skill budget ledger
//!
//! Spend is never tracked incrementally. Every query walks the sheet's raw
//! investment map and charges each skill's line cost against the pools:
//!
//! - `line cost = invested ranks + purchased specialties`, one less for a skill
//!   whose first specialty is free once a rank is invested
//! - eligible skills draw from the conditional pool first and overflow into
//!   the general pool; everything else is charged to the general pool
//!
//! The same ledger serves useful skills (general + conditional pools) and
//! hobby skills (a single pool).

use super::predilection::Predilections;
use super::score::{ContributionSource, ScoreBreakdown};
use super::{log_rejection, RuleBook};
use crate::entities::{CharacterSheet, SkillCatalogEntry, SkillKind};
use crate::error::BuildError;
use crate::value_objects::{BudgetSnapshot, PoolCapacity, PoolKind};

/// Cost line of one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineItem {
    pub invested: u32,
    pub purchased: usize,
    pub first_specialty_free: bool,
    pub conditional: bool,
}

impl LineItem {
    pub fn cost(&self) -> i32 {
        let cost = self.invested as i32 + self.purchased as i32;
        if self.first_specialty_free && self.invested > 0 && self.purchased > 0 {
            cost - 1
        } else {
            cost
        }
    }
}

/// Charge every line against the pools.
pub(crate) fn tally(capacity: PoolCapacity, lines: impl IntoIterator<Item = LineItem>) -> BudgetSnapshot {
    let mut snapshot = BudgetSnapshot {
        capacity,
        ..BudgetSnapshot::default()
    };
    for line in lines {
        let cost = line.cost();
        if line.conditional {
            let available = (capacity.conditional - snapshot.conditional_spent).max(0);
            let from_conditional = cost.min(available);
            snapshot.conditional_spent += from_conditional;
            snapshot.general_spent += cost - from_conditional;
        } else {
            snapshot.general_spent += cost;
        }
    }
    snapshot
}

/// Ledger over one skill catalog.
#[derive(Debug, Clone, Copy)]
pub struct SkillLedger<'a> {
    book: &'a RuleBook,
    kind: SkillKind,
}

impl<'a> SkillLedger<'a> {
    pub fn new(book: &'a RuleBook, kind: SkillKind) -> Self {
        Self { book, kind }
    }

    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    /// Pool reported when a purchase finds no capacity.
    pub fn general_pool(&self) -> PoolKind {
        match self.kind {
            SkillKind::Useful => PoolKind::General,
            SkillKind::Hobby => PoolKind::Hobby,
        }
    }

    pub fn capacity(&self, sheet: &CharacterSheet) -> PoolCapacity {
        let rules = &self.book.rules;
        match self.kind {
            SkillKind::Useful => PoolCapacity {
                general: rules.useful_pool,
                conditional: rules.conditional_capacity(sheet.attributes()),
            },
            SkillKind::Hobby => PoolCapacity {
                general: rules.hobby_pool,
                conditional: 0,
            },
        }
    }

    /// Spend snapshot, recomputed from the investment map.
    pub fn budget(&self, sheet: &CharacterSheet) -> Result<BudgetSnapshot, BuildError> {
        let catalog = self.book.catalog(self.kind);
        let lines = sheet
            .ledger(self.kind)
            .iter()
            .map(|(name, entry)| {
                let skill = catalog.get(name).ok_or_else(|| {
                    BuildError::incomplete(format!(
                        "{} skill '{}' on the sheet is not in the catalog",
                        self.kind, name
                    ))
                })?;
                Ok(LineItem {
                    invested: entry.invested_ranks,
                    purchased: entry.specialties.len(),
                    first_specialty_free: skill.first_specialty_free,
                    conditional: self.kind == SkillKind::Useful && skill.conditional_pool,
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;
        Ok(tally(self.capacity(sheet), lines))
    }

    pub fn predilections(&self, sheet: &CharacterSheet) -> Result<Predilections, BuildError> {
        let species = self.book.species(sheet.species())?;
        Ok(Predilections::for_species(species, sheet.predilections()))
    }

    /// Ledger contributions to a skill's score.
    pub fn breakdown(&self, sheet: &CharacterSheet, skill: &str) -> Result<ScoreBreakdown, BuildError> {
        let entry = self.book.skill(self.kind, skill)?;
        let predilections = self.predilections(sheet)?;
        Ok(self.breakdown_with(sheet, entry, &predilections))
    }

    /// Breakdowns for every catalog skill, in catalog order.
    pub fn breakdowns(&self, sheet: &CharacterSheet) -> Result<Vec<ScoreBreakdown>, BuildError> {
        let predilections = self.predilections(sheet)?;
        Ok(self
            .book
            .catalog(self.kind)
            .iter()
            .map(|entry| self.breakdown_with(sheet, entry, &predilections))
            .collect())
    }

    pub(crate) fn breakdown_with(
        &self,
        sheet: &CharacterSheet,
        entry: &SkillCatalogEntry,
        predilections: &Predilections,
    ) -> ScoreBreakdown {
        let rules = &self.book.rules;
        let is_predilection = predilections.is_predilection(self.kind, &entry.name);
        let mut breakdown = ScoreBreakdown {
            skill: entry.name.clone(),
            kind: self.kind,
            is_predilection,
            ceiling: rules.skill_ceiling_for(is_predilection),
            contributions: Vec::new(),
        };
        if is_predilection {
            breakdown.push(ContributionSource::Predilection, rules.predilection_bonus);
        }
        if let (SkillKind::Useful, Some(profiles)) = (self.kind, sheet.profiles()) {
            if entry.belongs_to(&profiles.major) {
                breakdown.push(ContributionSource::MajorProfile, rules.major_skill_bonus);
            }
            if entry.belongs_to(&profiles.minor) {
                breakdown.push(ContributionSource::MinorProfile, rules.minor_skill_bonus);
            }
        }
        breakdown.push(
            ContributionSource::InvestedRanks,
            sheet.invested_ranks(self.kind, &entry.name) as i32,
        );
        breakdown
    }

    fn check_add_rank(&self, sheet: &CharacterSheet, skill: &str) -> Result<(), BuildError> {
        let entry = self.book.skill(self.kind, skill)?;
        let predilections = self.predilections(sheet)?;
        predilections.ensure_resolved()?;

        let breakdown = self.breakdown_with(sheet, entry, &predilections);
        if breakdown.at_ceiling() {
            return Err(BuildError::ceiling(skill, breakdown.ceiling));
        }

        let budget = self.budget(sheet)?;
        let conditional_open = self.kind == SkillKind::Useful
            && entry.conditional_pool
            && budget.conditional_remaining() > 0;
        if budget.general_remaining() <= 0 && !conditional_open {
            return Err(BuildError::BudgetExceeded {
                pool: self.general_pool(),
            });
        }
        Ok(())
    }

    /// The authoritative gate for buying a rank.
    pub fn can_add_rank(&self, sheet: &CharacterSheet, skill: &str) -> bool {
        self.check_add_rank(sheet, skill).is_ok()
    }

    pub fn add_rank(&self, sheet: &CharacterSheet, skill: &str) -> Result<CharacterSheet, BuildError> {
        self.check_add_rank(sheet, skill)
            .inspect_err(|err| log_rejection("add_rank", skill, err))?;
        let mut entry = sheet
            .ledger_entry(self.kind, skill)
            .cloned()
            .unwrap_or_default();
        entry.invested_ranks += 1;
        Ok(sheet.clone().with_ledger_entry(self.kind, skill, entry))
    }

    pub fn can_remove_rank(&self, sheet: &CharacterSheet, skill: &str) -> bool {
        sheet.invested_ranks(self.kind, skill) > 0
    }

    /// Refund one rank; only refuses when nothing is invested.
    pub fn remove_rank(&self, sheet: &CharacterSheet, skill: &str) -> Result<CharacterSheet, BuildError> {
        let mut entry = match sheet.ledger_entry(self.kind, skill) {
            Some(entry) if entry.invested_ranks > 0 => entry.clone(),
            _ => {
                let err = BuildError::floor(skill, 0);
                log_rejection("remove_rank", skill, &err);
                return Err(err);
            }
        };
        entry.invested_ranks -= 1;
        Ok(sheet.clone().with_ledger_entry(self.kind, skill, entry))
    }

    /// Skills whose ledger score exceeds their ceiling (possible after a
    /// predilection choice changes or on imported sheets).
    pub fn over_ceiling(&self, sheet: &CharacterSheet) -> Result<Vec<String>, BuildError> {
        Ok(self
            .breakdowns(sheet)?
            .into_iter()
            .filter(|b| b.ledger_score() > b.ceiling)
            .map(|b| b.skill)
            .collect())
    }

    /// General pool fully spent, nothing overspent, every skill within bounds.
    pub fn is_complete(&self, sheet: &CharacterSheet) -> Result<bool, BuildError> {
        let budget = self.budget(sheet)?;
        Ok(budget.general_remaining() == 0
            && !budget.is_overspent()
            && self.over_ceiling(sheet)?.is_empty())
    }
}
