//! Derived stats calculator
//!
//! Hit points, both defense states, profile ranks and the character-point
//! budget, all recomputed from the sheet on every call. Bonus sources are
//! layered on top of the ledger totals here and nowhere else.
//!
//! Missing reference data (species, defense skill, profile, bonus source) is
//! reported as [`BuildError::IncompleteConfiguration`]; no value is ever
//! defaulted to zero to paper over it.

use serde::{Deserialize, Serialize};

use super::score::{ContributionSource, ScoreBreakdown};
use super::{log_rejection, RuleBook};
use crate::entities::{CharacterSheet, SkillKind};
use crate::error::BuildError;
use crate::value_objects::{Attribute, BonusKind, ProfileTier};

/// Which characterization of the character a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    /// Ordinary appearance
    Masked,
    /// True form
    Unmasked,
}

/// One attribute bonus, attributed to its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeBonusLine {
    pub source: String,
    pub kind: BonusKind,
    pub attribute: Attribute,
    pub amount: i32,
}

impl AttributeBonusLine {
    /// Capability grants and masked grants only show once unmasked.
    fn applies_in(&self, state: FormState, masked: bool) -> bool {
        match state {
            FormState::Unmasked => true,
            FormState::Masked => !masked && self.kind != BonusKind::Capability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBonusLine {
    pub source: String,
    pub skill: String,
    pub ranks: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyGrantLine {
    pub source: String,
    pub skill: String,
    pub specialty: String,
}

/// Every bonus granted by the active capability and powers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusSummary {
    /// Attribute bonuses shown in both states
    pub visible: Vec<AttributeBonusLine>,
    /// Attribute bonuses hidden while masked
    pub masked: Vec<AttributeBonusLine>,
    pub skills: Vec<SkillBonusLine>,
    pub specialties: Vec<SpecialtyGrantLine>,
}

impl BonusSummary {
    /// Total bonus on `attribute` in the given state.
    pub fn attribute_bonus(&self, attribute: Attribute, state: FormState) -> i32 {
        let visible = self
            .visible
            .iter()
            .filter(|line| line.attribute == attribute && line.applies_in(state, false));
        let masked = self
            .masked
            .iter()
            .filter(|line| line.attribute == attribute && line.applies_in(state, true));
        visible.chain(masked).map(|line| line.amount).sum()
    }

    pub fn skill_bonus(&self, skill: &str) -> i32 {
        self.skills
            .iter()
            .filter(|line| line.skill == skill)
            .map(|line| line.ranks)
            .sum()
    }
}

/// Rank of one canonical profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRank {
    pub profile: String,
    pub tier: Option<ProfileTier>,
    /// Sum of the final scores of the profile's skills
    pub skill_total: i32,
    pub rank: i32,
    /// Rank plus the flat major/minor points
    pub total_points: i32,
}

/// A combat defense in both states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseValue {
    pub name: String,
    pub masked: i32,
    pub unmasked: i32,
}

impl DefenseValue {
    pub fn in_state(&self, state: FormState) -> i32 {
        match state {
            FormState::Masked => self.masked,
            FormState::Unmasked => self.unmasked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub hit_points: i32,
    pub defenses: Vec<DefenseValue>,
    pub profiles: Vec<ProfileRank>,
    pub character_points: i32,
    pub bonuses: BonusSummary,
}

#[derive(Debug, Clone, Copy)]
pub struct DerivedStatsCalculator<'a> {
    book: &'a RuleBook,
}

impl<'a> DerivedStatsCalculator<'a> {
    pub fn new(book: &'a RuleBook) -> Self {
        Self { book }
    }

    /// Collect the bonuses of the capability and every power, by source.
    pub fn aggregate_bonuses(&self, sheet: &CharacterSheet) -> Result<BonusSummary, BuildError> {
        let mut summary = BonusSummary::default();
        for source in self.book.active_bonuses(sheet)? {
            for bonus in &source.attribute_bonuses {
                let line = AttributeBonusLine {
                    source: source.name.clone(),
                    kind: source.kind,
                    attribute: bonus.attribute,
                    amount: bonus.amount,
                };
                if bonus.masked {
                    summary.masked.push(line);
                } else {
                    summary.visible.push(line);
                }
            }
            summary
                .skills
                .extend(source.skill_bonuses.iter().map(|bonus| SkillBonusLine {
                    source: source.name.clone(),
                    skill: bonus.skill.clone(),
                    ranks: bonus.ranks,
                }));
            summary
                .specialties
                .extend(source.free_specialties.iter().map(|grant| SpecialtyGrantLine {
                    source: source.name.clone(),
                    skill: grant.skill.clone(),
                    specialty: grant.specialty.clone(),
                }));
        }
        Ok(summary)
    }

    /// Ledger breakdown of a useful skill with bonus-source contributions appended.
    pub fn final_breakdown(&self, sheet: &CharacterSheet, skill: &str) -> Result<ScoreBreakdown, BuildError> {
        let bonuses = self.aggregate_bonuses(sheet)?;
        let breakdown = self.book.ledger(SkillKind::Useful).breakdown(sheet, skill)?;
        Ok(with_bonuses(breakdown, &bonuses))
    }

    /// Final breakdowns of every useful skill, in catalog order.
    pub fn final_breakdowns(&self, sheet: &CharacterSheet) -> Result<Vec<ScoreBreakdown>, BuildError> {
        let bonuses = self.aggregate_bonuses(sheet)?;
        Ok(self
            .book
            .ledger(SkillKind::Useful)
            .breakdowns(sheet)?
            .into_iter()
            .map(|breakdown| with_bonuses(breakdown, &bonuses))
            .collect())
    }

    pub fn final_score(&self, sheet: &CharacterSheet, skill: &str) -> Result<i32, BuildError> {
        Ok(self.final_breakdown(sheet, skill)?.total())
    }

    pub fn hit_points(&self, sheet: &CharacterSheet) -> i32 {
        self.book.rules.hit_points(sheet.attributes())
    }

    /// Rank of every canonical profile, in rule book order.
    pub fn profile_ranks(&self, sheet: &CharacterSheet) -> Result<Vec<ProfileRank>, BuildError> {
        if let Some(assignment) = sheet.profiles() {
            for profile in [&assignment.major, &assignment.minor] {
                if !self.book.has_profile(profile) {
                    return Err(BuildError::incomplete(format!(
                        "profile '{}' is not in the rule book",
                        profile
                    )));
                }
            }
        }

        let breakdowns = self.final_breakdowns(sheet)?;
        let rules = &self.book.rules;
        self.book
            .profiles
            .iter()
            .map(|profile| {
                let members: Vec<&ScoreBreakdown> = breakdowns
                    .iter()
                    .filter(|b| {
                        self.book
                            .skills
                            .get(&b.skill)
                            .is_some_and(|entry| entry.belongs_to(profile))
                    })
                    .collect();
                if members.is_empty() {
                    return Err(BuildError::incomplete(format!(
                        "profile '{}' has no skills in the catalog",
                        profile
                    )));
                }
                let skill_total = members.iter().map(|b| b.total()).sum();
                let rank = rules.profile_rank(skill_total);
                let tier = sheet.profiles().and_then(|p| p.tier_of(profile));
                let flat = match tier {
                    Some(ProfileTier::Major) => rules.major_profile_points,
                    Some(ProfileTier::Minor) => rules.minor_profile_points,
                    None => 0,
                };
                Ok(ProfileRank {
                    profile: profile.clone(),
                    tier,
                    skill_total,
                    rank,
                    total_points: rank + flat,
                })
            })
            .collect()
    }

    /// Σ profile points, plus the flat points for holding a major and a minor.
    pub fn character_points(&self, sheet: &CharacterSheet) -> Result<i32, BuildError> {
        let ranks = self.profile_ranks(sheet)?;
        Ok(self.points_from(sheet, &ranks))
    }

    fn points_from(&self, sheet: &CharacterSheet, ranks: &[ProfileRank]) -> i32 {
        let rules = &self.book.rules;
        let held = if sheet.profiles().is_some() {
            rules.major_profile_points + rules.minor_profile_points
        } else {
            0
        };
        ranks.iter().map(|r| r.total_points).sum::<i32>() + held
    }

    /// Every configured defense, masked and unmasked.
    pub fn defenses(&self, sheet: &CharacterSheet) -> Result<Vec<DefenseValue>, BuildError> {
        let species = self.book.species(sheet.species())?;
        let bonuses = self.aggregate_bonuses(sheet)?;
        let specialties = self.book.specialties();
        let rules = &self.book.rules;

        rules
            .defenses
            .iter()
            .map(|defense| {
                if !self.book.skills.contains(&defense.skill) {
                    return Err(BuildError::incomplete(format!(
                        "defense '{}' needs the skill '{}', which is not in the catalog",
                        defense.name, defense.skill
                    )));
                }
                let breakdown = self.book.ledger(SkillKind::Useful).breakdown(sheet, &defense.skill)?;
                let skill_score = with_bonuses(breakdown, &bonuses).total();
                let specialty = match &defense.specialty {
                    Some(name) if specialties.owns(sheet, &defense.skill, name)? => defense.specialty_bonus,
                    _ => 0,
                };
                let base = skill_score
                    + sheet.attributes().get(defense.attribute)
                    + rules.defense_base
                    + specialty
                    + species.size.defense_modifier();
                Ok(DefenseValue {
                    name: defense.name.clone(),
                    masked: base + bonuses.attribute_bonus(defense.attribute, FormState::Masked),
                    unmasked: base + bonuses.attribute_bonus(defense.attribute, FormState::Unmasked),
                })
            })
            .collect()
    }

    /// Everything the recap shows.
    pub fn derive(&self, sheet: &CharacterSheet) -> Result<DerivedStats, BuildError> {
        self.derive_inner(sheet)
            .inspect_err(|err| log_rejection("derive", sheet.name(), err))
    }

    fn derive_inner(&self, sheet: &CharacterSheet) -> Result<DerivedStats, BuildError> {
        let profiles = self.profile_ranks(sheet)?;
        Ok(DerivedStats {
            hit_points: self.hit_points(sheet),
            defenses: self.defenses(sheet)?,
            character_points: self.points_from(sheet, &profiles),
            profiles,
            bonuses: self.aggregate_bonuses(sheet)?,
        })
    }
}

fn with_bonuses(mut breakdown: ScoreBreakdown, bonuses: &BonusSummary) -> ScoreBreakdown {
    let skill = breakdown.skill.clone();
    for line in bonuses.skills.iter().filter(|line| line.skill == skill) {
        breakdown.push(
            ContributionSource::Bonus {
                source: line.source.clone(),
            },
            line.ranks,
        );
    }
    breakdown
}
