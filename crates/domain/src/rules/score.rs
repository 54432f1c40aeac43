//! Skill score contributions
//!
//! A skill's score is the sum of an ordered list of contributions. The ledger
//! produces the ones it governs (predilection, profiles, invested ranks); the
//! derived stats calculator appends bonus-source contributions on top.

use serde::{Deserialize, Serialize};

use crate::entities::SkillKind;

/// Where a contribution comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContributionSource {
    Predilection,
    MajorProfile,
    MinorProfile,
    InvestedRanks,
    /// Capability or power, by display name
    Bonus { source: String },
}

impl ContributionSource {
    /// Whether the ledger's ceiling applies to this contribution.
    pub fn is_ledger(&self) -> bool {
        !matches!(self, Self::Bonus { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreContribution {
    pub source: ContributionSource,
    pub amount: i32,
}

/// Score of one skill, itemised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skill: String,
    pub kind: SkillKind,
    pub is_predilection: bool,
    pub ceiling: i32,
    pub contributions: Vec<ScoreContribution>,
}

impl ScoreBreakdown {
    pub(crate) fn push(&mut self, source: ContributionSource, amount: i32) {
        if amount != 0 {
            self.contributions.push(ScoreContribution { source, amount });
        }
    }

    /// Score the ceiling is checked against.
    pub fn ledger_score(&self) -> i32 {
        self.contributions
            .iter()
            .filter(|c| c.source.is_ledger())
            .map(|c| c.amount)
            .sum()
    }

    pub fn bonus_total(&self) -> i32 {
        self.contributions
            .iter()
            .filter(|c| !c.source.is_ledger())
            .map(|c| c.amount)
            .sum()
    }

    /// Final score including bonus sources. Bonus ranks never lift the
    /// score past the ceiling; the full bonus stays in `contributions`.
    pub fn total(&self) -> i32 {
        let ledger = self.ledger_score();
        (ledger + self.bonus_total()).min(self.ceiling.max(ledger))
    }

    pub fn at_ceiling(&self) -> bool {
        self.ledger_score() >= self.ceiling
    }
}
