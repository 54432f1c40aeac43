//! Point pools and the spend snapshot recomputed from a sheet

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point pool the player spends from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    /// Attribute point-buy
    Attributes,
    /// General useful-skill pool
    General,
    /// Attribute-unlocked pool for eligible useful skills
    Conditional,
    /// Hobby skill pool
    Hobby,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attributes => "attribute",
            Self::General => "general",
            Self::Conditional => "conditional",
            Self::Hobby => "hobby",
        })
    }
}

/// Capacity of the pools a ledger draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCapacity {
    pub general: i32,
    pub conditional: i32,
}

/// Spend against a [`PoolCapacity`], derived from the raw investment map.
///
/// Never stored on the sheet. Remaining values go negative only for sheets
/// imported in an overspent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    pub capacity: PoolCapacity,
    pub general_spent: i32,
    pub conditional_spent: i32,
}

impl BudgetSnapshot {
    pub fn general_remaining(&self) -> i32 {
        self.capacity.general - self.general_spent
    }

    pub fn conditional_remaining(&self) -> i32 {
        self.capacity.conditional - self.conditional_spent
    }

    pub fn total_spent(&self) -> i32 {
        self.general_spent + self.conditional_spent
    }

    pub fn is_overspent(&self) -> bool {
        self.general_remaining() < 0 || self.conditional_remaining() < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_is_capacity_minus_spend() {
        let snapshot = BudgetSnapshot {
            capacity: PoolCapacity {
                general: 15,
                conditional: 2,
            },
            general_spent: 4,
            conditional_spent: 2,
        };
        assert_eq!(snapshot.general_remaining(), 11);
        assert_eq!(snapshot.conditional_remaining(), 0);
        assert_eq!(snapshot.total_spent(), 6);
        assert!(!snapshot.is_overspent());
    }

    #[test]
    fn pool_kind_display() {
        assert_eq!(PoolKind::Conditional.to_string(), "conditional");
        assert_eq!(PoolKind::Hobby.to_string(), "hobby");
    }
}
