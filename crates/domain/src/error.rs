//! Build rule errors
//!
//! Every guard in the rules engine reports its rejection through [`BuildError`].
//! Budget limits, ceilings and floors are ordinary outcomes of a player clicking
//! around the sheet; only [`BuildError::IncompleteConfiguration`] means the
//! reference data itself is broken.

use thiserror::Error;

use crate::entities::SkillKind;
use crate::value_objects::PoolKind;

/// Rejection reported by a build operation.
///
/// A rejected operation never changes the sheet: the caller keeps the value it
/// passed in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No capacity left in the pool(s) the purchase could draw from
    #[error("No points left in the {pool} pool")]
    BudgetExceeded { pool: PoolKind },

    /// Attribute or skill already sits at its upper bound
    #[error("{subject} is already at its ceiling of {ceiling}")]
    CeilingReached { subject: String, ceiling: i32 },

    /// Attribute or skill already sits at its lower bound
    #[error("{subject} is already at its floor of {floor}")]
    FloorReached { subject: String, floor: i32 },

    /// A predilection choice is still open; all skill spending is blocked
    #[error("Predilection {index} of the {list} list has no choice yet")]
    UnresolvedChoice { list: SkillKind, index: usize },

    /// The submitted value is not one of the entry's declared options
    #[error("'{value}' is not a valid choice for predilection {index} of the {list} list")]
    InvalidChoice {
        list: SkillKind,
        index: usize,
        value: String,
    },

    /// The skill already owns this specialty through some source
    #[error("{skill} already has the specialty {specialty}")]
    DuplicateSpecialty { skill: String, specialty: String },

    /// Specialty missing from the skill's catalog entry
    #[error("{specialty} is not a known specialty of {skill}")]
    UnknownSpecialty { skill: String, specialty: String },

    /// Only purchased specialties can be refunded
    #[error("{specialty} was not purchased for {skill}")]
    NotPurchased { skill: String, specialty: String },

    /// Skill missing from the catalog the player is spending in
    #[error("Unknown {kind} skill: {skill}")]
    UnknownSkill { kind: SkillKind, skill: String },

    /// Catalog extension would shadow an existing skill
    #[error("A {kind} skill named {skill} already exists")]
    DuplicateSkill { kind: SkillKind, skill: String },

    /// Identity, profile or bonus selection that the reference data forbids
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Reference data needed for the computation is missing
    #[error("Incomplete configuration: {0}")]
    IncompleteConfiguration(String),
}

impl BuildError {
    /// Create an invalid selection error
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    /// Creates an incomplete configuration error.
    ///
    /// Use this when the character references species, skill, profile or bonus
    /// data the rule book does not carry. Callers must surface it instead of
    /// rendering zeroes.
    pub fn incomplete(msg: impl Into<String>) -> Self {
        Self::IncompleteConfiguration(msg.into())
    }

    /// Create a ceiling error for the given subject
    pub fn ceiling(subject: impl Into<String>, ceiling: i32) -> Self {
        Self::CeilingReached {
            subject: subject.into(),
            ceiling,
        }
    }

    /// Create a floor error for the given subject
    pub fn floor(subject: impl Into<String>, floor: i32) -> Self {
        Self::FloorReached {
            subject: subject.into(),
            floor,
        }
    }

    /// Whether the error stops the whole computation rather than one click.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::IncompleteConfiguration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_error_names_pool() {
        let err = BuildError::BudgetExceeded {
            pool: PoolKind::General,
        };
        assert_eq!(err.to_string(), "No points left in the general pool");
    }

    #[test]
    fn test_unresolved_choice_carries_index() {
        let err = BuildError::UnresolvedChoice {
            list: SkillKind::Hobby,
            index: 2,
        };
        assert!(matches!(err, BuildError::UnresolvedChoice { index: 2, .. }));
        assert_eq!(
            err.to_string(),
            "Predilection 2 of the hobby list has no choice yet"
        );
    }

    #[test]
    fn test_ceiling_error() {
        let err = BuildError::ceiling("Melee", 4);
        assert_eq!(err.to_string(), "Melee is already at its ceiling of 4");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_incomplete_configuration_is_fatal() {
        let err = BuildError::incomplete("species 'naiad' is not in the rule book");
        assert!(err.is_fatal());
        assert!(err.to_string().contains("naiad"));
    }
}
