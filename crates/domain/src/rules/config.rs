//! Numeric rule configuration
//!
//! Every constant the build rules use lives here so a rule book can override
//! them from JSON. Fields missing from the JSON keep their default.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Attribute, AttributeSet};

/// How one combat defense is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseRule {
    /// Display name (e.g. "Parry")
    pub name: String,
    /// Useful skill whose score feeds the defense
    pub skill: String,
    pub attribute: Attribute,
    /// Specialty of `skill` that improves the defense when owned
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default = "default_specialty_bonus")]
    pub specialty_bonus: i32,
}

fn default_specialty_bonus() -> i32 {
    1
}

impl DefenseRule {
    pub fn new(name: impl Into<String>, skill: impl Into<String>, attribute: Attribute) -> Self {
        Self {
            name: name.into(),
            skill: skill.into(),
            attribute,
            specialty: None,
            specialty_bonus: default_specialty_bonus(),
        }
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }
}

/// Constants of the character build rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildRules {
    /// Points to spend above species floors
    pub attribute_budget: i32,
    /// Universal attribute ceiling at creation
    pub attribute_ceiling: i32,
    pub skill_ceiling: i32,
    /// Ceiling for a skill that is a resolved predilection
    pub predilection_ceiling: i32,
    pub predilection_bonus: i32,
    /// Base bonus on every skill of the major profile
    pub major_skill_bonus: i32,
    /// Base bonus on every skill of the minor profile
    pub minor_skill_bonus: i32,
    /// Flat profile points for the major profile
    pub major_profile_points: i32,
    /// Flat profile points for the minor profile
    pub minor_profile_points: i32,
    /// General pool for useful skills
    pub useful_pool: i32,
    pub hobby_pool: i32,
    /// Attribute that unlocks the conditional pool
    pub conditional_attribute: Attribute,
    /// Conditional capacity is the attribute value above this threshold
    pub conditional_threshold: i32,
    pub hit_point_multiplier: i32,
    pub hit_point_base: i32,
    pub profile_rank_divisor: i32,
    pub defense_base: i32,
    pub defenses: Vec<DefenseRule>,
}

impl Default for BuildRules {
    fn default() -> Self {
        Self {
            attribute_budget: 10,
            attribute_ceiling: 5,
            skill_ceiling: 4,
            predilection_ceiling: 5,
            predilection_bonus: 2,
            major_skill_bonus: 2,
            minor_skill_bonus: 1,
            major_profile_points: 8,
            minor_profile_points: 4,
            useful_pool: 15,
            hobby_pool: 10,
            conditional_attribute: Attribute::Esprit,
            conditional_threshold: 3,
            hit_point_multiplier: 3,
            hit_point_base: 9,
            profile_rank_divisor: 4,
            defense_base: 5,
            defenses: vec![
                DefenseRule::new("Parry", "Melee", Attribute::Strength).with_specialty("Parry"),
                DefenseRule::new("Dodge", "Athletics", Attribute::Agility).with_specialty("Dodge"),
            ],
        }
    }
}

impl BuildRules {
    /// Ceiling of a skill score.
    pub fn skill_ceiling_for(&self, is_predilection: bool) -> i32 {
        if is_predilection {
            self.predilection_ceiling
        } else {
            self.skill_ceiling
        }
    }

    /// Capacity of the conditional pool: `max(0, attribute - threshold)`.
    pub fn conditional_capacity(&self, attributes: &AttributeSet) -> i32 {
        (attributes.get(self.conditional_attribute) - self.conditional_threshold).max(0)
    }

    /// Hit points: `multiplier × Constitution + base`.
    pub fn hit_points(&self, attributes: &AttributeSet) -> i32 {
        self.hit_point_multiplier * attributes.get(Attribute::Constitution) + self.hit_point_base
    }

    /// Profile rank from the summed skill scores, rounded down.
    pub fn profile_rank(&self, skill_total: i32) -> i32 {
        if self.profile_rank_divisor <= 0 {
            return 0;
        }
        skill_total.div_euclid(self.profile_rank_divisor)
    }
}
