//! Species entity - Innate attribute bounds and predilections
//!
//! Species are reference data supplied by the data-access layer. The rules
//! engine never edits them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::SkillKind;
use crate::value_objects::{Attribute, PredilectionEntry};

/// Floor and ceiling of one attribute for a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBounds {
    pub floor: i32,
    pub ceiling: i32,
}

impl Default for AttributeBounds {
    fn default() -> Self {
        Self {
            floor: 1,
            ceiling: 5,
        }
    }
}

/// Body size, which shifts the defense values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeCategory {
    /// Modifier added to every defense.
    pub fn defense_modifier(&self) -> i32 {
        match self {
            Self::Small => 1,
            Self::Medium => 0,
            Self::Large => -1,
        }
    }
}

/// A playable species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Attributes not listed use [`AttributeBounds::default`]
    #[serde(default)]
    pub attribute_bounds: BTreeMap<Attribute, AttributeBounds>,
    #[serde(default)]
    pub useful_predilections: Vec<PredilectionEntry>,
    #[serde(default)]
    pub hobby_predilections: Vec<PredilectionEntry>,
    /// Empty means every gender is allowed
    #[serde(default)]
    pub allowed_genders: Vec<String>,
    #[serde(default)]
    pub size: SizeCategory,
}

impl SpeciesDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            attribute_bounds: BTreeMap::new(),
            useful_predilections: Vec::new(),
            hobby_predilections: Vec::new(),
            allowed_genders: Vec::new(),
            size: SizeCategory::Medium,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_bounds(mut self, attribute: Attribute, floor: i32, ceiling: i32) -> Self {
        self.attribute_bounds
            .insert(attribute, AttributeBounds { floor, ceiling });
        self
    }

    pub fn with_predilection(mut self, kind: SkillKind, entry: PredilectionEntry) -> Self {
        match kind {
            SkillKind::Useful => self.useful_predilections.push(entry),
            SkillKind::Hobby => self.hobby_predilections.push(entry),
        }
        self
    }

    pub fn with_genders<S: Into<String>>(mut self, genders: impl IntoIterator<Item = S>) -> Self {
        self.allowed_genders = genders.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size(mut self, size: SizeCategory) -> Self {
        self.size = size;
        self
    }

    pub fn bounds(&self, attribute: Attribute) -> AttributeBounds {
        self.attribute_bounds
            .get(&attribute)
            .copied()
            .unwrap_or_default()
    }

    pub fn floor(&self, attribute: Attribute) -> i32 {
        self.bounds(attribute).floor
    }

    pub fn predilections(&self, kind: SkillKind) -> &[PredilectionEntry] {
        match kind {
            SkillKind::Useful => &self.useful_predilections,
            SkillKind::Hobby => &self.hobby_predilections,
        }
    }

    pub fn allows_gender(&self, gender: &str) -> bool {
        self.allowed_genders.is_empty() || self.allowed_genders.iter().any(|g| g == gender)
    }
}
