//! Attribute keys and the allocated attribute set

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// The eight attributes every character carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Constitution,
    Agility,
    Precision,
    Esprit,
    Perception,
    Presence,
    Composure,
}

impl Attribute {
    /// All attributes in sheet order.
    pub const ALL: [Attribute; 8] = [
        Attribute::Strength,
        Attribute::Constitution,
        Attribute::Agility,
        Attribute::Precision,
        Attribute::Esprit,
        Attribute::Perception,
        Attribute::Presence,
        Attribute::Composure,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Constitution => "Constitution",
            Self::Agility => "Agility",
            Self::Precision => "Precision",
            Self::Esprit => "Esprit",
            Self::Perception => "Perception",
            Self::Presence => "Presence",
            Self::Composure => "Composure",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Attribute {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BuildError::invalid_selection(format!("Unknown attribute: {}", s)))
    }
}

/// Allocated attribute values.
///
/// Always holds a value for every [`Attribute`]; missing keys read as the
/// value the set was created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    values: BTreeMap<Attribute, i32>,
}

impl AttributeSet {
    /// Every attribute at the same value.
    pub fn uniform(value: i32) -> Self {
        Self {
            values: Attribute::ALL.into_iter().map(|a| (a, value)).collect(),
        }
    }

    /// Build from a per-attribute function (e.g. species floors).
    pub fn from_fn(mut f: impl FnMut(Attribute) -> i32) -> Self {
        Self {
            values: Attribute::ALL.into_iter().map(|a| (a, f(a))).collect(),
        }
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        self.values.get(&attribute).copied().unwrap_or_default()
    }

    /// Copy with one attribute replaced.
    pub fn with(mut self, attribute: Attribute, value: i32) -> Self {
        self.values.insert(attribute, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::uniform(1)
    }
}
