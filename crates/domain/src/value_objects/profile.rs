//! Major/minor profile assignment

use serde::{Deserialize, Serialize};

/// Tier a profile holds on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTier {
    Major,
    Minor,
}

/// The character's major and minor profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAssignment {
    pub major: String,
    pub minor: String,
}

impl ProfileAssignment {
    pub fn new(major: impl Into<String>, minor: impl Into<String>) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
        }
    }

    /// Tier held by `profile`, if any.
    pub fn tier_of(&self, profile: &str) -> Option<ProfileTier> {
        if self.major == profile {
            Some(ProfileTier::Major)
        } else if self.minor == profile {
            Some(ProfileTier::Minor)
        } else {
            None
        }
    }
}
