//! Skill catalog entities
//!
//! Two disjoint catalogs exist:
//! - Useful skills, grouped into profiles and funded by the general and
//!   conditional pools
//! - Hobby skills, funded by their own pool and open to player-created entries

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Which catalog (and which ledger) a skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Useful,
    Hobby,
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Useful => "useful",
            Self::Hobby => "hobby",
        })
    }
}

/// A skill the player can invest in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCatalogEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Profiles this skill counts towards (empty for hobby skills)
    #[serde(default)]
    pub profiles: Vec<String>,
    /// Known specialties; grows when players create new ones
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Spend on this skill may draw from the conditional pool
    #[serde(default)]
    pub conditional_pool: bool,
    /// First purchased specialty is free once a rank is invested
    #[serde(default)]
    pub first_specialty_free: bool,
    /// Created by a player rather than shipped with the rule book
    #[serde(default)]
    pub is_custom: bool,
}

impl SkillCatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            profiles: Vec::new(),
            specialties: Vec::new(),
            conditional_pool: false,
            first_specialty_free: false,
            is_custom: false,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        let mut entry = Self::new(name);
        entry.is_custom = true;
        entry
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.push(profile.into());
        self
    }

    pub fn with_specialties<S: Into<String>>(mut self, specialties: impl IntoIterator<Item = S>) -> Self {
        self.specialties
            .extend(specialties.into_iter().map(Into::into));
        self
    }

    pub fn conditional(mut self) -> Self {
        self.conditional_pool = true;
        self
    }

    pub fn first_specialty_free(mut self) -> Self {
        self.first_specialty_free = true;
        self
    }

    pub fn belongs_to(&self, profile: &str) -> bool {
        self.profiles.iter().any(|p| p == profile)
    }

    pub fn knows_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }
}

/// Ordered list of catalog entries for one [`SkillKind`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillCatalog {
    entries: Vec<SkillCatalogEntry>,
}

impl SkillCatalog {
    pub fn new(entries: Vec<SkillCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&SkillCatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillCatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Skills counting towards `profile`, in catalog order.
    pub fn in_profile<'a>(&'a self, profile: &'a str) -> impl Iterator<Item = &'a SkillCatalogEntry> + 'a {
        self.entries.iter().filter(move |e| e.belongs_to(profile))
    }

    /// Append a new skill.
    pub fn insert(&mut self, kind: SkillKind, entry: SkillCatalogEntry) -> Result<(), BuildError> {
        if self.contains(&entry.name) {
            return Err(BuildError::DuplicateSkill {
                kind,
                skill: entry.name,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Append a specialty to a skill's known list.
    ///
    /// Returns `false` when the specialty was already known.
    pub fn add_specialty(
        &mut self,
        kind: SkillKind,
        skill: &str,
        specialty: &str,
    ) -> Result<bool, BuildError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == skill)
            .ok_or_else(|| BuildError::UnknownSkill {
                kind,
                skill: skill.to_string(),
            })?;
        if entry.knows_specialty(specialty) {
            return Ok(false);
        }
        entry.specialties.push(specialty.to_string());
        Ok(true)
    }
}

impl FromIterator<SkillCatalogEntry> for SkillCatalog {
    fn from_iter<I: IntoIterator<Item = SkillCatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::new(vec![
            SkillCatalogEntry::new("Melee")
                .with_profile("Fighter")
                .with_specialties(["Sword", "Parry"]),
            SkillCatalogEntry::new("Lore")
                .with_profile("Scholar")
                .conditional(),
        ])
    }

    #[test]
    fn profile_membership() {
        let catalog = catalog();
        let fighters: Vec<_> = catalog.in_profile("Fighter").map(|e| e.name.as_str()).collect();
        assert_eq!(fighters, vec!["Melee"]);
        assert!(catalog.get("Lore").is_some_and(|e| e.conditional_pool));
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut catalog = catalog();
        let result = catalog.insert(SkillKind::Useful, SkillCatalogEntry::new("Melee"));
        assert!(matches!(result, Err(BuildError::DuplicateSkill { .. })));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn add_specialty_extends_known_list() {
        let mut catalog = catalog();
        assert_eq!(catalog.add_specialty(SkillKind::Useful, "Melee", "Axe"), Ok(true));
        assert_eq!(catalog.add_specialty(SkillKind::Useful, "Melee", "Axe"), Ok(false));
        assert!(catalog.get("Melee").is_some_and(|e| e.knows_specialty("Axe")));
        assert!(matches!(
            catalog.add_specialty(SkillKind::Useful, "Juggling", "Knives"),
            Err(BuildError::UnknownSkill { .. })
        ));
    }
}
