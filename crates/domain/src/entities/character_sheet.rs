//! Character sheet entity - The raw choices a player has made
//!
//! The sheet stores only what the player entered: attribute values, choices,
//! invested ranks and purchased specialties. Every budget and derived statistic
//! is recomputed from it by the rules modules and never written back.
//!
//! The sheet is immutable by replacement: builder-style methods consume the
//! value and return the changed copy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{SkillKind, SpeciesDefinition};
use crate::ids::CharacterId;
use crate::value_objects::{AttributeSet, PredilectionChoices, ProfileAssignment};

/// Investment in one skill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLedgerEntry {
    #[serde(default)]
    pub invested_ranks: u32,
    /// Purchased specialties only; granted ones are derived
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl SkillLedgerEntry {
    pub fn is_empty(&self) -> bool {
        self.invested_ranks == 0 && self.specialties.is_empty()
    }

    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }
}

/// A character under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    id: CharacterId,
    name: String,
    species: String,
    #[serde(default)]
    gender: Option<String>,
    attributes: AttributeSet,
    #[serde(default)]
    predilections: PredilectionChoices,
    #[serde(default)]
    profiles: Option<ProfileAssignment>,
    #[serde(default)]
    skills: BTreeMap<String, SkillLedgerEntry>,
    #[serde(default)]
    hobbies: BTreeMap<String, SkillLedgerEntry>,
    #[serde(default)]
    capability: Option<String>,
    #[serde(default)]
    powers: Vec<String>,
}

impl CharacterSheet {
    /// Start a sheet for `species` with every attribute at its floor.
    pub fn new(name: impl Into<String>, species: &SpeciesDefinition) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            species: species.id.clone(),
            gender: None,
            attributes: AttributeSet::from_fn(|a| species.floor(a)),
            predilections: PredilectionChoices::new(),
            profiles: None,
            skills: BTreeMap::new(),
            hobbies: BTreeMap::new(),
            capability: None,
            powers: Vec::new(),
        }
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Read accessors
    // ──────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the species in the rule book.
    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn predilections(&self) -> &PredilectionChoices {
        &self.predilections
    }

    pub fn profiles(&self) -> Option<&ProfileAssignment> {
        self.profiles.as_ref()
    }

    /// Ledger for the given catalog.
    pub fn ledger(&self, kind: SkillKind) -> &BTreeMap<String, SkillLedgerEntry> {
        match kind {
            SkillKind::Useful => &self.skills,
            SkillKind::Hobby => &self.hobbies,
        }
    }

    pub fn ledger_entry(&self, kind: SkillKind, skill: &str) -> Option<&SkillLedgerEntry> {
        self.ledger(kind).get(skill)
    }

    pub fn invested_ranks(&self, kind: SkillKind, skill: &str) -> u32 {
        self.ledger_entry(kind, skill)
            .map(|e| e.invested_ranks)
            .unwrap_or(0)
    }

    pub fn capability(&self) -> Option<&str> {
        self.capability.as_deref()
    }

    pub fn powers(&self) -> &[String] {
        &self.powers
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Builder-style methods (consume self, return new instance)
    // ──────────────────────────────────────────────────────────────────────────

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_gender(self, gender: Option<String>) -> Self {
        Self { gender, ..self }
    }

    /// Switch species, resetting everything the species constrains.
    pub fn with_species(self, species: &SpeciesDefinition) -> Self {
        Self {
            species: species.id.clone(),
            attributes: AttributeSet::from_fn(|a| species.floor(a)),
            predilections: PredilectionChoices::new(),
            skills: BTreeMap::new(),
            hobbies: BTreeMap::new(),
            ..self
        }
    }

    pub fn with_attributes(self, attributes: AttributeSet) -> Self {
        Self { attributes, ..self }
    }

    pub fn with_predilections(self, predilections: PredilectionChoices) -> Self {
        Self {
            predilections,
            ..self
        }
    }

    pub fn with_profiles(self, profiles: Option<ProfileAssignment>) -> Self {
        Self { profiles, ..self }
    }

    /// Replace one ledger entry; empty entries are dropped from the map.
    pub fn with_ledger_entry(
        mut self,
        kind: SkillKind,
        skill: impl Into<String>,
        entry: SkillLedgerEntry,
    ) -> Self {
        let ledger = match kind {
            SkillKind::Useful => &mut self.skills,
            SkillKind::Hobby => &mut self.hobbies,
        };
        let skill = skill.into();
        if entry.is_empty() {
            ledger.remove(&skill);
        } else {
            ledger.insert(skill, entry);
        }
        self
    }

    pub fn with_capability(self, capability: Option<String>) -> Self {
        Self { capability, ..self }
    }

    pub fn with_powers(self, powers: Vec<String>) -> Self {
        Self { powers, ..self }
    }
}
