//! Capability and power definitions granting flat bonuses
//!
//! Bonus sources sit on top of the ledgers: they add to displayed totals and
//! defenses but never change what the player has spent.

use serde::{Deserialize, Serialize};

use super::Attribute;

/// Whether a bonus source is the character's capability or one of its powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    Capability,
    Power,
}

/// Flat attribute bonus.
///
/// A masked bonus is hidden while the character is in its masked state and
/// only counts once unmasked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeBonus {
    pub attribute: Attribute,
    pub amount: i32,
    #[serde(default)]
    pub masked: bool,
}

/// Flat skill-rank bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBonus {
    pub skill: String,
    pub ranks: i32,
}

/// Specialty given for free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyGrant {
    pub skill: String,
    pub specialty: String,
}

/// A capability or power definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusSource {
    pub id: String,
    pub name: String,
    pub kind: BonusKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attribute_bonuses: Vec<AttributeBonus>,
    #[serde(default)]
    pub skill_bonuses: Vec<SkillBonus>,
    #[serde(default)]
    pub free_specialties: Vec<SpecialtyGrant>,
}

impl BonusSource {
    pub fn capability(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, BonusKind::Capability)
    }

    pub fn power(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, BonusKind::Power)
    }

    fn new(id: impl Into<String>, name: impl Into<String>, kind: BonusKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: String::new(),
            attribute_bonuses: Vec::new(),
            skill_bonuses: Vec::new(),
            free_specialties: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute_bonus(mut self, attribute: Attribute, amount: i32, masked: bool) -> Self {
        self.attribute_bonuses.push(AttributeBonus {
            attribute,
            amount,
            masked,
        });
        self
    }

    pub fn with_skill_bonus(mut self, skill: impl Into<String>, ranks: i32) -> Self {
        self.skill_bonuses.push(SkillBonus {
            skill: skill.into(),
            ranks,
        });
        self
    }

    pub fn with_free_specialty(
        mut self,
        skill: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        self.free_specialties.push(SpecialtyGrant {
            skill: skill.into(),
            specialty: specialty.into(),
        });
        self
    }

    /// Free specialties this source grants on `skill`.
    pub fn specialties_for<'a>(&'a self, skill: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.free_specialties
            .iter()
            .filter(move |grant| grant.skill == skill)
            .map(|grant| grant.specialty.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_grants() {
        let source = BonusSource::power("keen-eyes", "Keen Eyes")
            .with_skill_bonus("Vigilance", 1)
            .with_free_specialty("Vigilance", "Night watch")
            .with_free_specialty("Stealth", "Ambush");
        assert_eq!(source.kind, BonusKind::Power);
        assert_eq!(
            source.specialties_for("Vigilance").collect::<Vec<_>>(),
            vec!["Night watch"]
        );
    }

    #[test]
    fn masked_defaults_to_false_in_json() {
        let bonus: AttributeBonus =
            serde_json::from_str(r#"{"attribute":"agility","amount":1}"#).unwrap();
        assert!(!bonus.masked);
    }
}
