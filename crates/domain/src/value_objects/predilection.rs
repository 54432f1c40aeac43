//! Predilection declarations and the player's choices for them

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::SkillKind;

/// One innate bonus declared by a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredilectionEntry {
    /// Always granted; optionally with a specialty
    Fixed {
        skill: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        specialty: Option<String>,
    },
    /// The player picks one skill from the options
    ChoiceOfSkill { options: Vec<String> },
    /// Fixed skill, the player picks its specialty
    ChoiceOfSpecialty { skill: String, options: Vec<String> },
}

impl PredilectionEntry {
    pub fn fixed(skill: impl Into<String>) -> Self {
        Self::Fixed {
            skill: skill.into(),
            specialty: None,
        }
    }

    pub fn fixed_with_specialty(skill: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self::Fixed {
            skill: skill.into(),
            specialty: Some(specialty.into()),
        }
    }

    pub fn choice_of_skill<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self::ChoiceOfSkill {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn choice_of_specialty<S: Into<String>>(
        skill: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::ChoiceOfSpecialty {
            skill: skill.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the player must supply a value for this entry.
    pub fn needs_choice(&self) -> bool {
        !matches!(self, Self::Fixed { .. })
    }

    /// Options the player may pick from (empty for fixed entries).
    pub fn options(&self) -> &[String] {
        match self {
            Self::Fixed { .. } => &[],
            Self::ChoiceOfSkill { options } | Self::ChoiceOfSpecialty { options, .. } => options,
        }
    }
}

/// A predilection turned into a concrete skill (and maybe specialty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPredilection {
    pub skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Player choices keyed by the declaring entry's index, one map per list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredilectionChoices {
    #[serde(default)]
    useful: BTreeMap<usize, String>,
    #[serde(default)]
    hobby: BTreeMap<usize, String>,
}

impl PredilectionChoices {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, kind: SkillKind) -> &BTreeMap<usize, String> {
        match kind {
            SkillKind::Useful => &self.useful,
            SkillKind::Hobby => &self.hobby,
        }
    }

    fn list_mut(&mut self, kind: SkillKind) -> &mut BTreeMap<usize, String> {
        match kind {
            SkillKind::Useful => &mut self.useful,
            SkillKind::Hobby => &mut self.hobby,
        }
    }

    /// The choice at `index`, ignoring blank values.
    pub fn get(&self, kind: SkillKind, index: usize) -> Option<&str> {
        self.list(kind)
            .get(&index)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn with_choice(mut self, kind: SkillKind, index: usize, value: impl Into<String>) -> Self {
        self.list_mut(kind).insert(index, value.into());
        self
    }

    pub fn without_choice(mut self, kind: SkillKind, index: usize) -> Self {
        self.list_mut(kind).remove(&index);
        self
    }

    pub fn iter(&self, kind: SkillKind) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.list(kind).iter().map(|(i, v)| (*i, v.as_str()))
    }
}
