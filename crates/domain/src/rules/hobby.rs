//! Hobby catalog extension
//!
//! Hobby ranks go through the shared [`SkillLedger`](super::SkillLedger); this
//! module only covers what is specific to hobbies: adding a player-invented
//! skill to the catalog.

use super::RuleBook;
use crate::entities::{SkillCatalogEntry, SkillKind};
use crate::error::BuildError;

impl RuleBook {
    /// Add a custom hobby skill to the hobby catalog.
    ///
    /// The name must be non-blank and must not collide with any skill in
    /// either catalog. The new skill belongs to no profile.
    pub fn create_hobby_skill(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<&SkillCatalogEntry, BuildError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BuildError::invalid_selection("Hobby name cannot be empty"));
        }
        for kind in [SkillKind::Useful, SkillKind::Hobby] {
            if self.catalog(kind).contains(name) {
                let err = BuildError::DuplicateSkill {
                    kind,
                    skill: name.to_string(),
                };
                tracing::debug!(hobby = %name, error = %err, "Hobby skill rejected");
                return Err(err);
            }
        }
        self.hobbies.insert(
            SkillKind::Hobby,
            SkillCatalogEntry::custom(name).with_description(description.trim()),
        )?;
        tracing::info!(hobby = %name, "Created custom hobby skill");
        self.skill(SkillKind::Hobby, name)
    }
}
