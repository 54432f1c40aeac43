//! Rule book loading
//!
//! A rule book file is the JSON form of [`RuleBook`]. Omitted rule constants
//! keep their defaults. After parsing, cross references are checked so a
//! broken file fails at load time instead of midway through a build.

use std::collections::HashSet;

use sheetwright_domain::{BuildError, PredilectionEntry, RuleBook, SkillKind};

use crate::error::SheetFormatError;

pub fn parse_rule_book(json: &str) -> Result<RuleBook, SheetFormatError> {
    let book: RuleBook = serde_json::from_str(json)?;
    check_rule_book(&book)?;
    tracing::debug!(
        profiles = book.profiles.len(),
        skills = book.skills.len(),
        hobbies = book.hobbies.len(),
        species = book.species.len(),
        "Loaded rule book"
    );
    Ok(book)
}

/// Every name the book refers to must resolve inside the book.
pub fn check_rule_book(book: &RuleBook) -> Result<(), BuildError> {
    if book.profiles.len() < 2 {
        return Err(BuildError::incomplete(
            "a rule book needs at least two profiles",
        ));
    }
    unique("profile", book.profiles.iter().map(String::as_str))?;

    for kind in [SkillKind::Useful, SkillKind::Hobby] {
        unique("skill", book.catalog(kind).iter().map(|s| s.name.as_str()))?;
    }
    for skill in book.skills.iter() {
        if let Some(profile) = skill.profiles.iter().find(|p| !book.has_profile(p)) {
            return Err(BuildError::incomplete(format!(
                "skill '{}' belongs to unknown profile '{}'",
                skill.name, profile
            )));
        }
    }
    for profile in &book.profiles {
        if book.skills.in_profile(profile).next().is_none() {
            return Err(BuildError::incomplete(format!(
                "profile '{}' has no skills",
                profile
            )));
        }
    }

    unique("species", book.species.iter().map(|s| s.id.as_str()))?;
    for species in &book.species {
        for kind in [SkillKind::Useful, SkillKind::Hobby] {
            for entry in species.predilections(kind) {
                let skills: Vec<&str> = match entry {
                    PredilectionEntry::Fixed { skill, .. }
                    | PredilectionEntry::ChoiceOfSpecialty { skill, .. } => vec![skill.as_str()],
                    PredilectionEntry::ChoiceOfSkill { options } => {
                        options.iter().map(String::as_str).collect()
                    }
                };
                for skill in skills {
                    book.skill(kind, skill).map_err(|_| {
                        BuildError::incomplete(format!(
                            "species '{}' has a predilection on unknown {} skill '{}'",
                            species.id, kind, skill
                        ))
                    })?;
                }
            }
        }
    }

    for defense in &book.rules.defenses {
        if !book.skills.contains(&defense.skill) {
            return Err(BuildError::incomplete(format!(
                "defense '{}' uses unknown skill '{}'",
                defense.name, defense.skill
            )));
        }
    }

    unique("bonus source", book.bonuses.iter().map(|b| b.id.as_str()))?;
    for source in &book.bonuses {
        let skills = source
            .skill_bonuses
            .iter()
            .map(|b| &b.skill)
            .chain(source.free_specialties.iter().map(|g| &g.skill));
        for skill in skills {
            if !book.skills.contains(skill) {
                return Err(BuildError::incomplete(format!(
                    "bonus source '{}' refers to unknown skill '{}'",
                    source.id, skill
                )));
            }
        }
    }

    Ok(())
}

fn unique<'a>(what: &str, names: impl Iterator<Item = &'a str>) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(BuildError::incomplete(format!("duplicate {} '{}'", what, name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_book_survives_json() {
        let json = serde_json::to_string(&RuleBook::standard()).unwrap();
        let book = parse_rule_book(&json).unwrap();
        assert_eq!(book, RuleBook::standard());
    }

    #[test]
    fn minimal_book_uses_default_rules() {
        let json = r#"{
            "rules": { "hobbyPool": 12 },
            "profiles": ["Fighter", "Scholar"],
            "skills": [
                { "name": "Melee", "profiles": ["Fighter"], "specialties": ["Parry"] },
                { "name": "Athletics", "profiles": ["Fighter"], "specialties": ["Dodge"] },
                { "name": "Lore", "profiles": ["Scholar"], "conditionalPool": true }
            ],
            "species": [
                {
                    "id": "human",
                    "name": "Human",
                    "usefulPredilections": [
                        { "kind": "choice_of_skill", "options": ["Melee", "Lore"] }
                    ]
                }
            ]
        }"#;
        let book = parse_rule_book(json).unwrap();
        assert_eq!(book.rules.hobby_pool, 12);
        assert_eq!(book.rules.useful_pool, 15);
        assert!(book.hobbies.is_empty());
        assert!(book.skill(SkillKind::Useful, "Lore").unwrap().conditional_pool);
    }

    #[test]
    fn dangling_predilection_is_incomplete_configuration() {
        let mut book = RuleBook::standard();
        book.hobbies = book.hobbies.iter().filter(|h| h.name != "Singing").cloned().collect();
        let err = check_rule_book(&book).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("Singing"));
    }

    #[test]
    fn defense_on_unknown_skill_is_refused() {
        let json = serde_json::to_string(&RuleBook::standard())
            .unwrap()
            .replace("\"skill\":\"Melee\"", "\"skill\":\"Fencing\"");
        let err = parse_rule_book(&json).unwrap_err();
        assert!(err.is_rejection());
        assert!(err.to_string().contains("Fencing"));
    }

    #[test]
    fn duplicate_species_is_refused() {
        let mut book = RuleBook::standard();
        let copy = book.species[0].clone();
        book.species.push(copy);
        assert!(check_rule_book(&book).is_err());
    }
}
