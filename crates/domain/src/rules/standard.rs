//! Built-in rule book preset
//!
//! Six profiles of four skills each, a hobby catalog, four species and a
//! handful of capabilities and powers. Used when no rule book file is
//! configured and as the fixture for the rule tests.

use super::{BuildRules, RuleBook};
use crate::entities::{SizeCategory, SkillCatalog, SkillCatalogEntry, SkillKind, SpeciesDefinition};
use crate::value_objects::{Attribute, BonusSource, PredilectionEntry};

pub const ADVENTURER: &str = "Adventurer";
pub const FIGHTER: &str = "Fighter";
pub const SCHOLAR: &str = "Scholar";
pub const GENTRY: &str = "Gentry";
pub const ROGUE: &str = "Rogue";
pub const TRAVELER: &str = "Traveler";

impl RuleBook {
    /// The standard preset.
    pub fn standard() -> Self {
        Self {
            rules: BuildRules::default(),
            profiles: [ADVENTURER, FIGHTER, SCHOLAR, GENTRY, ROGUE, TRAVELER]
                .into_iter()
                .map(String::from)
                .collect(),
            skills: useful_skills(),
            hobbies: hobby_skills(),
            species: species(),
            bonuses: bonus_sources(),
        }
    }
}

fn skill(name: &str, profile: &str, specialties: &[&str]) -> SkillCatalogEntry {
    SkillCatalogEntry::new(name)
        .with_profile(profile)
        .with_specialties(specialties.iter().copied())
}

fn useful_skills() -> SkillCatalog {
    SkillCatalog::new(vec![
        // Adventurer
        skill("Athletics", ADVENTURER, &["Climbing", "Swimming", "Dodge"])
            .with_description("Running, climbing, swimming and getting out of the way"),
        skill("Survival", ADVENTURER, &["Forest", "Mountains", "Hunting"]),
        skill("Animal Handling", ADVENTURER, &["Horses", "Dogs", "Falconry"]),
        skill("Navigation", ADVENTURER, &["Stars", "Maps"]),
        // Fighter
        skill("Melee", FIGHTER, &["Sword", "Axe", "Parry"])
            .with_description("Fighting with hand-held weapons"),
        skill("Ranged", FIGHTER, &["Bow", "Crossbow", "Throwing"]),
        skill("Brawling", FIGHTER, &["Grappling", "Boxing"]),
        skill("Tactics", FIGHTER, &["Skirmish", "Siege"]),
        // Scholar: spend here may draw on the Esprit pool
        skill("Lore", SCHOLAR, &["History", "Heraldry", "Myths"]).conditional(),
        skill("Medicine", SCHOLAR, &["Surgery", "Herbalism"]).conditional(),
        skill("Languages", SCHOLAR, &["Old Tongue", "Trade Cant", "Elvish"])
            .conditional()
            .first_specialty_free()
            .with_description("Each specialty is one spoken language"),
        skill("Occultism", SCHOLAR, &["Demons", "Rituals"]).conditional(),
        // Gentry
        skill("Etiquette", GENTRY, &["Court", "Church"]),
        skill("Eloquence", GENTRY, &["Oratory", "Poetry"]),
        skill("Intrigue", GENTRY, &["Rumors", "Blackmail"]),
        skill("Arts", GENTRY, &["Music", "Painting"]),
        // Rogue
        skill("Stealth", ROGUE, &["Ambush", "Shadowing"]),
        skill("Thievery", ROGUE, &["Locks", "Pickpocket"]),
        skill("Deception", ROGUE, &["Disguise", "Lies"]),
        skill("Streetwise", ROGUE, &["Fences", "Gangs"]),
        // Traveler
        skill("Vigilance", TRAVELER, &["Night watch", "Traps"]),
        skill("Riding", TRAVELER, &["Mounted combat", "Long rides"]),
        skill("Trade", TRAVELER, &["Haggling", "Appraisal"]),
        skill("Crafts", TRAVELER, &["Smithing", "Carpentry"]),
    ])
}

fn hobby_skills() -> SkillCatalog {
    [
        ("Cooking", &["Pastry", "Spices"][..]),
        ("Gardening", &["Roses"][..]),
        ("Dancing", &["Court dances", "Folk dances"][..]),
        ("Gambling", &["Dice", "Cards"][..]),
        ("Singing", &["Ballads", "Drinking songs"][..]),
        ("Fishing", &["Fly fishing"][..]),
        ("Calligraphy", &["Illumination"][..]),
        ("Chess", &[][..]),
    ]
    .into_iter()
    .map(|(name, specialties)| SkillCatalogEntry::new(name).with_specialties(specialties.iter().copied()))
    .collect()
}

fn species() -> Vec<SpeciesDefinition> {
    vec![
        SpeciesDefinition::new("human", "Human")
            .with_description("Adaptable and numerous")
            .with_genders(["female", "male"])
            .with_predilection(
                SkillKind::Useful,
                PredilectionEntry::choice_of_skill(["Trade", "Riding", "Eloquence"]),
            )
            .with_predilection(
                SkillKind::Hobby,
                PredilectionEntry::choice_of_skill(["Cooking", "Gambling", "Singing"]),
            ),
        SpeciesDefinition::new("dwarf", "Dwarf")
            .with_description("Stout folk of the deep halls")
            .with_genders(["female", "male"])
            .with_size(SizeCategory::Small)
            .with_bounds(Attribute::Constitution, 2, 5)
            .with_bounds(Attribute::Agility, 1, 4)
            .with_predilection(
                SkillKind::Useful,
                PredilectionEntry::fixed_with_specialty("Crafts", "Smithing"),
            )
            .with_predilection(
                SkillKind::Useful,
                PredilectionEntry::choice_of_specialty("Lore", ["History", "Heraldry"]),
            )
            .with_predilection(SkillKind::Hobby, PredilectionEntry::fixed("Singing")),
        SpeciesDefinition::new("troll", "Troll")
            .with_description("Huge, patient and slow to anger")
            .with_size(SizeCategory::Large)
            .with_bounds(Attribute::Strength, 2, 5)
            .with_bounds(Attribute::Esprit, 1, 4)
            .with_predilection(SkillKind::Useful, PredilectionEntry::fixed("Brawling")),
        SpeciesDefinition::new("elf", "Elf")
            .with_description("Long-lived wardens of the old forests")
            .with_genders(["female", "male"])
            .with_bounds(Attribute::Perception, 2, 5)
            .with_predilection(
                SkillKind::Useful,
                PredilectionEntry::choice_of_skill(["Ranged", "Stealth"]),
            )
            .with_predilection(
                SkillKind::Useful,
                PredilectionEntry::fixed_with_specialty("Languages", "Elvish"),
            )
            .with_predilection(
                SkillKind::Hobby,
                PredilectionEntry::choice_of_skill(["Dancing", "Calligraphy"]),
            ),
    ]
}

fn bonus_sources() -> Vec<BonusSource> {
    vec![
        BonusSource::capability("iron-hide", "Iron Hide")
            .with_attribute_bonus(Attribute::Strength, 1, false),
        BonusSource::capability("quicksilver", "Quicksilver")
            .with_attribute_bonus(Attribute::Agility, 1, false),
        BonusSource::capability("night-sight", "Night Sight")
            .with_attribute_bonus(Attribute::Perception, 1, false),
        BonusSource::power("keen-senses", "Keen Senses")
            .with_skill_bonus("Vigilance", 1)
            .with_free_specialty("Vigilance", "Night watch"),
        BonusSource::power("silver-tongue", "Silver Tongue").with_skill_bonus("Eloquence", 1),
        BonusSource::power("stone-blood", "Stone Blood")
            .with_attribute_bonus(Attribute::Constitution, 1, false),
        BonusSource::power("true-form", "True Form")
            .with_description("Only shows once the mask drops")
            .with_attribute_bonus(Attribute::Agility, 1, true)
            .with_free_specialty("Athletics", "Dodge"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_profiles_with_four_skills_each() {
        let book = RuleBook::standard();
        assert_eq!(book.profiles.len(), 6);
        for profile in &book.profiles {
            assert_eq!(book.skills.in_profile(profile).count(), 4, "{profile}");
        }
    }

    #[test]
    fn predilection_skills_exist_in_catalogs() {
        let book = RuleBook::standard();
        for species in &book.species {
            for kind in [SkillKind::Useful, SkillKind::Hobby] {
                for entry in species.predilections(kind) {
                    let names: Vec<&str> = match entry {
                        PredilectionEntry::Fixed { skill, .. }
                        | PredilectionEntry::ChoiceOfSpecialty { skill, .. } => vec![skill],
                        PredilectionEntry::ChoiceOfSkill { options } => {
                            options.iter().map(String::as_str).collect()
                        }
                    };
                    for name in names {
                        assert!(book.catalog(kind).contains(name), "{} / {name}", species.id);
                    }
                }
            }
        }
    }

    #[test]
    fn defense_skills_exist() {
        let book = RuleBook::standard();
        for defense in &book.rules.defenses {
            assert!(book.skills.contains(&defense.skill));
        }
    }
}
