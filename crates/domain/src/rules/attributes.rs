//! Attribute allocator
//!
//! Point-buy above the species floors. The remaining budget is always
//! recomputed from the whole attribute set; no counter is kept.

use super::{log_rejection, RuleBook};
use crate::entities::{CharacterSheet, SpeciesDefinition};
use crate::error::BuildError;
use crate::value_objects::{Attribute, AttributeSet, PoolKind};

#[derive(Debug, Clone, Copy)]
pub struct AttributeAllocator<'a> {
    book: &'a RuleBook,
}

impl<'a> AttributeAllocator<'a> {
    pub fn new(book: &'a RuleBook) -> Self {
        Self { book }
    }

    /// Effective ceiling: the species ceiling, capped by the universal one.
    pub fn ceiling(&self, species: &SpeciesDefinition, attribute: Attribute) -> i32 {
        species
            .bounds(attribute)
            .ceiling
            .min(self.book.rules.attribute_ceiling)
    }

    /// `budget - Σ(value - floor)` over every attribute.
    pub fn remaining_for(&self, species: &SpeciesDefinition, attributes: &AttributeSet) -> i32 {
        let spent: i32 = attributes
            .iter()
            .map(|(attribute, value)| value - species.floor(attribute))
            .sum();
        self.book.rules.attribute_budget - spent
    }

    pub fn remaining(&self, sheet: &CharacterSheet) -> Result<i32, BuildError> {
        let species = self.book.species(sheet.species())?;
        Ok(self.remaining_for(species, sheet.attributes()))
    }

    fn check_increment(&self, sheet: &CharacterSheet, attribute: Attribute) -> Result<(), BuildError> {
        let species = self.book.species(sheet.species())?;
        if self.remaining_for(species, sheet.attributes()) <= 0 {
            return Err(BuildError::BudgetExceeded {
                pool: PoolKind::Attributes,
            });
        }
        let ceiling = self.ceiling(species, attribute);
        if sheet.attributes().get(attribute) >= ceiling {
            return Err(BuildError::ceiling(attribute.display_name(), ceiling));
        }
        Ok(())
    }

    fn check_decrement(&self, sheet: &CharacterSheet, attribute: Attribute) -> Result<(), BuildError> {
        let species = self.book.species(sheet.species())?;
        let floor = species.floor(attribute);
        if sheet.attributes().get(attribute) <= floor {
            return Err(BuildError::floor(attribute.display_name(), floor));
        }
        Ok(())
    }

    pub fn can_increment(&self, sheet: &CharacterSheet, attribute: Attribute) -> bool {
        self.check_increment(sheet, attribute).is_ok()
    }

    pub fn can_decrement(&self, sheet: &CharacterSheet, attribute: Attribute) -> bool {
        self.check_decrement(sheet, attribute).is_ok()
    }

    pub fn increment(&self, sheet: &CharacterSheet, attribute: Attribute) -> Result<CharacterSheet, BuildError> {
        self.check_increment(sheet, attribute)
            .inspect_err(|err| log_rejection("increment", attribute.display_name(), err))?;
        let value = sheet.attributes().get(attribute) + 1;
        Ok(sheet
            .clone()
            .with_attributes(sheet.attributes().clone().with(attribute, value)))
    }

    pub fn decrement(&self, sheet: &CharacterSheet, attribute: Attribute) -> Result<CharacterSheet, BuildError> {
        self.check_decrement(sheet, attribute)
            .inspect_err(|err| log_rejection("decrement", attribute.display_name(), err))?;
        let value = sheet.attributes().get(attribute) - 1;
        Ok(sheet
            .clone()
            .with_attributes(sheet.attributes().clone().with(attribute, value)))
    }

    /// Hit points from the allocated Constitution; never stored.
    pub fn hit_points(&self, sheet: &CharacterSheet) -> i32 {
        self.book.rules.hit_points(sheet.attributes())
    }

    /// Every attribute within bounds and the whole budget spent.
    pub fn is_complete(&self, sheet: &CharacterSheet) -> Result<bool, BuildError> {
        let species = self.book.species(sheet.species())?;
        let in_bounds = sheet.attributes().iter().all(|(attribute, value)| {
            value >= species.floor(attribute) && value <= self.ceiling(species, attribute)
        });
        Ok(in_bounds && self.remaining_for(species, sheet.attributes()) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dwarf_sheet(book: &RuleBook) -> CharacterSheet {
        CharacterSheet::new("Brann", book.species("dwarf").unwrap())
    }

    #[test]
    fn fresh_sheet_has_full_budget() {
        let book = RuleBook::standard();
        let sheet = dwarf_sheet(&book);
        assert_eq!(book.allocator().remaining(&sheet), Ok(10));
        assert!(!book.allocator().can_decrement(&sheet, Attribute::Constitution));
    }

    #[test]
    fn increment_stops_at_species_ceiling() {
        let book = RuleBook::standard();
        let allocator = book.allocator();
        let mut sheet = dwarf_sheet(&book);
        for _ in 0..3 {
            sheet = allocator.increment(&sheet, Attribute::Agility).unwrap();
        }
        assert_eq!(sheet.attributes().get(Attribute::Agility), 4);
        assert_eq!(
            allocator.increment(&sheet, Attribute::Agility),
            Err(BuildError::ceiling("Agility", 4))
        );
    }

    #[test]
    fn decrement_stops_at_floor() {
        let book = RuleBook::standard();
        let allocator = book.allocator();
        let sheet = dwarf_sheet(&book);
        let raised = allocator.increment(&sheet, Attribute::Constitution).unwrap();
        let lowered = allocator.decrement(&raised, Attribute::Constitution).unwrap();
        assert_eq!(lowered, sheet);
        assert_eq!(
            allocator.decrement(&lowered, Attribute::Constitution),
            Err(BuildError::floor("Constitution", 2))
        );
    }

    #[test]
    fn empty_budget_blocks_increment() {
        let book = RuleBook::standard();
        let allocator = book.allocator();
        let mut sheet = dwarf_sheet(&book);
        for attribute in [Attribute::Strength, Attribute::Esprit] {
            for _ in 0..4 {
                sheet = allocator.increment(&sheet, attribute).unwrap();
            }
        }
        sheet = allocator.increment(&sheet, Attribute::Presence).unwrap();
        sheet = allocator.increment(&sheet, Attribute::Presence).unwrap();
        assert_eq!(allocator.remaining(&sheet), Ok(0));
        assert_eq!(
            allocator.increment(&sheet, Attribute::Composure),
            Err(BuildError::BudgetExceeded {
                pool: PoolKind::Attributes
            })
        );
        assert_eq!(allocator.is_complete(&sheet), Ok(true));
    }

    #[test]
    fn unknown_species_is_reported() {
        let book = RuleBook::standard();
        let orphan = CharacterSheet::new("Ghost", &SpeciesDefinition::new("wraith", "Wraith"));
        assert!(matches!(
            book.allocator().increment(&orphan, Attribute::Strength),
            Err(BuildError::IncompleteConfiguration(_))
        ));
    }
}
