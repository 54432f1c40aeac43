//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod bonus;
mod budget;
mod predilection;
mod profile;

pub use attribute::{Attribute, AttributeSet};
pub use bonus::{AttributeBonus, BonusKind, BonusSource, SkillBonus, SpecialtyGrant};
pub use budget::{BudgetSnapshot, PoolCapacity, PoolKind};
pub use predilection::{PredilectionChoices, PredilectionEntry, ResolvedPredilection};
pub use profile::{ProfileAssignment, ProfileTier};
