//! Stat system, layered.
//!
//! ```text
//! [ Attributes (Layer 1) ]
//!      ↓
//! [ Derived: defenses, saves, movement (Layer 2) ]
//!      ↓
//! [ Resources: HP/SP/MP, known counts (Layer 3) ]
//!      ↓
//! [ Budgets: point economies (Layer 4) ]
//! ```
//!
//! Every layer reads its modifiers from one [`StatBonuses`] index and
//! reports each value as a [`StatBreakdown`].

pub mod attribute;
pub mod bonus;
pub mod breakdown;
pub mod budgets;
pub mod core;
pub mod derived;
pub mod resources;

pub use attribute::{Attribute, AttributeScores};
pub use bonus::{ConditionalModifier, GrantedAbility, Grants, StatBonuses, StatLayer};
pub use breakdown::{Contribution, StatBreakdown};
pub use budgets::{AncestryPoints, BackgroundPoints, BudgetBase, LevelBudgets, PointBudgets};
pub use self::core::FinalAttributes;
pub use derived::{DerivedBase, DerivedStats, SaveBonus};
pub use resources::{PathShare, ResourceBase, ResourcePools};

pub(crate) fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
