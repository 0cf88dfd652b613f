//! Traits describing read-only rules data.
//!
//! Oracles expose the class, trait, talent, skill/trade, path and ancestry
//! catalogs. Every lookup returns an `Option`, so each call site decides
//! explicitly whether a missing id is skipped or fatal. The [`RulesEnv`]
//! aggregate bundles the oracles so the engine can reach everything it needs
//! without coupling to a concrete catalog.
mod ancestries;
mod catalog;
mod classes;
mod paths;
mod skills;
mod talents;
mod traits;

pub use ancestries::{AncestryDefinition, AncestryOracle};
pub use catalog::{Catalog, CatalogBuilder};
pub use classes::{
    ChoiceOption, ClassDefinition, ClassFeature, ClassOracle, FeatureBenefit, FeatureChoice,
    ProgressionLevel, ProgressionTotals, Subclass,
};
pub use paths::{PathDefinition, PathKind, PathLevel, PathOracle};
pub use skills::{SkillDefinition, SkillOracle};
pub use talents::{TalentDefinition, TalentOracle};
pub use traits::{PrerequisiteFailure, Prerequisites, TraitDefinition, TraitOracle};

/// Every oracle the engine consumes.
pub trait ReferenceData:
    ClassOracle + TraitOracle + TalentOracle + SkillOracle + PathOracle + AncestryOracle
{
}

impl<T> ReferenceData for T where
    T: ClassOracle + TraitOracle + TalentOracle + SkillOracle + PathOracle + AncestryOracle + ?Sized
{
}

/// Aggregates the read-only oracles required by the calculation pipeline.
#[derive(Clone, Copy)]
pub struct RulesEnv<'a> {
    pub classes: &'a dyn ClassOracle,
    pub traits: &'a dyn TraitOracle,
    pub talents: &'a dyn TalentOracle,
    pub skills: &'a dyn SkillOracle,
    pub paths: &'a dyn PathOracle,
    pub ancestries: &'a dyn AncestryOracle,
}

impl<'a> RulesEnv<'a> {
    pub fn new(
        classes: &'a dyn ClassOracle,
        traits: &'a dyn TraitOracle,
        talents: &'a dyn TalentOracle,
        skills: &'a dyn SkillOracle,
        paths: &'a dyn PathOracle,
        ancestries: &'a dyn AncestryOracle,
    ) -> Self {
        Self {
            classes,
            traits,
            talents,
            skills,
            paths,
            ancestries,
        }
    }

    /// Uses one source for every oracle.
    pub fn with_all<D: ReferenceData>(data: &'a D) -> Self {
        Self::new(data, data, data, data, data, data)
    }
}

impl core::fmt::Debug for RulesEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RulesEnv").finish_non_exhaustive()
    }
}
