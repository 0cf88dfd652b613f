//! Deterministic DC20 character rules.
//!
//! `dc20-core` turns a [`CharacterBuildInput`] plus read-only reference data
//! into final stats, per-stat breakdowns, point budgets and a validation
//! report. Every calculation flows through [`engine::calculate`], and the
//! loader and runtime crates depend on the types re-exported here. The crate
//! performs no I/O and keeps no state between calls.
pub mod build;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod rules;
pub mod stats;
pub mod validation;

pub use build::{CharacterBuildInput, FeatureSelection, Fluency, LanguageEntry, PathPointAllocations};
pub use config::EngineConfig;
pub use effect::{AttributedEffect, ChoiceKey, Effect, EffectKind, EffectSource, SourceKind, Stat, Target};
pub use engine::{
    CalculationContext, CalculationEngine, CalculationResult, CharacterStats, UnresolvedChoice,
    calculate,
};
pub use env::{
    AncestryDefinition, Catalog, CatalogBuilder, ClassDefinition, ClassFeature, PathDefinition,
    PathKind, ReferenceData, RulesEnv, SkillDefinition, TalentDefinition, TraitDefinition,
};
pub use error::{EngineError, ErrorSeverity, RulesError};
pub use stats::{Attribute, AttributeScores, StatBreakdown};
pub use validation::{BuildStep, IssueCode, ValidationIssue, ValidationResult};
