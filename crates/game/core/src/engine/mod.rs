//! Character calculation pipeline.
//!
//! [`calculate`] runs four pure stages in order:
//! aggregate → resolve → synthesize → validate.
//!
//! The only failures are caller contract violations (see [`EngineError`]).
//! Everything the player can get wrong while building is reported through
//! [`ValidationResult`] on an otherwise complete result, so the UI can render
//! partial sheets while the wizard is still in progress.

mod aggregate;
mod resolve;
mod synthesize;
mod validate;

pub use aggregate::aggregate;
pub use resolve::{parse_choices, resolve};
pub use synthesize::{CharacterStats, Synthesis, synthesize};
pub use validate::validate;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::build::CharacterBuildInput;
use crate::effect::{AttributedEffect, ChoiceKey, EffectSource};
use crate::env::{ClassDefinition, RulesEnv};
use crate::error::EngineError;
use crate::rules::MAX_LEVEL;
use crate::stats::{
    AncestryPoints, BackgroundPoints, ConditionalModifier, GrantedAbility, Grants, LevelBudgets,
    StatBreakdown,
};
use crate::validation::ValidationResult;

/// Borrowed inputs shared by the synthesis and validation stages.
///
/// Only built by [`calculate`] after the level and class have been checked.
#[derive(Clone, Copy, Debug)]
pub struct CalculationContext<'a> {
    pub input: &'a CharacterBuildInput,
    pub env: RulesEnv<'a>,
    pub class: &'a ClassDefinition,
    /// `input.level`, already range-checked.
    pub level: u32,
}

/// An effect still waiting on a player choice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UnresolvedChoice {
    pub key: ChoiceKey,
    pub source: EffectSource,
    pub prompt: String,
    /// Empty when any value of the target type is accepted.
    pub options: Vec<String>,
    pub description: String,
    /// The recorded value, when one exists but did not fit the target.
    pub rejected_value: Option<String>,
}

/// Full outcome of one calculation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CalculationResult {
    pub stats: CharacterStats,
    pub breakdowns: BTreeMap<String, StatBreakdown>,
    pub granted_abilities: Vec<GrantedAbility>,
    pub conditional_modifiers: Vec<ConditionalModifier>,
    pub grants: Grants,
    pub validation: ValidationResult,
    pub unresolved_choices: Vec<UnresolvedChoice>,
    pub background: BackgroundPoints,
    pub ancestry: AncestryPoints,
    pub level_budgets: LevelBudgets,
}

impl CalculationResult {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    pub fn breakdown(&self, stat: &str) -> Option<&StatBreakdown> {
        self.breakdowns.get(stat)
    }
}

/// Calculation engine bound to one set of reference data.
pub struct CalculationEngine<'a> {
    env: RulesEnv<'a>,
}

impl<'a> CalculationEngine<'a> {
    pub fn new(env: RulesEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> RulesEnv<'a> {
        self.env
    }

    pub fn calculate(&self, input: &CharacterBuildInput) -> Result<CalculationResult, EngineError> {
        calculate(input, &self.env)
    }
}

/// Runs the full pipeline for one build.
///
/// Pure: the same input and reference data always produce an equal result.
pub fn calculate(
    input: &CharacterBuildInput,
    env: &RulesEnv<'_>,
) -> Result<CalculationResult, EngineError> {
    let level = u32::try_from(input.level)
        .ok()
        .filter(|level| (1..=MAX_LEVEL).contains(level))
        .ok_or_else(|| EngineError::invalid_level(input.level))?;

    let class_id = input.class_id.as_deref().ok_or(EngineError::MissingClass)?;
    let class = env
        .classes
        .class(class_id)
        .ok_or_else(|| EngineError::UnknownClass(class_id.to_string()))?;

    let ctx = CalculationContext {
        input,
        env: *env,
        class,
        level,
    };

    let recorded = parse_choices(&input.selected_trait_choices);
    let effects = resolve::resolve_parsed(aggregate(input, env), &recorded, env);
    let unresolved_choices = unresolved(&effects, &recorded);

    let synthesis = synthesize(&ctx, &effects);
    let validation = validate(&ctx, &synthesis, &unresolved_choices);

    debug!(
        target: "dc20::engine",
        build = %input.id,
        class = %class.id,
        level,
        effects = effects.len(),
        unresolved = unresolved_choices.len(),
        valid = validation.is_valid,
        "calculated character"
    );

    Ok(CalculationResult {
        stats: synthesis.stats,
        breakdowns: synthesis.breakdowns,
        granted_abilities: synthesis.granted_abilities,
        conditional_modifiers: synthesis.conditional_modifiers,
        grants: synthesis.grants,
        validation,
        unresolved_choices,
        background: synthesis.background,
        ancestry: synthesis.ancestry,
        level_budgets: synthesis.level_budgets,
    })
}

/// One entry per pending choice key, in emission order.
fn unresolved(
    effects: &[AttributedEffect],
    recorded: &BTreeMap<ChoiceKey, String>,
) -> Vec<UnresolvedChoice> {
    let mut seen = BTreeSet::new();
    effects
        .iter()
        .filter(|effect| !effect.resolved)
        .filter_map(|effect| {
            let key = effect.choice_key.as_ref()?;
            let (prompt, options) = effect.effect.kind.choice_prompt()?;
            if !seen.insert(key.clone()) {
                return None;
            }
            Some(UnresolvedChoice {
                key: key.clone(),
                source: effect.source.clone(),
                prompt: prompt.to_string(),
                options: options.to_vec(),
                description: effect.effect.describe(),
                rejected_value: recorded.get(key).cloned(),
            })
        })
        .collect()
}
