//! Choice resolution: substitutes the player's recorded picks into
//! placeholder targets.
//!
//! Choice keys arrive as strings and are parsed here, at the boundary.
//! Malformed keys are ignored. A recorded value that does not fit the target
//! (not an attribute name, not among the listed options, or not a known skill
//! or trade) leaves the effect unresolved. Accepted values are stored in their
//! canonical spelling so later stages can look them up by id.

use std::collections::BTreeMap;

use tracing::debug;

use crate::effect::{AttributedEffect, ChoiceKey, EffectKind, Target};
use crate::env::{RulesEnv, SkillDefinition};
use crate::stats::Attribute;

/// Parses the raw `"{owner}-{index}"` map into structured keys.
pub fn parse_choices(raw: &BTreeMap<String, String>) -> BTreeMap<ChoiceKey, String> {
    raw.iter()
        .filter_map(|(key, value)| match key.parse::<ChoiceKey>() {
            Ok(key) => Some((key, value.clone())),
            Err(err) => {
                debug!(target: "dc20::resolve", %err, "ignoring malformed choice key");
                None
            }
        })
        .collect()
}

/// Resolves every pending effect whose choice has been recorded.
pub fn resolve(
    effects: Vec<AttributedEffect>,
    choices: &BTreeMap<String, String>,
    env: &RulesEnv<'_>,
) -> Vec<AttributedEffect> {
    resolve_parsed(effects, &parse_choices(choices), env)
}

pub(crate) fn resolve_parsed(
    effects: Vec<AttributedEffect>,
    choices: &BTreeMap<ChoiceKey, String>,
    env: &RulesEnv<'_>,
) -> Vec<AttributedEffect> {
    effects
        .into_iter()
        .map(|effect| resolve_one(effect, choices, env))
        .collect()
}

fn resolve_one(
    mut attributed: AttributedEffect,
    choices: &BTreeMap<ChoiceKey, String>,
    env: &RulesEnv<'_>,
) -> AttributedEffect {
    if attributed.resolved {
        return attributed;
    }
    let Some(value) = attributed.choice_key.as_ref().and_then(|key| choices.get(key)) else {
        return attributed;
    };

    match substitute(&attributed.effect.kind, value, env) {
        Some(kind) => {
            attributed.effect.kind = kind;
            attributed.resolved = true;
            attributed.resolved_value = Some(value.clone());
        }
        None => debug!(
            target: "dc20::resolve",
            source = %attributed.source.id,
            %value,
            "recorded choice does not fit its target"
        ),
    }
    attributed
}

/// The listed option matching `value`, in the option's own spelling. Any
/// value passes when no options are listed.
fn allowed<'a>(options: &'a [String], value: &'a str) -> Option<&'a str> {
    if options.is_empty() {
        return Some(value);
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(value))
        .map(String::as_str)
}

/// The catalog id for `value`, matched against ids and display names.
fn catalog_id<'a>(entries: &'a [SkillDefinition], value: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(value) || entry.name.eq_ignore_ascii_case(value))
        .map(|entry| entry.id.as_str())
}

/// Listed options are authoritative; an open choice must name a catalog entry.
fn expertise_id(options: &[String], entries: &[SkillDefinition], value: &str) -> Option<String> {
    if options.is_empty() {
        catalog_id(entries, value).map(str::to_string)
    } else {
        allowed(options, value).map(str::to_string)
    }
}

/// The effect with its placeholder replaced, or `None` if the value does not
/// fit.
fn substitute(kind: &EffectKind, value: &str, env: &RulesEnv<'_>) -> Option<EffectKind> {
    match kind {
        EffectKind::ModifyAttribute {
            target: Target::Choice { options, .. },
            value: amount,
        } => {
            let attribute = allowed(options, value)?.parse::<Attribute>().ok()?;
            Some(EffectKind::ModifyAttribute {
                target: Target::Fixed(attribute),
                value: *amount,
            })
        }
        EffectKind::GrantSkillExpertise {
            target: Target::Choice { options, .. },
        } => Some(EffectKind::GrantSkillExpertise {
            target: Target::Fixed(expertise_id(options, env.skills.skills(), value)?),
        }),
        EffectKind::GrantTradeExpertise {
            target: Target::Choice { options, .. },
        } => Some(EffectKind::GrantTradeExpertise {
            target: Target::Fixed(expertise_id(options, env.skills.trades(), value)?),
        }),
        _ => None,
    }
}
