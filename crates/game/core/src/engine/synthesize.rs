//! Stat synthesis: runs the stat layers over the resolved effects.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tracing::debug;

use super::CalculationContext;
use crate::build::CharacterBuildInput;
use crate::effect::{AttributedEffect, EffectSource, SourceKind};
use crate::env::{PathKind, ProgressionTotals, RulesEnv};
use crate::rules::{ATTRIBUTE_FLOOR, COMMON_LANGUAGE};
use crate::stats::{
    AncestryPoints, Attribute, BackgroundPoints, BudgetBase, ConditionalModifier, DerivedBase,
    DerivedStats, FinalAttributes, GrantedAbility, Grants, LevelBudgets, PathShare, PointBudgets,
    ResourceBase, ResourcePools, SaveBonus, StatBonuses, StatBreakdown, StatLayer, to_i32,
};

/// Final numbers for the character sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CharacterStats {
    pub level: u32,
    pub combat_mastery: i32,
    pub final_might: i32,
    pub final_agility: i32,
    pub final_charisma: i32,
    pub final_intelligence: i32,
    pub prime_attribute: Attribute,
    pub prime_value: i32,
    #[cfg_attr(feature = "serde", serde(rename = "finalPD"))]
    pub final_pd: i32,
    #[cfg_attr(feature = "serde", serde(rename = "finalAD"))]
    pub final_ad: i32,
    #[cfg_attr(feature = "serde", serde(rename = "finalPDR"))]
    pub final_pdr: i32,
    #[cfg_attr(feature = "serde", serde(rename = "finalHPMax"))]
    pub final_hp_max: i32,
    #[cfg_attr(feature = "serde", serde(rename = "finalSPMax"))]
    pub final_sp_max: i32,
    #[cfg_attr(feature = "serde", serde(rename = "finalMPMax"))]
    pub final_mp_max: i32,
    #[cfg_attr(feature = "serde", serde(rename = "finalSaveDC"))]
    pub final_save_dc: i32,
    pub final_death_threshold: i32,
    pub final_move_speed: i32,
    pub final_jump_distance: i32,
    pub final_rest_points: i32,
    pub final_grit_points: i32,
    pub final_initiative: i32,
    pub saves: BTreeMap<Attribute, SaveBonus>,
    pub total_maneuvers_known: i32,
    pub total_techniques_known: i32,
    pub total_cantrips_known: i32,
    pub total_spells_known: i32,
}

/// Everything the synthesizer produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synthesis {
    pub stats: CharacterStats,
    pub attributes: FinalAttributes,
    pub breakdowns: BTreeMap<String, StatBreakdown>,
    pub grants: Grants,
    pub granted_abilities: Vec<GrantedAbility>,
    pub conditional_modifiers: Vec<ConditionalModifier>,
    pub background: BackgroundPoints,
    pub ancestry: AncestryPoints,
    pub level_budgets: LevelBudgets,
    /// False when the class table lacks a row in `1..=level`.
    pub progression_complete: bool,
}

pub fn synthesize(ctx: &CalculationContext<'_>, effects: &[AttributedEffect]) -> Synthesis {
    let input = ctx.input;
    let bonuses = StatBonuses::collect(effects);

    let progression = ctx.class.progression_through(ctx.level);
    if progression.is_none() {
        debug!(
            target: "dc20::synthesize",
            class = %ctx.class.id,
            level = ctx.level,
            "class progression incomplete, contributing zero"
        );
    }
    let progression_complete = progression.is_some();
    let progression = progression.unwrap_or_default();

    let attributes = FinalAttributes::compute(&input.base_attributes(), &bonuses);

    let derived = DerivedStats::compute(
        &DerivedBase {
            level: ctx.level,
            attributes: attributes.values,
            manual_pd: input.manual_pd,
            manual_ad: input.manual_ad,
            manual_pdr: input.manual_pdr,
        },
        &bonuses,
    );

    let resources = ResourcePools::compute(
        &ResourceBase {
            progression,
            paths: path_shares(input, &ctx.env),
        },
        &bonuses,
    );

    let budgets = PointBudgets::compute(
        &budget_base(input, &ctx.env, progression, attributes.get(Attribute::Intelligence)),
        &bonuses,
    );

    let stats = CharacterStats {
        level: ctx.level,
        combat_mastery: derived.combat_mastery,
        final_might: attributes.get(Attribute::Might),
        final_agility: attributes.get(Attribute::Agility),
        final_charisma: attributes.get(Attribute::Charisma),
        final_intelligence: attributes.get(Attribute::Intelligence),
        prime_attribute: derived.prime_attribute,
        prime_value: derived.prime_value,
        final_pd: derived.pd,
        final_ad: derived.ad,
        final_pdr: derived.pdr,
        final_hp_max: resources.hp_max,
        final_sp_max: resources.sp_max,
        final_mp_max: resources.mp_max,
        final_save_dc: derived.save_dc,
        final_death_threshold: derived.death_threshold,
        final_move_speed: derived.move_speed,
        final_jump_distance: derived.jump_distance,
        final_rest_points: resources.rest_points,
        final_grit_points: derived.grit_points,
        final_initiative: derived.initiative,
        saves: derived.saves.clone(),
        total_maneuvers_known: resources.maneuvers_known,
        total_techniques_known: resources.techniques_known,
        total_cantrips_known: resources.cantrips_known,
        total_spells_known: resources.spells_known,
    };

    let breakdowns = attributes
        .breakdowns
        .iter()
        .map(|(attribute, breakdown)| (attribute.to_string(), breakdown.clone()))
        .chain(derived.breakdowns)
        .chain(resources.breakdowns)
        .chain(budgets.breakdowns)
        .collect();

    Synthesis {
        stats,
        attributes,
        breakdowns,
        grants: bonuses.grants,
        granted_abilities: bonuses.abilities,
        conditional_modifiers: bonuses.conditional,
        background: budgets.background,
        ancestry: budgets.ancestry,
        level_budgets: budgets.level,
        progression_complete,
    }
}

/// Path levels unlocked by the allocated points.
fn path_shares(input: &CharacterBuildInput, env: &RulesEnv<'_>) -> Vec<PathShare> {
    let allocations = input.path_point_allocations;
    PathKind::iter()
        .filter_map(|kind| {
            let points = match kind {
                PathKind::Martial => allocations.martial,
                PathKind::Spellcasting => allocations.spellcasting,
            };
            if points == 0 {
                return None;
            }
            let Some(path) = env.paths.path(kind) else {
                debug!(target: "dc20::synthesize", path = kind.as_ref(), "no table for allocated path");
                return None;
            };
            Some(PathShare {
                source: EffectSource::new(SourceKind::Path, kind.as_ref(), &path.name, "Path")
                    .with_description(format!("{points} point(s) allocated")),
                grants: path.bonuses_for(points),
            })
        })
        .collect()
}

fn budget_base(
    input: &CharacterBuildInput,
    env: &RulesEnv<'_>,
    progression: ProgressionTotals,
    final_intelligence: i32,
) -> BudgetBase {
    let ranks = |map: &BTreeMap<String, u8>| -> i32 { map.values().map(|&rank| i32::from(rank)).sum() };

    let language_points_used: i32 = input
        .languages_data
        .iter()
        .filter(|(id, _)| id.as_str() != COMMON_LANGUAGE)
        .map(|(_, entry)| entry.fluency.cost())
        .sum();

    // Unknown trait ids cost nothing.
    let ancestry_points_used: i32 = input
        .selected_trait_ids
        .iter()
        .filter_map(|id| env.traits.ancestry_trait(id))
        .map(|definition| definition.cost)
        .sum();

    let attribute_points_spent: i32 = input
        .base_attributes()
        .iter()
        .map(|(_, value)| value - ATTRIBUTE_FLOOR)
        .sum();

    BudgetBase {
        final_intelligence,
        progression,
        skill_to_trade: to_i32(input.skill_to_trade_conversions),
        trade_to_skill: to_i32(input.trade_to_skill_conversions),
        trade_to_language: to_i32(input.trade_to_language_conversions),
        skill_points_used: ranks(&input.skills_data),
        trade_points_used: ranks(&input.trades_data),
        language_points_used,
        ancestry_points_used,
        attribute_points_spent,
        talents_spent: to_i32(
            input
                .selected_talents
                .values()
                .fold(0u32, |spent, &times| spent.saturating_add(times)),
        ),
        path_points_spent: to_i32(input.path_point_allocations.total()),
    }
}
