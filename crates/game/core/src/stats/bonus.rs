//! Collects resolved effects into per-target bonus lists.
//!
//! This is the single dispatch point over [`EffectKind`]: every stat layer
//! reads its contributions from a [`StatBonuses`] instead of inspecting
//! effects directly.

use std::collections::{BTreeMap, BTreeSet};

use super::Attribute;
use super::breakdown::Contribution;
use crate::effect::{AttributedEffect, EffectKind, EffectSource, Stat, Target};

/// An ability granted by a trait, feature or talent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantedAbility {
    pub name: String,
    pub description: String,
    pub source: EffectSource,
}

/// An effect that only applies while its condition holds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalModifier {
    pub condition: String,
    pub description: String,
    pub source: EffectSource,
}

/// Non-numeric grants collected from resolved effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Grants {
    /// Skill id to the number of expertise grants covering it.
    pub skill_expertise: BTreeMap<String, u8>,
    pub trade_expertise: BTreeMap<String, u8>,
    pub immunities: Vec<String>,
    pub resistances: Vec<String>,
    pub vulnerabilities: Vec<String>,
    pub advantage_saves: BTreeSet<Attribute>,
}

impl Grants {
    pub fn skill_expertise(&self, skill_id: &str) -> u8 {
        self.skill_expertise.get(skill_id).copied().unwrap_or(0)
    }

    pub fn trade_expertise(&self, trade_id: &str) -> u8 {
        self.trade_expertise.get(trade_id).copied().unwrap_or(0)
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

/// Resolved effects sorted by what they touch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatBonuses {
    attributes: BTreeMap<Attribute, Vec<Contribution>>,
    stats: BTreeMap<Stat, Vec<Contribution>>,
    pub grants: Grants,
    pub abilities: Vec<GrantedAbility>,
    pub conditional: Vec<ConditionalModifier>,
}

impl StatBonuses {
    /// Builds the index from the resolver's output. Unresolved effects are
    /// skipped entirely.
    pub fn collect<'a>(effects: impl IntoIterator<Item = &'a AttributedEffect>) -> Self {
        let mut bonuses = Self::default();
        for attributed in effects.into_iter().filter(|e| e.resolved) {
            bonuses.add(attributed);
        }
        bonuses
    }

    fn add(&mut self, attributed: &AttributedEffect) {
        let effect = &attributed.effect;
        let source = &attributed.source;

        if let Some(condition) = &effect.condition {
            self.conditional.push(ConditionalModifier {
                condition: condition.clone(),
                description: effect.describe(),
                source: source.clone(),
            });
        }

        let contribution = |value: i32| {
            Contribution::new(source.clone(), value, effect.describe()).gated(effect.condition.clone())
        };

        match &effect.kind {
            EffectKind::ModifyAttribute { target, value } => match target {
                Target::Fixed(attribute) => self
                    .attributes
                    .entry(*attribute)
                    .or_default()
                    .push(contribution(*value)),
                Target::Choice { .. } => {}
            },
            EffectKind::ModifyStat { target, value } => {
                self.stats.entry(*target).or_default().push(contribution(*value))
            }
            EffectKind::GrantSkillExpertise { target } => {
                if let (Target::Fixed(skill), false) = (target, effect.is_conditional()) {
                    *self.grants.skill_expertise.entry(skill.clone()).or_default() += 1;
                }
            }
            EffectKind::GrantTradeExpertise { target } => {
                if let (Target::Fixed(trade), false) = (target, effect.is_conditional()) {
                    *self.grants.trade_expertise.entry(trade.clone()).or_default() += 1;
                }
            }
            EffectKind::GrantImmunity { condition } => {
                push_unique(&mut self.grants.immunities, condition)
            }
            EffectKind::GrantResistance { target } => {
                push_unique(&mut self.grants.resistances, target)
            }
            EffectKind::GrantVulnerability { target } => {
                push_unique(&mut self.grants.vulnerabilities, target)
            }
            EffectKind::GrantAdvantageSave { target } => {
                self.grants.advantage_saves.insert(*target);
            }
            EffectKind::GrantAbility { name, description } => {
                self.abilities.push(GrantedAbility {
                    name: name.clone(),
                    description: description.clone(),
                    source: source.clone(),
                })
            }
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> &[Contribution] {
        self.attributes.get(&attribute).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stat(&self, stat: Stat) -> &[Contribution] {
        self.stats.get(&stat).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of the unconditional contributions to a stat.
    pub fn stat_bonus(&self, stat: Stat) -> i32 {
        self.stat(stat)
            .iter()
            .filter(|c| c.is_active)
            .map(|c| c.value)
            .sum()
    }
}

/// A stat layer following the Base -> Bonuses -> Final pattern.
///
/// ```text
/// Layer 1: AttributeScores      + bonuses -> FinalAttributes
/// Layer 2: DerivedBase          + bonuses -> DerivedStats
/// Layer 3: ResourceBase         + bonuses -> ResourcePools
/// Layer 4: BudgetBase           + bonuses -> PointBudgets
/// ```
pub trait StatLayer {
    type Base;
    type Final;

    fn compute(base: &Self::Base, bonuses: &StatBonuses) -> Self::Final;

    /// Compute with no bonuses.
    fn from_base(base: &Self::Base) -> Self::Final {
        Self::compute(base, &StatBonuses::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{ChoiceKey, Effect, SourceKind};

    fn attributed(effect: Effect) -> AttributedEffect {
        let source = EffectSource::new(SourceKind::Trait, "t", "Trait", "Selected Trait");
        AttributedEffect::new(effect, source, ChoiceKey::new("t", 0))
    }

    #[test]
    fn routes_effects_by_kind() {
        let effects = [
            attributed(Effect::modify_attribute(Attribute::Might, 1)),
            attributed(Effect::modify_stat(Stat::Pd, 2)),
            attributed(Effect::modify_stat(Stat::Pd, 1).when("raging")),
            attributed(Effect::new(EffectKind::GrantSkillExpertise {
                target: Target::Fixed("athletics".into()),
            })),
            attributed(Effect::new(EffectKind::GrantResistance {
                target: "poison".into(),
            })),
            attributed(Effect::new(EffectKind::GrantResistance {
                target: "poison".into(),
            })),
        ];
        let bonuses = StatBonuses::collect(&effects);

        assert_eq!(bonuses.attribute(Attribute::Might).len(), 1);
        assert_eq!(bonuses.stat_bonus(Stat::Pd), 2);
        assert_eq!(bonuses.stat(Stat::Pd).len(), 2);
        assert_eq!(bonuses.grants.skill_expertise("athletics"), 1);
        assert_eq!(bonuses.grants.resistances, vec!["poison".to_string()]);
        assert_eq!(bonuses.conditional.len(), 1);
        assert_eq!(bonuses.conditional[0].condition, "raging");
    }

    #[test]
    fn unresolved_effects_contribute_nothing() {
        let pending = attributed(Effect::new(EffectKind::ModifyAttribute {
            target: Target::Choice {
                prompt: "Choose an attribute".into(),
                options: vec![],
            },
            value: 1,
        }));
        assert!(!pending.resolved);

        let bonuses = StatBonuses::collect([&pending]);
        assert_eq!(bonuses, StatBonuses::default());
    }
}
