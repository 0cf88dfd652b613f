//! Layer 2: defenses, saves and movement.
//!
//! Pure functions of the final attributes, level and stat modifiers.
//! Manual overrides replace the computed defense outright, breakdown
//! included.

use std::collections::BTreeMap;

use super::bonus::{StatBonuses, StatLayer};
use super::breakdown::StatBreakdown;
use super::{Attribute, AttributeScores};
use crate::effect::Stat;
use crate::rules::{self, BASE_DEFENSE, BASE_GRIT_POINTS, BASE_MOVE_SPEED, BASE_SAVE_DC};

/// Inputs for the derived layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedBase {
    pub level: u32,
    /// Final (effect-adjusted) attributes.
    pub attributes: AttributeScores,
    pub manual_pd: Option<i32>,
    pub manual_ad: Option<i32>,
    pub manual_pdr: Option<i32>,
}

impl DerivedBase {
    fn manual(&self, stat: Stat) -> Option<i32> {
        match stat {
            Stat::Pd => self.manual_pd,
            Stat::Ad => self.manual_ad,
            Stat::Pdr => self.manual_pdr,
            _ => None,
        }
    }
}

/// Save bonus for one attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveBonus {
    pub bonus: i32,
    pub advantage: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedStats {
    pub combat_mastery: i32,
    pub prime_attribute: Attribute,
    pub prime_value: i32,
    pub pd: i32,
    pub ad: i32,
    pub pdr: i32,
    pub save_dc: i32,
    pub death_threshold: i32,
    pub move_speed: i32,
    pub jump_distance: i32,
    pub grit_points: i32,
    pub initiative: i32,
    pub saves: BTreeMap<Attribute, SaveBonus>,
    pub breakdowns: Vec<(String, StatBreakdown)>,
}

impl DerivedStats {
    /// Base values before stat modifiers.
    ///
    /// - PD: 8 + CM + Agility + Intelligence
    /// - AD: 8 + CM + Might + Charisma
    /// - Save DC: 8 + CM + Prime
    /// - Death threshold: Prime + CM
    /// - Grit: 2 + Charisma
    /// - Initiative: CM + Agility
    /// - Jump distance: Agility
    fn stat_bases(cm: i32, prime: i32, attrs: &AttributeScores) -> [(Stat, i32); 9] {
        [
            (Stat::Pd, BASE_DEFENSE + cm + attrs.agility + attrs.intelligence),
            (Stat::Ad, BASE_DEFENSE + cm + attrs.might + attrs.charisma),
            (Stat::Pdr, 0),
            (Stat::SaveDc, BASE_SAVE_DC + cm + prime),
            (Stat::DeathThreshold, prime + cm),
            (Stat::MoveSpeed, BASE_MOVE_SPEED),
            (Stat::JumpDistance, attrs.agility),
            (Stat::GritPoints, BASE_GRIT_POINTS + attrs.charisma),
            (Stat::Initiative, cm + attrs.agility),
        ]
    }
}

impl StatLayer for DerivedStats {
    type Base = DerivedBase;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &StatBonuses) -> Self::Final {
        let cm = rules::combat_mastery(base.level);
        let (prime_attribute, prime_value) = base.attributes.prime();

        let mut totals = BTreeMap::new();
        let mut breakdowns = Vec::new();
        for (stat, stat_base) in Self::stat_bases(cm, prime_value, &base.attributes) {
            let breakdown = match base.manual(stat) {
                Some(value) => StatBreakdown::flat(stat.as_ref(), value),
                None => StatBreakdown::compute(stat.as_ref(), stat_base, bonuses.stat(stat).iter().cloned()),
            };
            totals.insert(stat, breakdown.total);
            breakdowns.push((stat.to_string(), breakdown));
        }
        let total = |stat: Stat| totals.get(&stat).copied().unwrap_or(0);

        let saves = base
            .attributes
            .iter()
            .map(|(attribute, value)| {
                let save = SaveBonus {
                    bonus: value + cm,
                    advantage: bonuses.grants.advantage_saves.contains(&attribute),
                };
                breakdowns.push((
                    format!("{attribute}Save"),
                    StatBreakdown::flat(format!("{} Save", attribute.label()), save.bonus),
                ));
                (attribute, save)
            })
            .collect();

        Self {
            combat_mastery: cm,
            prime_attribute,
            prime_value,
            pd: total(Stat::Pd),
            ad: total(Stat::Ad),
            pdr: total(Stat::Pdr),
            save_dc: total(Stat::SaveDc),
            death_threshold: total(Stat::DeathThreshold),
            move_speed: total(Stat::MoveSpeed),
            jump_distance: total(Stat::JumpDistance),
            grit_points: total(Stat::GritPoints).max(0),
            initiative: total(Stat::Initiative),
            saves,
            breakdowns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{AttributedEffect, ChoiceKey, Effect, EffectKind, EffectSource, SourceKind};

    fn base(level: u32, attributes: AttributeScores) -> DerivedBase {
        DerivedBase {
            level,
            attributes,
            manual_pd: None,
            manual_ad: None,
            manual_pdr: None,
        }
    }

    #[test]
    fn computes_core_formulas() {
        let stats = DerivedStats::from_base(&base(3, AttributeScores::new(2, 1, -1, 0)));

        assert_eq!(stats.combat_mastery, 2);
        assert_eq!(stats.prime_value, 2);
        assert_eq!(stats.prime_attribute, Attribute::Might);
        assert_eq!(stats.pd, 8 + 2 + 1);
        assert_eq!(stats.ad, 8 + 2 + 2 - 1);
        assert_eq!(stats.pdr, 0);
        assert_eq!(stats.save_dc, 12);
        assert_eq!(stats.death_threshold, 4);
        assert_eq!(stats.move_speed, 5);
        assert_eq!(stats.jump_distance, 1);
        assert_eq!(stats.grit_points, 1);
        assert_eq!(stats.initiative, 3);
        assert_eq!(stats.saves[&Attribute::Charisma].bonus, 1);
    }

    #[test]
    fn grit_points_never_go_negative() {
        let stats = DerivedStats::from_base(&base(1, AttributeScores::new(0, 0, -2, 0)));
        assert_eq!(stats.grit_points, 0);
    }

    #[test]
    fn manual_overrides_replace_defenses() {
        let mut input = base(1, AttributeScores::default());
        input.manual_pd = Some(15);
        input.manual_pdr = Some(1);
        let stats = DerivedStats::from_base(&input);

        assert_eq!(stats.pd, 15);
        assert_eq!(stats.ad, 9);
        assert_eq!(stats.pdr, 1);

        let breakdown = |name: &str| {
            stats
                .breakdowns
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, breakdown)| breakdown.clone())
                .unwrap()
        };
        let pd = breakdown("pd");
        assert_eq!((pd.base, pd.total, pd.conditional_total), (15, 15, 15));
        assert!(pd.effects.is_empty());
        assert_eq!(breakdown("pdr").total, 1);
        assert_eq!(breakdown("ad").total, stats.ad);
    }

    #[test]
    fn stat_modifiers_and_advantage_apply() {
        let source = EffectSource::new(SourceKind::Trait, "t", "Trait", "Selected Trait");
        let effects = [
            AttributedEffect::new(Effect::modify_stat(Stat::MoveSpeed, 1), source.clone(), ChoiceKey::new("t", 0)),
            AttributedEffect::new(
                Effect::new(EffectKind::GrantAdvantageSave {
                    target: Attribute::Might,
                }),
                source,
                ChoiceKey::new("t", 1),
            ),
        ];
        let stats = DerivedStats::compute(&base(1, AttributeScores::default()), &StatBonuses::collect(&effects));

        assert_eq!(stats.move_speed, 6);
        assert!(stats.saves[&Attribute::Might].advantage);
        assert!(!stats.saves[&Attribute::Agility].advantage);
    }
}
