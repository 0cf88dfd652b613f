//! Layer 3: resource pools and known-ability counts.
//!
//! Formulas:
//! - HP_max = Σ gainedHealth(1..=level) + bonus
//! - SP_max = Σ gainedStaminaPoints(1..=level) + path stamina + bonus
//! - MP_max = Σ gainedManaPoints(1..=level) + path mana + bonus
//! - Rest points = HP_max
//! - Known counts = class progression + path levels + bonus
//!
//! A class without a complete progression table contributes zero here; the
//! validator reports the gap.

use super::bonus::{StatBonuses, StatLayer};
use super::to_i32;
use super::breakdown::{Contribution, StatBreakdown};
use crate::effect::{EffectSource, Stat};
use crate::env::{PathLevel, ProgressionTotals};

/// One allocated path and what its levels grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathShare {
    pub source: EffectSource,
    pub grants: PathLevel,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceBase {
    pub progression: ProgressionTotals,
    pub paths: Vec<PathShare>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePools {
    pub hp_max: i32,
    pub sp_max: i32,
    pub mp_max: i32,
    pub rest_points: i32,
    pub maneuvers_known: i32,
    pub techniques_known: i32,
    pub cantrips_known: i32,
    pub spells_known: i32,
    pub breakdowns: Vec<(String, StatBreakdown)>,
}

impl ResourcePools {
    fn pool(
        stat: Stat,
        base: u32,
        paths: &[PathShare],
        path_value: fn(&PathLevel) -> u32,
        bonuses: &StatBonuses,
    ) -> StatBreakdown {
        let path_contributions = paths.iter().filter_map(|share| {
            let value = path_value(&share.grants);
            (value > 0).then(|| {
                Contribution::new(
                    share.source.clone(),
                    to_i32(value),
                    format!("+{value} {} from {}", stat.label(), share.source.name),
                )
            })
        });

        StatBreakdown::compute(
            stat.as_ref(),
            to_i32(base),
            path_contributions.chain(bonuses.stat(stat).iter().cloned()),
        )
    }
}

impl StatLayer for ResourcePools {
    type Base = ResourceBase;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &StatBonuses) -> Self::Final {
        let progression = &base.progression;
        let paths = base.paths.as_slice();

        let hp = Self::pool(Stat::HpMax, progression.health, paths, |_| 0, bonuses);
        let sp = Self::pool(
            Stat::SpMax,
            progression.stamina_points,
            paths,
            |p| p.stamina_points,
            bonuses,
        );
        let mp = Self::pool(
            Stat::MpMax,
            progression.mana_points,
            paths,
            |p| p.mana_points,
            bonuses,
        );
        let maneuvers = Self::pool(
            Stat::ManeuversKnown,
            progression.maneuvers_known,
            paths,
            |p| p.maneuvers_known,
            bonuses,
        );
        let techniques = Self::pool(
            Stat::TechniquesKnown,
            progression.techniques_known,
            paths,
            |p| p.techniques_known,
            bonuses,
        );
        let cantrips = Self::pool(
            Stat::CantripsKnown,
            progression.cantrips_known,
            paths,
            |p| p.cantrips_known,
            bonuses,
        );
        let spells = Self::pool(
            Stat::SpellsKnown,
            progression.spells_known,
            paths,
            |p| p.spells_known,
            bonuses,
        );

        let rest = StatBreakdown::flat("restPoints", hp.total);

        Self {
            hp_max: hp.total,
            sp_max: sp.total,
            mp_max: mp.total,
            rest_points: rest.total,
            maneuvers_known: maneuvers.total,
            techniques_known: techniques.total,
            cantrips_known: cantrips.total,
            spells_known: spells.total,
            breakdowns: [hp, sp, mp, rest, maneuvers, techniques, cantrips, spells]
                .into_iter()
                .map(|breakdown| (breakdown.stat_name.clone(), breakdown))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::SourceKind;

    fn martial(grants: PathLevel) -> PathShare {
        PathShare {
            source: EffectSource::new(SourceKind::Path, "martial", "Martial Path", "Path"),
            grants,
        }
    }

    #[test]
    fn sums_progression_and_paths() {
        let base = ResourceBase {
            progression: ProgressionTotals {
                health: 12,
                stamina_points: 2,
                maneuvers_known: 5,
                techniques_known: 2,
                ..ProgressionTotals::default()
            },
            paths: vec![martial(PathLevel {
                stamina_points: 1,
                maneuvers_known: 2,
                techniques_known: 1,
                ..PathLevel::default()
            })],
        };
        let pools = ResourcePools::from_base(&base);

        assert_eq!(pools.hp_max, 12);
        assert_eq!(pools.rest_points, 12);
        assert_eq!(pools.sp_max, 3);
        assert_eq!(pools.mp_max, 0);
        assert_eq!(pools.maneuvers_known, 7);
        assert_eq!(pools.techniques_known, 3);

        let (_, sp) = pools
            .breakdowns
            .iter()
            .find(|(name, _)| name == "spMax")
            .unwrap();
        assert_eq!(sp.base, 2);
        assert_eq!(sp.effects.len(), 1);
        assert_eq!(sp.effects[0].source.kind, SourceKind::Path);
    }

    #[test]
    fn missing_progression_contributes_zero() {
        let pools = ResourcePools::from_base(&ResourceBase::default());
        assert_eq!(pools.hp_max, 0);
        assert_eq!(pools.sp_max, 0);
    }
}
