//! Layer 4: point economies.
//!
//! ```text
//! skill points      = 5 + Intelligence + Σ gainedSkillPoints + bonus
//! trade points      = 3 + Σ gainedTradePoints + bonus
//! language points   = 2 + bonus
//! ancestry points   = 5 + bonus
//! attribute points  = 12 + Σ gainedAttributePoints + bonus
//! talents           = Σ gainedTalents
//! path points       = Σ gainedPathPoints
//! ```
//!
//! Conversions move points between the background pools:
//!
//! ```text
//! available skill    = skill − skillToTrade + ⌊tradeToSkill / 2⌋
//! available trade    = trade − tradeToSkill + 2·skillToTrade − tradeToLanguage
//! available language = language + 2·tradeToLanguage
//! ```

use super::bonus::{StatBonuses, StatLayer};
use super::to_i32;
use super::breakdown::StatBreakdown;
use crate::effect::Stat;
use crate::env::ProgressionTotals;
use crate::rules::{
    BASE_ANCESTRY_POINTS, BASE_ATTRIBUTE_POINTS, BASE_LANGUAGE_POINTS, BASE_SKILL_POINTS,
    BASE_TRADE_POINTS,
};

/// Spending figures gathered from the build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BudgetBase {
    pub final_intelligence: i32,
    pub progression: ProgressionTotals,
    pub skill_to_trade: i32,
    pub trade_to_skill: i32,
    pub trade_to_language: i32,
    pub skill_points_used: i32,
    pub trade_points_used: i32,
    pub language_points_used: i32,
    pub ancestry_points_used: i32,
    pub attribute_points_spent: i32,
    pub talents_spent: i32,
    pub path_points_spent: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BackgroundPoints {
    pub base_skill_points: i32,
    pub base_trade_points: i32,
    pub base_language_points: i32,
    pub available_skill_points: i32,
    pub available_trade_points: i32,
    pub available_language_points: i32,
    pub skill_points_used: i32,
    pub trade_points_used: i32,
    pub language_points_used: i32,
    pub skill_points_remaining: i32,
    pub trade_points_remaining: i32,
    pub language_points_remaining: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AncestryPoints {
    pub base_points: i32,
    pub used_points: i32,
    pub remaining_points: i32,
}

/// Budgets unlocked by levelling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LevelBudgets {
    pub total_attribute_points: i32,
    pub spent_attribute_points: i32,
    pub remaining_attribute_points: i32,
    pub total_talents: i32,
    pub spent_talents: i32,
    pub total_path_points: i32,
    pub spent_path_points: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointBudgets {
    pub background: BackgroundPoints,
    pub ancestry: AncestryPoints,
    pub level: LevelBudgets,
    pub breakdowns: Vec<(String, StatBreakdown)>,
}

impl StatLayer for PointBudgets {
    type Base = BudgetBase;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &StatBonuses) -> Self::Final {
        let progression = &base.progression;
        let pool = |stat: Stat, value: i32| {
            StatBreakdown::compute(stat.as_ref(), value, bonuses.stat(stat).iter().cloned())
        };

        let skill = pool(
            Stat::SkillPoints,
            BASE_SKILL_POINTS + base.final_intelligence + to_i32(progression.skill_points),
        );
        let trade = pool(Stat::TradePoints, BASE_TRADE_POINTS + to_i32(progression.trade_points));
        let language = pool(Stat::LanguagePoints, BASE_LANGUAGE_POINTS);
        let ancestry = pool(Stat::AncestryPoints, BASE_ANCESTRY_POINTS);
        let attribute = pool(
            Stat::AttributePoints,
            BASE_ATTRIBUTE_POINTS + to_i32(progression.attribute_points),
        );

        // Conversion counts are caller-supplied; saturate rather than wrap.
        let available_skill = skill
            .total
            .saturating_sub(base.skill_to_trade)
            .saturating_add(base.trade_to_skill / 2);
        let available_trade = trade
            .total
            .saturating_sub(base.trade_to_skill)
            .saturating_add(base.skill_to_trade.saturating_mul(2))
            .saturating_sub(base.trade_to_language);
        let available_language = language
            .total
            .saturating_add(base.trade_to_language.saturating_mul(2));

        let background = BackgroundPoints {
            base_skill_points: skill.total,
            base_trade_points: trade.total,
            base_language_points: language.total,
            available_skill_points: available_skill,
            available_trade_points: available_trade,
            available_language_points: available_language,
            skill_points_used: base.skill_points_used,
            trade_points_used: base.trade_points_used,
            language_points_used: base.language_points_used,
            skill_points_remaining: available_skill.saturating_sub(base.skill_points_used),
            trade_points_remaining: available_trade.saturating_sub(base.trade_points_used),
            language_points_remaining: available_language.saturating_sub(base.language_points_used),
        };

        let ancestry_points = AncestryPoints {
            base_points: ancestry.total,
            used_points: base.ancestry_points_used,
            remaining_points: ancestry.total - base.ancestry_points_used,
        };

        let level = LevelBudgets {
            total_attribute_points: attribute.total,
            spent_attribute_points: base.attribute_points_spent,
            remaining_attribute_points: attribute.total - base.attribute_points_spent,
            total_talents: to_i32(progression.talents),
            spent_talents: base.talents_spent,
            total_path_points: to_i32(progression.path_points),
            spent_path_points: base.path_points_spent,
        };

        Self {
            background,
            ancestry: ancestry_points,
            level,
            breakdowns: [attribute, skill, trade, language, ancestry]
                .into_iter()
                .map(|breakdown| (breakdown.stat_name.clone(), breakdown))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_pools_follow_intelligence_and_progression() {
        let base = BudgetBase {
            final_intelligence: 2,
            progression: ProgressionTotals {
                skill_points: 1,
                trade_points: 1,
                attribute_points: 2,
                talents: 1,
                path_points: 1,
                ..ProgressionTotals::default()
            },
            skill_points_used: 4,
            attribute_points_spent: 10,
            ..BudgetBase::default()
        };
        let budgets = PointBudgets::from_base(&base);

        assert_eq!(budgets.background.base_skill_points, 8);
        assert_eq!(budgets.background.skill_points_remaining, 4);
        assert_eq!(budgets.background.base_trade_points, 4);
        assert_eq!(budgets.background.base_language_points, 2);
        assert_eq!(budgets.ancestry.base_points, 5);
        assert_eq!(budgets.level.total_attribute_points, 14);
        assert_eq!(budgets.level.remaining_attribute_points, 4);
        assert_eq!(budgets.level.total_talents, 1);
        assert_eq!(budgets.level.total_path_points, 1);
    }

    #[test]
    fn conversions_move_points_between_pools() {
        let base = BudgetBase {
            skill_to_trade: 1,
            trade_to_skill: 2,
            trade_to_language: 1,
            ..BudgetBase::default()
        };
        let background = PointBudgets::from_base(&base).background;

        // skill: 5 - 1 + 1
        assert_eq!(background.available_skill_points, 5);
        // trade: 3 - 2 + 2 - 1
        assert_eq!(background.available_trade_points, 2);
        // language: 2 + 2
        assert_eq!(background.available_language_points, 4);
    }
}
