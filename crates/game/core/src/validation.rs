//! Validation report types.
//!
//! Budget overruns, cap violations and unresolved choices are data, not
//! errors: the engine always returns a full result and the caller blocks on
//! [`ValidationResult::is_valid`].

use std::collections::BTreeMap;

use crate::rules::{ADEPT_RANK, ATTRIBUTE_FLOOR, MAX_MASTERY_RANK};
use crate::stats::Attribute;

/// Builder wizard step an issue belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BuildStep {
    Class,
    Ancestry,
    Attributes,
    Background,
    Leveling,
}

/// Stable machine-readable issue codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum IssueCode {
    PointsOverbudget,
    MasteryLimitExceeded,
    AttributeBelowMinimum,
    TraitPrerequisiteUnmet,
    TalentLimitExceeded,
    MissingProgression,
    ChoiceUnresolved,
    PointsUnspent,
    TraitAncestryMismatch,
    UnknownAncestry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationIssue {
    pub step: BuildStep,
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(step: BuildStep, field: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            step,
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// Where one attribute sits relative to its level cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AttributeLimit {
    pub current: i32,
    pub base: i32,
    pub trait_bonuses: i32,
    pub max: i32,
    pub exceeded: bool,
    pub can_increase: bool,
    pub can_decrease: bool,
}

impl AttributeLimit {
    /// `current` is the final value; `base` is the player-entered one. The
    /// floor applies to `base` only.
    pub fn new(base: i32, trait_bonuses: i32, max: i32) -> Self {
        let current = base + trait_bonuses;
        Self {
            current,
            base,
            trait_bonuses,
            max,
            exceeded: current > max,
            can_increase: current < max,
            can_decrease: base > ATTRIBUTE_FLOOR,
        }
    }
}

/// Mastery ceiling for one skill or trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MasteryLimit {
    pub current: u8,
    pub max: u8,
    pub can_select_adept: bool,
    pub exceeded: bool,
}

impl MasteryLimit {
    /// Each expertise grant raises the level cap by one rank, up to the
    /// absolute maximum.
    pub fn new(current: u8, level_cap: u8, expertise: u8) -> Self {
        let max = level_cap.saturating_add(expertise).min(MAX_MASTERY_RANK);
        Self {
            current,
            max,
            can_select_adept: max >= ADEPT_RANK,
            exceeded: current > max,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MasteryLimits {
    /// Level cap before expertise grants.
    pub max_skill_mastery: u8,
    pub max_trade_mastery: u8,
    pub skills: BTreeMap<String, MasteryLimit>,
    pub trades: BTreeMap<String, MasteryLimit>,
}

impl MasteryLimits {
    pub fn skill(&self, id: &str) -> Option<&MasteryLimit> {
        self.skills.get(id)
    }

    pub fn trade(&self, id: &str) -> Option<&MasteryLimit> {
        self.trades.get(id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub attribute_limits: BTreeMap<Attribute, AttributeLimit>,
    pub mastery_limits: MasteryLimits,
}

impl ValidationResult {
    /// Assembles the report; valid iff there are no errors and no attribute
    /// exceeds its cap.
    pub fn new(
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationIssue>,
        attribute_limits: BTreeMap<Attribute, AttributeLimit>,
        mastery_limits: MasteryLimits,
    ) -> Self {
        let is_valid = errors.is_empty() && !attribute_limits.values().any(|limit| limit.exceeded);
        Self {
            is_valid,
            errors,
            warnings,
            attribute_limits,
            mastery_limits,
        }
    }

    pub fn has_error(&self, code: IssueCode) -> bool {
        self.errors.iter().any(|issue| issue.code == code)
    }

    pub fn has_warning(&self, code: IssueCode) -> bool {
        self.warnings.iter().any(|issue| issue.code == code)
    }

    /// Errors blocking one wizard step.
    pub fn errors_for(&self, step: BuildStep) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().filter(move |issue| issue.step == step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_floor_only_blocks_decrease_at_minus_two() {
        assert!(!AttributeLimit::new(-2, 0, 3).can_decrease);
        assert!(!AttributeLimit::new(-2, 1, 3).can_decrease);
        assert!(AttributeLimit::new(-1, 0, 3).can_decrease);
    }

    #[test]
    fn attribute_limit_flags_overflow() {
        let limit = AttributeLimit::new(3, 1, 3);
        assert_eq!(limit.current, 4);
        assert!(limit.exceeded);
        assert!(!limit.can_increase);
    }

    #[test]
    fn expertise_unlocks_adept() {
        assert!(!MasteryLimit::new(0, 1, 0).can_select_adept);
        assert!(MasteryLimit::new(0, 1, 1).can_select_adept);
        assert!(MasteryLimit::new(2, 1, 0).exceeded);
        assert_eq!(MasteryLimit::new(0, 3, 9).max, MAX_MASTERY_RANK);
    }

    #[test]
    fn exceeded_attribute_invalidates_without_errors() {
        let limits = BTreeMap::from([(Attribute::Might, AttributeLimit::new(4, 0, 3))]);
        let result = ValidationResult::new(vec![], vec![], limits, MasteryLimits::default());
        assert!(!result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn issue_codes_render_screaming_snake_case() {
        assert_eq!(IssueCode::PointsOverbudget.to_string(), "POINTS_OVERBUDGET");
        assert_eq!(BuildStep::Leveling.as_ref(), "leveling");
    }
}
