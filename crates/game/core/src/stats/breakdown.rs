//! Attributed stat totals.
//!
//! Every synthesized stat is reported as a [`StatBreakdown`]: a base value,
//! the list of contributions that moved it, and two totals.
//!
//! ```text
//! total             = base + Σ unconditional contributions
//! conditional_total = base + Σ every contribution
//! ```
//!
//! The split lets a sheet show "what you have now" next to "what you could
//! have while a condition holds".

use crate::effect::EffectSource;

/// One source's share of a stat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Contribution {
    pub source: EffectSource,
    pub value: i32,
    pub condition: Option<String>,
    pub description: String,
    /// False for conditional contributions.
    pub is_active: bool,
}

impl Contribution {
    /// An always-on contribution.
    pub fn new(source: EffectSource, value: i32, description: impl Into<String>) -> Self {
        Self {
            source,
            value,
            condition: None,
            description: description.into(),
            is_active: true,
        }
    }

    /// Gates the contribution on a condition, which also deactivates it.
    pub fn gated(mut self, condition: Option<String>) -> Self {
        self.is_active = condition.is_none();
        self.condition = condition;
        self
    }
}

/// A stat decomposed into its base and contributing sources.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatBreakdown {
    pub stat_name: String,
    pub base: i32,
    pub effects: Vec<Contribution>,
    pub total: i32,
    pub conditional_total: i32,
}

impl StatBreakdown {
    /// Computes both totals from a base and its contributions.
    pub fn compute(
        stat_name: impl Into<String>,
        base: i32,
        effects: impl IntoIterator<Item = Contribution>,
    ) -> Self {
        let effects: Vec<Contribution> = effects.into_iter().collect();
        let active: i32 = effects.iter().filter(|c| c.is_active).map(|c| c.value).sum();
        let all: i32 = effects.iter().map(|c| c.value).sum();

        Self {
            stat_name: stat_name.into(),
            base,
            total: base + active,
            conditional_total: base + all,
            effects,
        }
    }

    /// A breakdown with no contributions.
    pub fn flat(stat_name: impl Into<String>, base: i32) -> Self {
        Self::compute(stat_name, base, [])
    }

    /// Sum of the active contributions alone.
    pub fn bonus(&self) -> i32 {
        self.total - self.base
    }
}
