//! Effect kinds as a closed sum type.
//!
//! Every consumer dispatches with an exhaustive `match`, so adding a kind
//! forces each stage to decide how to handle it.

use core::fmt;

use crate::stats::Attribute;

/// Either a concrete target or a placeholder the player fills in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target<T> {
    Fixed(T),
    /// Resolved from the player's recorded choice. An empty `options` list
    /// accepts any value of the target type; skills and trades must still
    /// exist in the catalog.
    Choice {
        prompt: String,
        #[cfg_attr(feature = "serde", serde(default))]
        options: Vec<String>,
    },
}

impl<T> Target<T> {
    pub fn fixed(&self) -> Option<&T> {
        match self {
            Self::Fixed(value) => Some(value),
            Self::Choice { .. } => None,
        }
    }

    pub const fn is_choice(&self) -> bool {
        matches!(self, Self::Choice { .. })
    }
}

/// Named derived stats an effect can adjust.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Stat {
    Pd,
    Ad,
    Pdr,
    HpMax,
    SpMax,
    MpMax,
    MoveSpeed,
    JumpDistance,
    SaveDc,
    DeathThreshold,
    GritPoints,
    Initiative,
    AttributePoints,
    SkillPoints,
    TradePoints,
    LanguagePoints,
    AncestryPoints,
    ManeuversKnown,
    TechniquesKnown,
    CantripsKnown,
    SpellsKnown,
}

impl Stat {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pd => "PD",
            Self::Ad => "AD",
            Self::Pdr => "PDR",
            Self::HpMax => "HP",
            Self::SpMax => "SP",
            Self::MpMax => "MP",
            Self::MoveSpeed => "Move Speed",
            Self::JumpDistance => "Jump Distance",
            Self::SaveDc => "Save DC",
            Self::DeathThreshold => "Death Threshold",
            Self::GritPoints => "Grit Points",
            Self::Initiative => "Initiative",
            Self::AttributePoints => "Attribute Points",
            Self::SkillPoints => "Skill Points",
            Self::TradePoints => "Trade Points",
            Self::LanguagePoints => "Language Points",
            Self::AncestryPoints => "Ancestry Points",
            Self::ManeuversKnown => "Maneuvers Known",
            Self::TechniquesKnown => "Techniques Known",
            Self::CantripsKnown => "Cantrips Known",
            Self::SpellsKnown => "Spells Known",
        }
    }
}

/// What an effect does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    ModifyAttribute { target: Target<Attribute>, value: i32 },
    ModifyStat { target: Stat, value: i32 },
    /// Raises the mastery ceiling of one skill by a rank.
    GrantSkillExpertise { target: Target<String> },
    /// Raises the mastery ceiling of one trade by a rank.
    GrantTradeExpertise { target: Target<String> },
    GrantImmunity { condition: String },
    GrantResistance { target: String },
    GrantVulnerability { target: String },
    GrantAdvantageSave { target: Attribute },
    GrantAbility { name: String, description: String },
}

impl EffectKind {
    /// True while the target is still a placeholder.
    pub const fn requires_choice(&self) -> bool {
        match self {
            Self::ModifyAttribute { target, .. } => target.is_choice(),
            Self::GrantSkillExpertise { target } | Self::GrantTradeExpertise { target } => {
                target.is_choice()
            }
            Self::ModifyStat { .. }
            | Self::GrantImmunity { .. }
            | Self::GrantResistance { .. }
            | Self::GrantVulnerability { .. }
            | Self::GrantAdvantageSave { .. }
            | Self::GrantAbility { .. } => false,
        }
    }

    /// Prompt and allowed options of an unresolved placeholder.
    pub fn choice_prompt(&self) -> Option<(&str, &[String])> {
        match self {
            Self::ModifyAttribute {
                target: Target::Choice { prompt, options },
                ..
            }
            | Self::GrantSkillExpertise {
                target: Target::Choice { prompt, options },
            }
            | Self::GrantTradeExpertise {
                target: Target::Choice { prompt, options },
            } => Some((prompt.as_str(), options.as_slice())),
            _ => None,
        }
    }
}

fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModifyAttribute { target, value } => match target {
                Target::Fixed(attribute) => write!(f, "{} {}", signed(*value), attribute.label()),
                Target::Choice { .. } => write!(f, "{} to a chosen attribute", signed(*value)),
            },
            Self::ModifyStat { target, value } => write!(f, "{} {}", signed(*value), target.label()),
            Self::GrantSkillExpertise { target } => match target {
                Target::Fixed(skill) => write!(f, "Skill expertise: {skill}"),
                Target::Choice { .. } => f.write_str("Skill expertise in a chosen skill"),
            },
            Self::GrantTradeExpertise { target } => match target {
                Target::Fixed(trade) => write!(f, "Trade expertise: {trade}"),
                Target::Choice { .. } => f.write_str("Trade expertise in a chosen trade"),
            },
            Self::GrantImmunity { condition } => write!(f, "Immunity: {condition}"),
            Self::GrantResistance { target } => write!(f, "Resistance: {target}"),
            Self::GrantVulnerability { target } => write!(f, "Vulnerability: {target}"),
            Self::GrantAdvantageSave { target } => {
                write!(f, "Advantage on {} saves", target.label())
            }
            Self::GrantAbility { name, .. } => write!(f, "Ability: {name}"),
        }
    }
}

/// A single declarative rule modification attached to a trait, feature,
/// option or talent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    /// Effects gated on a condition count toward `conditional_total` only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            condition: None,
            description: None,
        }
    }

    pub fn modify_attribute(attribute: Attribute, value: i32) -> Self {
        Self::new(EffectKind::ModifyAttribute {
            target: Target::Fixed(attribute),
            value,
        })
    }

    pub fn modify_stat(stat: Stat, value: i32) -> Self {
        Self::new(EffectKind::ModifyStat {
            target: stat,
            value,
        })
    }

    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Authored description, or a generated one.
    pub fn describe(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| self.kind.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_placeholder_targets_require_choice() {
        let chosen = EffectKind::ModifyAttribute {
            target: Target::Choice {
                prompt: "Choose an attribute".into(),
                options: vec![],
            },
            value: 1,
        };
        assert!(chosen.requires_choice());
        assert_eq!(chosen.choice_prompt().map(|(p, _)| p), Some("Choose an attribute"));

        assert!(!Effect::modify_attribute(Attribute::Might, 1).kind.requires_choice());
        assert!(!Effect::modify_stat(Stat::Pd, 1).kind.requires_choice());
    }

    #[test]
    fn describes_effects() {
        assert_eq!(Effect::modify_attribute(Attribute::Agility, 1).describe(), "+1 Agility");
        assert_eq!(Effect::modify_stat(Stat::MoveSpeed, -1).describe(), "-1 Move Speed");
        assert_eq!(Stat::HpMax.to_string(), "hpMax");
        assert_eq!("moveSpeed".parse::<Stat>(), Ok(Stat::MoveSpeed));
    }
}
