//! Provenance for aggregated effects.

use core::fmt;
use core::str::FromStr;

use super::Effect;

/// Where an effect came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SourceKind {
    Trait,
    ClassFeature,
    Choice,
    SubclassFeature,
    Talent,
    MulticlassFeature,
    Path,
}

/// Display-ready description of an effect's origin.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSource {
    pub kind: SourceKind,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
}

impl EffectSource {
    pub fn new(
        kind: SourceKind,
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            description: None,
            category: category.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.description = Some(description);
        }
        self
    }
}

/// Identifies one effect slot that waits on a player choice.
///
/// Serialized as `"{owner}-{index}"` where `owner` is the id of the record
/// declaring the effect list and `index` the effect's position in it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChoiceKey {
    pub owner: String,
    pub index: usize,
}

impl ChoiceKey {
    pub fn new(owner: impl Into<String>, index: usize) -> Self {
        Self {
            owner: owner.into(),
            index,
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.owner, self.index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed choice key '{0}', expected '{{owner}}-{{index}}'")]
pub struct ChoiceKeyError(pub String);

impl FromStr for ChoiceKey {
    type Err = ChoiceKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (owner, index) = raw
            .rsplit_once('-')
            .ok_or_else(|| ChoiceKeyError(raw.to_string()))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| ChoiceKeyError(raw.to_string()))?;
        if owner.is_empty() {
            return Err(ChoiceKeyError(raw.to_string()));
        }
        Ok(Self::new(owner, index))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ChoiceKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ChoiceKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An effect tagged with its source and resolution state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AttributedEffect {
    pub effect: Effect,
    pub source: EffectSource,
    /// False while the effect waits on a player choice. Unresolved effects
    /// never contribute to totals.
    pub resolved: bool,
    /// The player's choice substituted into the target.
    pub resolved_value: Option<String>,
    /// Present for every effect whose target was a placeholder.
    pub choice_key: Option<ChoiceKey>,
}

impl AttributedEffect {
    pub fn new(effect: Effect, source: EffectSource, choice_key: ChoiceKey) -> Self {
        let needs_choice = effect.kind.requires_choice();
        Self {
            effect,
            source,
            resolved: !needs_choice,
            resolved_value: None,
            choice_key: needs_choice.then_some(choice_key),
        }
    }
}
