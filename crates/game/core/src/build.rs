//! The character-in-progress handed to the engine by the caller.
//!
//! Field names follow the camelCase wire shape the builder UI stores, and
//! every optional collection defaults to empty so stale or partial drafts
//! still deserialize.

use std::collections::BTreeMap;

use crate::rules::COMMON_LANGUAGE;
use crate::stats::{Attribute, AttributeScores};

/// Selected option(s) for one feature choice block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FeatureSelection {
    One(String),
    Many(Vec<String>),
}

impl FeatureSelection {
    /// Whether the named option is selected.
    pub fn includes(&self, option: &str) -> bool {
        match self {
            Self::One(selected) => selected == option,
            Self::Many(selected) => selected.iter().any(|s| s == option),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Fluency {
    Limited,
    Fluent,
}

impl Fluency {
    /// Language points this fluency costs.
    pub const fn cost(&self) -> i32 {
        match self {
            Self::Limited => 1,
            Self::Fluent => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageEntry {
    pub fluency: Fluency,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathPointAllocations {
    pub martial: u32,
    pub spellcasting: u32,
}

impl PathPointAllocations {
    pub const fn total(&self) -> u32 {
        self.martial.saturating_add(self.spellcasting)
    }
}

fn default_languages() -> BTreeMap<String, LanguageEntry> {
    BTreeMap::from([(
        COMMON_LANGUAGE.to_string(),
        LanguageEntry {
            fluency: Fluency::Fluent,
        },
    )])
}

/// A character-in-progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CharacterBuildInput {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    pub level: i32,
    pub attribute_might: i32,
    pub attribute_agility: i32,
    pub attribute_charisma: i32,
    pub attribute_intelligence: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ancestry1_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ancestry2_id: Option<String>,
    /// Trait ids in selection order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected_trait_ids: Vec<String>,
    /// Choice key (`"{owner}-{index}"`) to the chosen value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected_trait_choices: BTreeMap<String, String>,
    /// Feature choice id to the selected option name(s).
    #[cfg_attr(feature = "serde", serde(default, alias = "featureChoices"))]
    pub selected_feature_choices: BTreeMap<String, FeatureSelection>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills_data: BTreeMap<String, u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trades_data: BTreeMap<String, u8>,
    #[cfg_attr(feature = "serde", serde(default = "default_languages"))]
    pub languages_data: BTreeMap<String, LanguageEntry>,
    /// Talent id to the number of times taken.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected_talents: BTreeMap<String, u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub path_point_allocations: PathPointAllocations,
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected_subclass: Option<String>,
    /// A feature id borrowed from another class.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected_multiclass_feature: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_to_trade_conversions: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trade_to_skill_conversions: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trade_to_language_conversions: u32,
    #[cfg_attr(feature = "serde", serde(default, rename = "manualPD"))]
    pub manual_pd: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default, rename = "manualAD"))]
    pub manual_ad: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default, rename = "manualPDR"))]
    pub manual_pdr: Option<i32>,
}

impl CharacterBuildInput {
    /// A fresh build: all attributes at 0, no selections, common language.
    pub fn new(level: i32, class_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            level,
            attribute_might: 0,
            attribute_agility: 0,
            attribute_charisma: 0,
            attribute_intelligence: 0,
            class_id: Some(class_id.into()),
            ancestry1_id: None,
            ancestry2_id: None,
            selected_trait_ids: Vec::new(),
            selected_trait_choices: BTreeMap::new(),
            selected_feature_choices: BTreeMap::new(),
            skills_data: BTreeMap::new(),
            trades_data: BTreeMap::new(),
            languages_data: default_languages(),
            selected_talents: BTreeMap::new(),
            path_point_allocations: PathPointAllocations::default(),
            selected_subclass: None,
            selected_multiclass_feature: None,
            skill_to_trade_conversions: 0,
            trade_to_skill_conversions: 0,
            trade_to_language_conversions: 0,
            manual_pd: None,
            manual_ad: None,
            manual_pdr: None,
        }
    }

    pub fn with_attributes(mut self, might: i32, agility: i32, charisma: i32, intelligence: i32) -> Self {
        self.attribute_might = might;
        self.attribute_agility = agility;
        self.attribute_charisma = charisma;
        self.attribute_intelligence = intelligence;
        self
    }

    pub fn with_ancestry(mut self, ancestry_id: impl Into<String>) -> Self {
        self.ancestry1_id = Some(ancestry_id.into());
        self
    }

    pub fn with_trait(mut self, trait_id: impl Into<String>) -> Self {
        self.selected_trait_ids.push(trait_id.into());
        self
    }

    pub fn with_trait_choice(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selected_trait_choices.insert(key.into(), value.into());
        self
    }

    pub fn with_feature_choice(mut self, choice_id: impl Into<String>, selection: FeatureSelection) -> Self {
        self.selected_feature_choices.insert(choice_id.into(), selection);
        self
    }

    pub fn with_skill(mut self, skill_id: impl Into<String>, rank: u8) -> Self {
        self.skills_data.insert(skill_id.into(), rank);
        self
    }

    pub fn with_trade(mut self, trade_id: impl Into<String>, rank: u8) -> Self {
        self.trades_data.insert(trade_id.into(), rank);
        self
    }

    pub fn with_language(mut self, language_id: impl Into<String>, fluency: Fluency) -> Self {
        self.languages_data
            .insert(language_id.into(), LanguageEntry { fluency });
        self
    }

    pub fn with_talent(mut self, talent_id: impl Into<String>, times: u32) -> Self {
        self.selected_talents.insert(talent_id.into(), times);
        self
    }

    pub fn with_path_points(mut self, martial: u32, spellcasting: u32) -> Self {
        self.path_point_allocations = PathPointAllocations {
            martial,
            spellcasting,
        };
        self
    }

    /// The attribute values as entered, before effects.
    pub fn base_attributes(&self) -> AttributeScores {
        AttributeScores::new(
            self.attribute_might,
            self.attribute_agility,
            self.attribute_charisma,
            self.attribute_intelligence,
        )
    }

    pub fn base_attribute(&self, attribute: Attribute) -> i32 {
        self.base_attributes().get(attribute)
    }

    pub fn ancestry_ids(&self) -> impl Iterator<Item = &str> {
        self.ancestry1_id
            .iter()
            .chain(self.ancestry2_id.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_selection_matches_single_and_many() {
        assert!(FeatureSelection::One("Urban".into()).includes("Urban"));
        assert!(!FeatureSelection::One("Urban".into()).includes("Forest"));

        let many = FeatureSelection::Many(vec!["Forest".into(), "Urban".into()]);
        assert!(many.includes("Urban"));
        assert!(!many.includes("Desert"));
    }

    #[test]
    fn new_build_speaks_common() {
        let build = CharacterBuildInput::new(1, "hunter");
        assert_eq!(
            build.languages_data.get(COMMON_LANGUAGE).map(|l| l.fluency),
            Some(Fluency::Fluent)
        );
        assert!(build.selected_talents.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_optional_fields_take_defaults() {
        let json = r#"{
            "level": 2,
            "attributeMight": 1,
            "attributeAgility": 0,
            "attributeCharisma": -1,
            "attributeIntelligence": 2,
            "classId": "barbarian",
            "featureChoices": { "rage_style": "Berserker", "favored": ["a", "b"] },
            "manualPD": 14
        }"#;
        let build: CharacterBuildInput = serde_json::from_str(json).unwrap();

        assert_eq!(build.class_id.as_deref(), Some("barbarian"));
        assert_eq!(build.manual_pd, Some(14));
        assert!(build.languages_data.contains_key(COMMON_LANGUAGE));
        assert_eq!(
            build.selected_feature_choices.get("rage_style"),
            Some(&FeatureSelection::One("Berserker".into()))
        );
        assert!(build.selected_feature_choices["favored"].includes("b"));
        assert_eq!(build.path_point_allocations, PathPointAllocations::default());
    }
}
