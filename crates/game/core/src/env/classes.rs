use crate::effect::Effect;

pub trait ClassOracle: Send + Sync {
    fn class(&self, id: &str) -> Option<&ClassDefinition>;

    fn all_classes(&self) -> &[ClassDefinition];

    /// Finds a feature in any class, for multiclass selections.
    fn find_feature(&self, feature_id: &str) -> Option<(&ClassDefinition, &ClassFeature)> {
        self.all_classes()
            .iter()
            .find_map(|class| class.feature(feature_id).map(|feature| (class, feature)))
    }
}

const fn first_level() -> u32 {
    1
}

/// A class: per-level progression plus its feature catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub progression: Vec<ProgressionLevel>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<ClassFeature>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subclasses: Vec<Subclass>,
}

impl ClassDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_progression(mut self, progression: Vec<ProgressionLevel>) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_feature(mut self, feature: ClassFeature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn with_subclass(mut self, subclass: Subclass) -> Self {
        self.subclasses.push(subclass);
        self
    }

    /// The progression row for one level.
    pub fn progression_at(&self, level: u32) -> Option<&ProgressionLevel> {
        self.progression.iter().find(|row| row.level == level)
    }

    /// Sums progression rows `1..=level`.
    ///
    /// Returns `None` when any of those rows is missing; partially defined
    /// classes are a data gap, not a different formula.
    pub fn progression_through(&self, level: u32) -> Option<ProgressionTotals> {
        (1..=level).try_fold(ProgressionTotals::default(), |totals, lvl| {
            self.progression_at(lvl).map(|row| totals.add(row))
        })
    }

    pub fn subclass(&self, id: &str) -> Option<&Subclass> {
        self.subclasses.iter().find(|subclass| subclass.id == id)
    }

    /// Finds a feature by id among core and subclass features.
    pub fn feature(&self, id: &str) -> Option<&ClassFeature> {
        self.features
            .iter()
            .chain(self.subclasses.iter().flat_map(|s| s.features.iter()))
            .find(|feature| feature.id == id)
    }
}

/// Gains for reaching one level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ProgressionLevel {
    pub level: u32,
    pub gained_health: u32,
    pub gained_stamina_points: u32,
    pub gained_mana_points: u32,
    pub gained_attribute_points: u32,
    pub gained_skill_points: u32,
    pub gained_trade_points: u32,
    pub gained_talents: u32,
    pub gained_path_points: u32,
    pub gained_maneuvers_known: u32,
    pub gained_techniques_known: u32,
    pub gained_cantrips_known: u32,
    pub gained_spells_known: u32,
}

impl ProgressionLevel {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }
}

/// Accumulated progression gains up to a level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressionTotals {
    pub health: u32,
    pub stamina_points: u32,
    pub mana_points: u32,
    pub attribute_points: u32,
    pub skill_points: u32,
    pub trade_points: u32,
    pub talents: u32,
    pub path_points: u32,
    pub maneuvers_known: u32,
    pub techniques_known: u32,
    pub cantrips_known: u32,
    pub spells_known: u32,
}

impl ProgressionTotals {
    fn add(self, row: &ProgressionLevel) -> Self {
        Self {
            health: self.health + row.gained_health,
            stamina_points: self.stamina_points + row.gained_stamina_points,
            mana_points: self.mana_points + row.gained_mana_points,
            attribute_points: self.attribute_points + row.gained_attribute_points,
            skill_points: self.skill_points + row.gained_skill_points,
            trade_points: self.trade_points + row.gained_trade_points,
            talents: self.talents + row.gained_talents,
            path_points: self.path_points + row.gained_path_points,
            maneuvers_known: self.maneuvers_known + row.gained_maneuvers_known,
            techniques_known: self.techniques_known + row.gained_techniques_known,
            cantrips_known: self.cantrips_known + row.gained_cantrips_known,
            spells_known: self.spells_known + row.gained_spells_known,
        }
    }
}

/// A class or subclass feature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ClassFeature {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default = "first_level"))]
    pub level_gained: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub benefits: Vec<FeatureBenefit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub choices: Vec<FeatureChoice>,
}

impl ClassFeature {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            level_gained: first_level(),
            effects: Vec::new(),
            benefits: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn at_level(mut self, level: u32) -> Self {
        self.level_gained = level;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_benefit(mut self, benefit: FeatureBenefit) -> Self {
        self.benefits.push(benefit);
        self
    }

    pub fn with_choice(mut self, choice: FeatureChoice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// A named sub-block of a feature with its own effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureBenefit {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

/// A pick-from-list block on a feature, answered in
/// `selected_feature_choices[id]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureChoice {
    pub id: String,
    pub prompt: String,
    #[cfg_attr(feature = "serde", serde(default = "first_level"))]
    pub count: u32,
    pub options: Vec<ChoiceOption>,
}

impl FeatureChoice {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            count: first_level(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: ChoiceOption) -> Self {
        self.options.push(option);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceOption {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl ChoiceOption {
    pub fn new(name: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            effects,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subclass {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<ClassFeature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(level: u32, health: u32) -> ProgressionLevel {
        ProgressionLevel {
            gained_health: health,
            ..ProgressionLevel::new(level)
        }
    }

    #[test]
    fn progression_sums_inclusive_range() {
        let class = ClassDefinition::new("test", "Test")
            .with_progression(vec![row(1, 8), row(2, 2), row(3, 2)]);

        assert_eq!(class.progression_through(1).map(|t| t.health), Some(8));
        assert_eq!(class.progression_through(3).map(|t| t.health), Some(12));
    }

    #[test]
    fn progression_gap_is_reported() {
        let class = ClassDefinition::new("test", "Test").with_progression(vec![row(1, 8), row(3, 2)]);

        assert!(class.progression_through(1).is_some());
        assert!(class.progression_through(3).is_none());
        assert!(ClassDefinition::new("empty", "Empty").progression_through(1).is_none());
    }

    #[test]
    fn feature_lookup_covers_subclasses() {
        let class = ClassDefinition::new("test", "Test")
            .with_feature(ClassFeature::new("core", "Core"))
            .with_subclass(Subclass {
                id: "sub".into(),
                name: "Sub".into(),
                features: vec![ClassFeature::new("sub_feature", "Sub Feature").at_level(3)],
            });

        assert!(class.feature("core").is_some());
        assert_eq!(class.feature("sub_feature").map(|f| f.level_gained), Some(3));
        assert!(class.feature("missing").is_none());
    }
}
