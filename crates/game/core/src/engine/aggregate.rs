//! Effect aggregation: flattens every selected source into attributed
//! effects.
//!
//! Emission order is stable so breakdowns render reproducibly:
//! traits (selection order), class features (catalog order, level-gated),
//! subclass features, talents, then the multiclass feature. Within a feature
//! the direct effects come first, then benefits, then chosen options.
//!
//! Unknown ids are skipped; stale saved builds must still load. A talent
//! emits at most `max_times` copies; the validator reports the excess.

use tracing::debug;

use crate::build::CharacterBuildInput;
use crate::effect::{AttributedEffect, ChoiceKey, Effect, EffectSource, SourceKind};
use crate::env::{ClassDefinition, ClassFeature, RulesEnv};

const TRAIT_CATEGORY: &str = "Selected Trait";
const CLASS_CATEGORY: &str = "Class Feature";
const SUBCLASS_CATEGORY: &str = "Subclass Feature";
const CHOICE_CATEGORY: &str = "Feature Choice";
const TALENT_CATEGORY: &str = "Talent";
const MULTICLASS_CATEGORY: &str = "Multiclass Feature";

/// Collects every effect contributed by the build's selections.
pub fn aggregate(input: &CharacterBuildInput, env: &RulesEnv<'_>) -> Vec<AttributedEffect> {
    let mut aggregator = Aggregator::new(input);

    aggregator.traits(env);

    let class = input.class_id.as_deref().and_then(|id| env.classes.class(id));
    if let Some(class) = class {
        aggregator.class_features(class);
        aggregator.subclass_features(class);
    }

    aggregator.talents(env);
    aggregator.multiclass_feature(env);

    debug!(
        target: "dc20::aggregate",
        effects = aggregator.effects.len(),
        "aggregated build effects"
    );
    aggregator.effects
}

struct Aggregator<'a> {
    input: &'a CharacterBuildInput,
    level: u32,
    effects: Vec<AttributedEffect>,
}

impl<'a> Aggregator<'a> {
    fn new(input: &'a CharacterBuildInput) -> Self {
        Self {
            input,
            level: u32::try_from(input.level).unwrap_or(0),
            effects: Vec::new(),
        }
    }

    /// Emits one attributed effect per entry, keyed `{owner}-{index}`.
    fn emit(&mut self, effects: &[Effect], source: &EffectSource, owner: &str) {
        self.effects
            .extend(effects.iter().enumerate().map(|(index, effect)| {
                AttributedEffect::new(effect.clone(), source.clone(), ChoiceKey::new(owner, index))
            }));
    }

    fn traits(&mut self, env: &RulesEnv<'_>) {
        let input = self.input;
        for trait_id in &input.selected_trait_ids {
            let Some(definition) = env.traits.ancestry_trait(trait_id) else {
                debug!(target: "dc20::aggregate", %trait_id, "skipping unknown trait");
                continue;
            };
            let source = EffectSource::new(SourceKind::Trait, &definition.id, &definition.name, TRAIT_CATEGORY)
                .with_description(definition.description.as_str());
            self.emit(&definition.effects, &source, trait_id);
        }
    }

    fn class_features(&mut self, class: &ClassDefinition) {
        let level = self.level;
        for feature in class.features.iter().filter(|f| f.level_gained <= level) {
            self.feature(feature, SourceKind::ClassFeature, CLASS_CATEGORY);
        }
    }

    fn subclass_features(&mut self, class: &ClassDefinition) {
        let Some(subclass_id) = self.input.selected_subclass.as_deref() else {
            return;
        };
        let Some(subclass) = class.subclass(subclass_id) else {
            debug!(target: "dc20::aggregate", %subclass_id, class = %class.id, "skipping unknown subclass");
            return;
        };
        let level = self.level;
        for feature in subclass.features.iter().filter(|f| f.level_gained <= level) {
            self.feature(feature, SourceKind::SubclassFeature, SUBCLASS_CATEGORY);
        }
    }

    fn talents(&mut self, env: &RulesEnv<'_>) {
        let input = self.input;
        for (talent_id, &times) in &input.selected_talents {
            let Some(talent) = env.talents.talent(talent_id) else {
                debug!(target: "dc20::aggregate", %talent_id, "skipping unknown talent");
                continue;
            };
            let source = EffectSource::new(SourceKind::Talent, &talent.id, &talent.name, TALENT_CATEGORY)
                .with_description(talent.description.as_str());
            let copies = times.min(talent.max_times);
            if copies < times {
                debug!(target: "dc20::aggregate", %talent_id, times, max = talent.max_times, "capping repeated talent");
            }
            for copy in 1..=copies {
                self.emit(&talent.effects, &source, &talent_owner(talent_id, copy));
            }
        }
    }

    fn multiclass_feature(&mut self, env: &RulesEnv<'_>) {
        let Some(feature_id) = self.input.selected_multiclass_feature.as_deref() else {
            return;
        };
        match env.classes.find_feature(feature_id) {
            Some((_, feature)) => {
                self.feature(feature, SourceKind::MulticlassFeature, MULTICLASS_CATEGORY)
            }
            None => {
                debug!(target: "dc20::aggregate", %feature_id, "skipping unknown multiclass feature")
            }
        }
    }

    /// Direct effects, then benefits, then the selected choice options.
    fn feature(&mut self, feature: &ClassFeature, kind: SourceKind, category: &str) {
        let source = EffectSource::new(kind, &feature.id, &feature.name, category)
            .with_description(feature.description.as_str());
        self.emit(&feature.effects, &source, &feature.id);

        for benefit in &feature.benefits {
            let source = EffectSource::new(
                kind,
                &feature.id,
                format!("{}: {}", feature.name, benefit.name),
                category,
            )
            .with_description(benefit.description.as_str());
            let owner = format!("{}.{}", feature.id, benefit.name);
            self.emit(&benefit.effects, &source, &owner);
        }

        let input = self.input;
        for choice in &feature.choices {
            let Some(selection) = input.selected_feature_choices.get(&choice.id) else {
                continue;
            };
            for option in choice.options.iter().filter(|o| selection.includes(&o.name)) {
                let source = EffectSource::new(SourceKind::Choice, &choice.id, &option.name, CHOICE_CATEGORY)
                    .with_description(option.description.as_str());
                let owner = format!("{}.{}", choice.id, option.name);
                self.emit(&option.effects, &source, &owner);
            }
        }
    }
}

/// Choice owner for one copy of a talent: the bare id for the first copy,
/// `{id}#{copy}` for later ones, so each copy records its own choices.
fn talent_owner(talent_id: &str, copy: u32) -> String {
    if copy <= 1 {
        talent_id.to_string()
    } else {
        format!("{talent_id}#{copy}")
    }
}
