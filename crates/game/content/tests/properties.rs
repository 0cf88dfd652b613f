//! Engine-wide invariants checked against the bundled data.

use dc20_content::ContentCatalog;
use dc20_core::rules::{ATTRIBUTE_FLOOR, MAX_LEVEL};
use dc20_core::{Attribute, CharacterBuildInput, FeatureSelection, calculate};

const CLASSES: [&str; 3] = ["barbarian", "hunter", "wizard"];

fn content() -> ContentCatalog {
    ContentCatalog::builtin().expect("bundled data should parse")
}

/// A busy build touching traits, features, talents and paths.
fn busy_build(level: i32, class: &str) -> CharacterBuildInput {
    CharacterBuildInput::new(level, class)
        .with_attributes(2, 1, 0, -1)
        .with_ancestry("human")
        .with_trait("human_attribute_increase")
        .with_trait("human_resolve")
        .with_trait("general_tough")
        .with_trait_choice("human_attribute_increase-0", "charisma")
        .with_feature_choice("hunter_favored_terrain", FeatureSelection::One("Forest".into()))
        .with_feature_choice("wizard_spell_school", FeatureSelection::One("Abjuration".into()))
        .with_talent("hardy", 1)
        .with_path_points(1, 1)
        .with_skill("athletics", 1)
}

#[test]
fn combat_mastery_is_half_level_rounded_up() {
    let content = content();
    for level in 1..=MAX_LEVEL as i32 {
        let result = calculate(&CharacterBuildInput::new(level, "barbarian"), &content.env())
            .expect("valid level");
        assert_eq!(result.stats.combat_mastery, (level + 1) / 2, "level {level}");
    }
}

#[test]
fn attribute_floor_controls_can_decrease() {
    let content = content();
    for base in ATTRIBUTE_FLOOR..=3 {
        let input = CharacterBuildInput::new(1, "hunter").with_attributes(base, base, base, base);
        let result = calculate(&input, &content.env()).expect("calculates");
        for (attribute, limit) in &result.validation.attribute_limits {
            assert_eq!(limit.base, base, "{attribute}");
            assert_eq!(limit.can_decrease, base > ATTRIBUTE_FLOOR, "{attribute} at {base}");
        }
    }
}

/// A bonus cannot lift an attribute off the floor for decrease purposes.
#[test]
fn floor_ignores_trait_bonuses() {
    let content = content();
    let input = CharacterBuildInput::new(1, "hunter")
        .with_attributes(-2, 0, 0, 0)
        .with_trait("human_attribute_increase")
        .with_trait_choice("human_attribute_increase-0", "might");

    let result = calculate(&input, &content.env()).expect("calculates");
    let might = &result.validation.attribute_limits[&Attribute::Might];
    assert_eq!(might.current, -1);
    assert!(!might.can_decrease);
}

#[test]
fn total_never_exceeds_conditional_total() {
    let content = content();
    for class in CLASSES {
        for level in [1, 3, 5, 10] {
            let result = calculate(&busy_build(level, class), &content.env()).expect("calculates");
            for (name, breakdown) in &result.breakdowns {
                assert!(
                    breakdown.total <= breakdown.conditional_total,
                    "{class} L{level} {name}: {} > {}",
                    breakdown.total,
                    breakdown.conditional_total
                );
            }
        }
    }
}

#[test]
fn repeated_calculations_are_identical() {
    let content = content();
    for class in CLASSES {
        let input = busy_build(4, class);
        let first = calculate(&input, &content.env()).expect("calculates");
        let second = calculate(&input, &content.env()).expect("calculates");
        assert_eq!(first, second, "{class}");
    }
}

#[test]
fn calculation_does_not_modify_input() {
    let content = content();
    let input = busy_build(3, "wizard");
    let snapshot = input.clone();

    calculate(&input, &content.env()).expect("calculates");

    assert_eq!(input, snapshot);
}

#[test]
fn levelling_up_never_takes_resources_away() {
    let content = content();
    for class in CLASSES {
        let mut previous = None;
        for level in 1..=MAX_LEVEL as i32 {
            let result = calculate(&busy_build(level, class), &content.env()).expect("calculates");
            let current = (
                result.stats.final_hp_max,
                result.level_budgets.total_talents,
                result.level_budgets.total_path_points,
            );
            if let Some((hp, talents, paths)) = previous {
                assert!(current.0 >= hp, "{class} HP dropped at level {level}");
                assert!(current.1 >= talents, "{class} talents dropped at level {level}");
                assert!(current.2 >= paths, "{class} path points dropped at level {level}");
            }
            previous = Some(current);
        }
    }
}

#[test]
fn every_class_has_a_complete_table() {
    let content = content();
    for class in content.catalog().classes() {
        assert!(
            class.progression_through(MAX_LEVEL).is_some(),
            "{} is missing progression rows",
            class.id
        );
    }
}
