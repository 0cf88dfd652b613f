//! Layer 1: final attribute values.
//!
//! The only player-set inputs. Each final value is the entered base plus the
//! unconditional attribute modifiers targeting it.

use super::bonus::{StatBonuses, StatLayer};
use super::breakdown::StatBreakdown;
use super::{Attribute, AttributeScores};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalAttributes {
    pub base: AttributeScores,
    pub values: AttributeScores,
    pub breakdowns: Vec<(Attribute, StatBreakdown)>,
}

impl FinalAttributes {
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.values.get(attribute)
    }

    /// Sum of the unconditional modifiers on one attribute.
    pub fn bonus(&self, attribute: Attribute) -> i32 {
        self.values.get(attribute) - self.base.get(attribute)
    }

    pub fn prime(&self) -> (Attribute, i32) {
        self.values.prime()
    }
}

impl StatLayer for FinalAttributes {
    type Base = AttributeScores;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &StatBonuses) -> Self::Final {
        let mut values = *base;
        let mut breakdowns = Vec::with_capacity(4);

        for (attribute, value) in base.iter() {
            let breakdown = StatBreakdown::compute(
                attribute.as_ref(),
                value,
                bonuses.attribute(attribute).iter().cloned(),
            );
            values.set(attribute, breakdown.total);
            breakdowns.push((attribute, breakdown));
        }

        Self {
            base: *base,
            values,
            breakdowns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{AttributedEffect, ChoiceKey, Effect, EffectSource, SourceKind};

    #[test]
    fn applies_only_unconditional_modifiers() {
        let source = EffectSource::new(SourceKind::Trait, "t", "Trait", "Selected Trait");
        let effects = [
            AttributedEffect::new(
                Effect::modify_attribute(Attribute::Agility, 1),
                source.clone(),
                ChoiceKey::new("t", 0),
            ),
            AttributedEffect::new(
                Effect::modify_attribute(Attribute::Might, 2).when("enlarged"),
                source,
                ChoiceKey::new("t", 1),
            ),
        ];

        let finals = FinalAttributes::compute(
            &AttributeScores::new(1, 2, 0, -1),
            &StatBonuses::collect(&effects),
        );

        assert_eq!(finals.get(Attribute::Agility), 3);
        assert_eq!(finals.bonus(Attribute::Agility), 1);
        assert_eq!(finals.get(Attribute::Might), 1);
        assert_eq!(finals.prime(), (Attribute::Agility, 3));

        let (_, might) = &finals.breakdowns[0];
        assert_eq!(might.conditional_total, 3);
    }

    #[test]
    fn no_bonuses_keeps_base() {
        let base = AttributeScores::new(3, 1, 0, -2);
        assert_eq!(FinalAttributes::from_base(&base).values, base);
    }
}
