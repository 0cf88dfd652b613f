//! The four DC20 attributes and the attribute layer of the stat pipeline.
//!
//! Attribute scores are the only stats the player sets directly. Everything
//! else is derived from their final (effect-adjusted) values.

use strum::IntoEnumIterator;

/// One of the four attributes.
///
/// Declaration order is significant: it breaks ties when picking the prime
/// attribute.
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
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Attribute {
    Might,
    Agility,
    Charisma,
    Intelligence,
}

impl Attribute {
    /// All attributes in tie-break order.
    pub fn all() -> impl Iterator<Item = Attribute> {
        Attribute::iter()
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Might => "Might",
            Self::Agility => "Agility",
            Self::Charisma => "Charisma",
            Self::Intelligence => "Intelligence",
        }
    }
}

/// A value per attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeScores {
    pub might: i32,
    pub agility: i32,
    pub charisma: i32,
    pub intelligence: i32,
}

impl AttributeScores {
    pub const fn new(might: i32, agility: i32, charisma: i32, intelligence: i32) -> Self {
        Self {
            might,
            agility,
            charisma,
            intelligence,
        }
    }

    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Might => self.might,
            Attribute::Agility => self.agility,
            Attribute::Charisma => self.charisma,
            Attribute::Intelligence => self.intelligence,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Might => self.might = value,
            Attribute::Agility => self.agility = value,
            Attribute::Charisma => self.charisma = value,
            Attribute::Intelligence => self.intelligence = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::all().map(|attribute| (attribute, self.get(attribute)))
    }

    /// The highest score and the first attribute (in declaration order)
    /// reaching it.
    pub fn prime(&self) -> (Attribute, i32) {
        self.iter()
            .fold((Attribute::Might, self.might), |best, (attribute, value)| {
                if value > best.1 { (attribute, value) } else { best }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("agility".parse::<Attribute>(), Ok(Attribute::Agility));
        assert_eq!("Might".parse::<Attribute>(), Ok(Attribute::Might));
        assert!("luck".parse::<Attribute>().is_err());
        assert_eq!(Attribute::Intelligence.to_string(), "intelligence");
    }

    #[test]
    fn prime_prefers_declaration_order_on_ties() {
        let scores = AttributeScores::new(1, 3, 3, 0);
        assert_eq!(scores.prime(), (Attribute::Agility, 3));

        let flat = AttributeScores::new(0, 0, 0, 0);
        assert_eq!(flat.prime(), (Attribute::Might, 0));

        let negative = AttributeScores::new(-2, -1, -2, -1);
        assert_eq!(negative.prime(), (Attribute::Agility, -1));
    }
}
