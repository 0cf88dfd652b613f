//! DC20 rule constants and level-indexed tables.
//!
//! These are game-rule values, not tunables. Everything level-dependent is
//! looked up through [`LevelCaps::for_level`] so the supported level range
//! is pinned in one place ([`MAX_LEVEL`]).

/// Highest supported character level. Matches the length of the class
/// progression tables.
pub const MAX_LEVEL: u32 = 10;

/// Absolute attribute floor. Effects never lower it.
pub const ATTRIBUTE_FLOOR: i32 = -2;

/// Attribute points available before any level-up gains.
pub const BASE_ATTRIBUTE_POINTS: i32 = 12;

pub const BASE_SKILL_POINTS: i32 = 5;
pub const BASE_TRADE_POINTS: i32 = 3;
pub const BASE_LANGUAGE_POINTS: i32 = 2;
pub const BASE_ANCESTRY_POINTS: i32 = 5;

pub const BASE_DEFENSE: i32 = 8;
pub const BASE_SAVE_DC: i32 = 8;
pub const BASE_MOVE_SPEED: i32 = 5;
pub const BASE_GRIT_POINTS: i32 = 2;

/// Highest mastery rank any skill or trade can reach.
pub const MAX_MASTERY_RANK: u8 = 5;

/// Mastery rank 2.
pub const ADEPT_RANK: u8 = 2;

/// The language every character speaks for free.
pub const COMMON_LANGUAGE: &str = "common";

/// Combat Mastery: `ceil(level / 2)`.
pub const fn combat_mastery(level: u32) -> i32 {
    level.div_ceil(2) as i32
}

/// Level-gated ceilings for attributes and skill/trade mastery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelCaps {
    pub attribute: i32,
    pub mastery: u8,
}

impl LevelCaps {
    /// Cap table indexed by `level - 1`.
    ///
    /// ```text
    /// level  1-4 : attribute 3, mastery 1 (Novice)
    /// level  5-9 : attribute 4, mastery 2 (Adept)
    /// level   10 : attribute 5, mastery 3 (Expert)
    /// ```
    const TABLE: [LevelCaps; MAX_LEVEL as usize] = [
        LevelCaps::new(3, 1),
        LevelCaps::new(3, 1),
        LevelCaps::new(3, 1),
        LevelCaps::new(3, 1),
        LevelCaps::new(4, 2),
        LevelCaps::new(4, 2),
        LevelCaps::new(4, 2),
        LevelCaps::new(4, 2),
        LevelCaps::new(4, 2),
        LevelCaps::new(5, 3),
    ];

    const fn new(attribute: i32, mastery: u8) -> Self {
        Self { attribute, mastery }
    }

    /// Caps for a level. Levels outside `1..=MAX_LEVEL` are clamped into range;
    /// the engine rejects them before this is reached.
    pub fn for_level(level: u32) -> Self {
        let index = level.clamp(1, MAX_LEVEL) as usize - 1;
        Self::TABLE[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_mastery_rounds_up() {
        let expected = [1, 1, 2, 2, 3, 3, 4, 4, 5, 5];
        for (level, cm) in (1..=MAX_LEVEL).zip(expected) {
            assert_eq!(combat_mastery(level), cm, "level {level}");
        }
    }

    #[test]
    fn caps_grow_with_level() {
        assert_eq!(LevelCaps::for_level(1).attribute, 3);
        assert_eq!(LevelCaps::for_level(1).mastery, 1);
        assert_eq!(LevelCaps::for_level(5).mastery, ADEPT_RANK);
        assert_eq!(LevelCaps::for_level(10).attribute, 5);

        let mut previous = LevelCaps::for_level(1);
        for level in 2..=MAX_LEVEL {
            let caps = LevelCaps::for_level(level);
            assert!(caps.attribute >= previous.attribute);
            assert!(caps.mastery >= previous.mastery);
            previous = caps;
        }
    }
}
