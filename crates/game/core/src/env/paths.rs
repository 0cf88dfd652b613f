pub trait PathOracle: Send + Sync {
    fn path(&self, kind: PathKind) -> Option<&PathDefinition>;
}

/// The two path tracks path points can be spent on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathKind {
    Martial,
    Spellcasting,
}

/// A path track: allocating `n` points grants `levels[0..n]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDefinition {
    pub kind: PathKind,
    pub name: String,
    pub levels: Vec<PathLevel>,
}

impl PathDefinition {
    /// Sum of the first `points` levels. Points beyond the table grant
    /// nothing further.
    pub fn bonuses_for(&self, points: u32) -> PathLevel {
        self.levels
            .iter()
            .take(points as usize)
            .fold(PathLevel::default(), |acc, level| acc.add(level))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PathLevel {
    pub stamina_points: u32,
    pub mana_points: u32,
    pub maneuvers_known: u32,
    pub techniques_known: u32,
    pub cantrips_known: u32,
    pub spells_known: u32,
}

impl PathLevel {
    fn add(&self, other: &PathLevel) -> PathLevel {
        PathLevel {
            stamina_points: self.stamina_points + other.stamina_points,
            mana_points: self.mana_points + other.mana_points,
            maneuvers_known: self.maneuvers_known + other.maneuvers_known,
            techniques_known: self.techniques_known + other.techniques_known,
            cantrips_known: self.cantrips_known + other.cantrips_known,
            spells_known: self.spells_known + other.spells_known,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonuses_accumulate_per_point() {
        let path = PathDefinition {
            kind: PathKind::Martial,
            name: "Martial Path".into(),
            levels: vec![
                PathLevel {
                    stamina_points: 1,
                    maneuvers_known: 1,
                    ..PathLevel::default()
                },
                PathLevel {
                    techniques_known: 1,
                    maneuvers_known: 1,
                    ..PathLevel::default()
                },
            ],
        };

        assert_eq!(path.bonuses_for(0), PathLevel::default());
        let two = path.bonuses_for(2);
        assert_eq!(two.stamina_points, 1);
        assert_eq!(two.maneuvers_known, 2);
        assert_eq!(two.techniques_known, 1);
        assert_eq!(path.bonuses_for(9), two);
    }
}
