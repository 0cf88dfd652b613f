use crate::effect::Effect;

pub trait TalentOracle: Send + Sync {
    fn talent(&self, id: &str) -> Option<&TalentDefinition>;
}

const fn once() -> u32 {
    1
}

/// A talent taken with level-up talent points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TalentDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// How many times the talent may be taken.
    #[cfg_attr(feature = "serde", serde(default = "once"))]
    pub max_times: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl TalentDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            max_times: once(),
            effects: Vec::new(),
        }
    }

    pub fn repeatable(mut self, max_times: u32) -> Self {
        self.max_times = max_times;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
