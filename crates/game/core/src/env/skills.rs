use crate::stats::Attribute;

/// Skill and trade catalogs.
///
/// Both share [`SkillDefinition`]; they differ only in which point pool pays
/// for them.
pub trait SkillOracle: Send + Sync {
    fn skills(&self) -> &[SkillDefinition];

    fn trades(&self) -> &[SkillDefinition];

    fn skill(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills().iter().find(|skill| skill.id == id)
    }

    fn trade(&self, id: &str) -> Option<&SkillDefinition> {
        self.trades().iter().find(|trade| trade.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    /// `None` for skills keyed off the prime attribute (Awareness).
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute: Option<Attribute>,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, attribute: Option<Attribute>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attribute,
        }
    }
}
