pub trait AncestryOracle: Send + Sync {
    fn ancestry(&self, id: &str) -> Option<&AncestryDefinition>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AncestryDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_traits: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub expanded_traits: Vec<String>,
}

impl AncestryDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the trait is listed by this ancestry.
    pub fn offers(&self, trait_id: &str) -> bool {
        self.default_traits
            .iter()
            .chain(&self.expanded_traits)
            .any(|id| id == trait_id)
    }
}
