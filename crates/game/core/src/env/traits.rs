use crate::effect::Effect;

pub trait TraitOracle: Send + Sync {
    fn ancestry_trait(&self, id: &str) -> Option<&TraitDefinition>;
}

/// An ancestry trait purchasable with ancestry points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TraitDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Ancestry point cost. Negative costs refund points.
    pub cost: i32,
    /// Owning ancestry, if the trait is not generic.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ancestry: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisites: Prerequisites,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl TraitDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            ..Self::default()
        }
    }

    pub fn for_ancestry(mut self, ancestry: impl Into<String>) -> Self {
        self.ancestry = Some(ancestry.into());
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: Prerequisites) -> Self {
        self.prerequisites = prerequisites;
        self
    }
}

/// Constraints on which other traits must or must not be selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Prerequisites {
    pub requires_any: Vec<String>,
    pub requires_all: Vec<String>,
    pub prohibits: Vec<String>,
}

/// Why a trait's prerequisites are not met.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrerequisiteFailure {
    #[error("requires one of: {}", .0.join(", "))]
    MissingAny(Vec<String>),
    #[error("requires all of: {}", .0.join(", "))]
    MissingAll(Vec<String>),
    #[error("conflicts with: {}", .0.join(", "))]
    Prohibited(Vec<String>),
}

impl Prerequisites {
    /// Checks the constraints against the full selection.
    pub fn check(&self, selected: &[String]) -> Result<(), PrerequisiteFailure> {
        let has = |id: &String| selected.iter().any(|s| s == id);

        if !self.requires_any.is_empty() && !self.requires_any.iter().any(has) {
            return Err(PrerequisiteFailure::MissingAny(self.requires_any.clone()));
        }

        let missing: Vec<String> = self.requires_all.iter().filter(|id| !has(*id)).cloned().collect();
        if !missing.is_empty() {
            return Err(PrerequisiteFailure::MissingAll(missing));
        }

        let conflicts: Vec<String> = self.prohibits.iter().filter(|id| has(*id)).cloned().collect();
        if !conflicts.is_empty() {
            return Err(PrerequisiteFailure::Prohibited(conflicts));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_prerequisites_always_pass() {
        assert_eq!(Prerequisites::default().check(&[]), Ok(()));
    }

    #[test]
    fn requires_any_needs_one_match() {
        let prereq = Prerequisites {
            requires_any: ids(&["a", "b"]),
            ..Prerequisites::default()
        };
        assert!(prereq.check(&ids(&["b"])).is_ok());
        assert_eq!(
            prereq.check(&ids(&["c"])),
            Err(PrerequisiteFailure::MissingAny(ids(&["a", "b"])))
        );
    }

    #[test]
    fn requires_all_lists_missing_ids() {
        let prereq = Prerequisites {
            requires_all: ids(&["a", "b"]),
            ..Prerequisites::default()
        };
        assert_eq!(
            prereq.check(&ids(&["a"])),
            Err(PrerequisiteFailure::MissingAll(ids(&["b"])))
        );
    }

    #[test]
    fn prohibits_lists_conflicts() {
        let prereq = Prerequisites {
            prohibits: ids(&["x"]),
            ..Prerequisites::default()
        };
        assert_eq!(
            prereq.check(&ids(&["x", "y"])),
            Err(PrerequisiteFailure::Prohibited(ids(&["x"])))
        );
    }

    #[test]
    fn failures_render_the_offending_ids() {
        let failure = PrerequisiteFailure::MissingAny(ids(&["dwarf_toughness", "dwarf_resolve"]));
        assert_eq!(failure.to_string(), "requires one of: dwarf_toughness, dwarf_resolve");
    }
}
