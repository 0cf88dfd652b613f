//! In-memory reference data implementing every oracle.
//!
//! Loaders build a [`Catalog`] once at startup; the engine only reads it.

use std::collections::HashMap;

use super::{
    AncestryDefinition, AncestryOracle, ClassDefinition, ClassOracle, PathDefinition, PathKind,
    PathOracle, SkillDefinition, SkillOracle, TalentDefinition, TalentOracle, TraitDefinition,
    TraitOracle,
};

/// Id-indexed list that keeps catalog order.
#[derive(Clone, Debug)]
struct Indexed<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Indexed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Indexed<T> {
    /// Later entries with a duplicate id replace earlier ones in place.
    fn from_items(items: Vec<T>, id: impl Fn(&T) -> &str) -> Self {
        let mut indexed = Self::default();
        for item in items {
            let existing = indexed.index.get(id(&item)).copied();
            match existing {
                Some(position) => indexed.items[position] = item,
                None => {
                    indexed.index.insert(id(&item).to_string(), indexed.items.len());
                    indexed.items.push(item);
                }
            }
        }
        indexed
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }
}

/// Complete DC20 reference data.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    classes: Indexed<ClassDefinition>,
    traits: Indexed<TraitDefinition>,
    talents: Indexed<TalentDefinition>,
    ancestries: Indexed<AncestryDefinition>,
    skills: Vec<SkillDefinition>,
    trades: Vec<SkillDefinition>,
    paths: Vec<PathDefinition>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes.items
    }

    pub fn traits(&self) -> &[TraitDefinition] {
        &self.traits.items
    }

    pub fn talents(&self) -> &[TalentDefinition] {
        &self.talents.items
    }

    pub fn ancestries(&self) -> &[AncestryDefinition] {
        &self.ancestries.items
    }
}

/// Collects catalog tables before indexing them.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    classes: Vec<ClassDefinition>,
    traits: Vec<TraitDefinition>,
    talents: Vec<TalentDefinition>,
    ancestries: Vec<AncestryDefinition>,
    skills: Vec<SkillDefinition>,
    trades: Vec<SkillDefinition>,
    paths: Vec<PathDefinition>,
}

impl CatalogBuilder {
    pub fn classes(mut self, classes: impl IntoIterator<Item = ClassDefinition>) -> Self {
        self.classes.extend(classes);
        self
    }

    pub fn traits(mut self, traits: impl IntoIterator<Item = TraitDefinition>) -> Self {
        self.traits.extend(traits);
        self
    }

    pub fn talents(mut self, talents: impl IntoIterator<Item = TalentDefinition>) -> Self {
        self.talents.extend(talents);
        self
    }

    pub fn ancestries(mut self, ancestries: impl IntoIterator<Item = AncestryDefinition>) -> Self {
        self.ancestries.extend(ancestries);
        self
    }

    pub fn skills(mut self, skills: impl IntoIterator<Item = SkillDefinition>) -> Self {
        self.skills.extend(skills);
        self
    }

    pub fn trades(mut self, trades: impl IntoIterator<Item = SkillDefinition>) -> Self {
        self.trades.extend(trades);
        self
    }

    pub fn paths(mut self, paths: impl IntoIterator<Item = PathDefinition>) -> Self {
        self.paths.extend(paths);
        self
    }

    pub fn build(self) -> Catalog {
        Catalog {
            classes: Indexed::from_items(self.classes, |c| c.id.as_str()),
            traits: Indexed::from_items(self.traits, |t| t.id.as_str()),
            talents: Indexed::from_items(self.talents, |t| t.id.as_str()),
            ancestries: Indexed::from_items(self.ancestries, |a| a.id.as_str()),
            skills: self.skills,
            trades: self.trades,
            paths: self.paths,
        }
    }
}

impl ClassOracle for Catalog {
    fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    fn all_classes(&self) -> &[ClassDefinition] {
        &self.classes.items
    }
}

impl TraitOracle for Catalog {
    fn ancestry_trait(&self, id: &str) -> Option<&TraitDefinition> {
        self.traits.get(id)
    }
}

impl TalentOracle for Catalog {
    fn talent(&self, id: &str) -> Option<&TalentDefinition> {
        self.talents.get(id)
    }
}

impl AncestryOracle for Catalog {
    fn ancestry(&self, id: &str) -> Option<&AncestryDefinition> {
        self.ancestries.get(id)
    }
}

impl SkillOracle for Catalog {
    fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    fn trades(&self) -> &[SkillDefinition] {
        &self.trades
    }
}

impl PathOracle for Catalog {
    fn path(&self, kind: PathKind) -> Option<&PathDefinition> {
        self.paths.iter().find(|path| path.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_miss_without_panicking() {
        let catalog = Catalog::builder()
            .classes([ClassDefinition::new("hunter", "Hunter")])
            .build();

        assert!(catalog.class("hunter").is_some());
        assert!(catalog.class("wizard").is_none());
        assert!(catalog.ancestry_trait("anything").is_none());
        assert!(catalog.path(PathKind::Martial).is_none());
        assert!(catalog.find_feature("anything").is_none());
    }

    #[test]
    fn duplicate_ids_keep_first_position() {
        let catalog = Catalog::builder()
            .traits([
                TraitDefinition::new("a", "First", 1),
                TraitDefinition::new("b", "Other", 1),
                TraitDefinition::new("a", "Replacement", 2),
            ])
            .build();

        assert_eq!(catalog.traits().len(), 2);
        assert_eq!(catalog.traits()[0].name, "Replacement");
        assert_eq!(catalog.ancestry_trait("a").map(|t| t.cost), Some(2));
    }
}
