//! Name-sorted material index.

use crate::model::Material;

/// Materials sorted by name for binary-search lookup.
///
/// Built fresh for every compile call and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MaterialIndex {
    materials: Vec<Material>,
}

impl MaterialIndex {
    /// Build an index, stably sorting the materials by name.
    pub fn build(materials: impl IntoIterator<Item = Material>) -> Self {
        let mut materials: Vec<Material> = materials.into_iter().collect();
        materials.sort_by(|a, b| a.name.cmp(&b.name));
        Self { materials }
    }

    /// Find the material called `name`.
    ///
    /// A miss is an ordinary outcome: callers render an empty image source or
    /// leave the background unset.
    pub fn lookup(&self, name: &str) -> Option<&Material> {
        self.materials
            .binary_search_by(|m| m.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.materials[i])
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

impl FromIterator<Material> for MaterialIndex {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        Self::build(iter)
    }
}
