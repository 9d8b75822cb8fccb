use crate::RowId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived numeric fields for one versioned entity.
///
/// `complexity` prices every step of the version including optional ones;
/// `simplicity` prices only the mandatory path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub simplicity: u64,
    pub complexity: u64,
}

impl Weights {
    #[must_use]
    pub const fn new(simplicity: u64, complexity: u64) -> Self {
        Self {
            simplicity,
            complexity,
        }
    }
}

/// Immutable map from version row id to its computed weights.
///
/// Produced once per save call by the weight calculator, frozen into the
/// shape context, and read by the compiler while shaping each versioned
/// entity. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightMap(BTreeMap<RowId, Weights>);

impl WeightMap {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, id: RowId, weights: Weights) {
        self.0.insert(id, weights);
    }

    /// Looks up the weights for a version id.
    #[must_use]
    pub fn get(&self, id: &RowId) -> Option<Weights> {
        self.0.get(id).copied()
    }

    /// Weights for a version, defaulting to zero when absent.
    #[must_use]
    pub fn get_or_default(&self, id: &RowId) -> Weights {
        self.get(id).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RowId, &Weights)> {
        self.0.iter()
    }
}

impl FromIterator<(RowId, Weights)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (RowId, Weights)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
