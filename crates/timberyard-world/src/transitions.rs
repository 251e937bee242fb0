//! Tagged transition table for cyclic loaders.
//!
//! When a loader with a path sequence switches onto a new path, the table
//! decides what happens to its load: [`TransitionEffect::Fill`] loads it to
//! capacity, [`TransitionEffect::Empty`] unloads it, and a path with no entry
//! leaves the load as it was. The table is keyed by [`PathId`] rather than by
//! string matching so a renamed path shows up as a missing entry, not a
//! silent mismatch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use timberyard_types::{PathId, TransitionEffect};

/// Lookup from path id to the load effect applied on entering that path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    effects: BTreeMap<PathId, TransitionEffect>,
}

impl TransitionTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            effects: BTreeMap::new(),
        }
    }

    /// Register (or replace) the effect for a path. Returns the previous effect.
    pub fn insert(&mut self, path: PathId, effect: TransitionEffect) -> Option<TransitionEffect> {
        self.effects.insert(path, effect)
    }

    /// Effect applied when a loader switches onto `path`, if any.
    pub fn effect_for(&self, path: &PathId) -> Option<TransitionEffect> {
        self.effects.get(path).copied()
    }

    /// Overlay another table on this one; entries in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (path, effect) in &other.effects {
            self.effects.insert(path.clone(), *effect);
        }
    }

    /// Number of registered transitions.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Iterate over all registered transitions.
    pub fn iter(&self) -> impl Iterator<Item = (&PathId, &TransitionEffect)> {
        self.effects.iter()
    }
}

impl FromIterator<(PathId, TransitionEffect)> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = (PathId, TransitionEffect)>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}
