//! Which gearsets are "counted" for materia totals and overlap warnings.

use std::collections::BTreeSet;

use super::ids::GearsetId;
use super::store::GearsetStore;

/// A user selection of gearsets to count.
///
/// Starts as the active gearsets. When the store changes, ids that no longer
/// exist are dropped; an empty selection is re-seeded from the active set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountSelection {
    selected: BTreeSet<GearsetId>,
}

impl CountSelection {
    /// Select all active gearsets.
    pub fn active(store: &GearsetStore) -> Self {
        Self {
            selected: store.iter().filter(|g| g.is_active).map(|g| g.id()).collect(),
        }
    }

    /// Select exactly the given ids.
    pub fn of(ids: impl IntoIterator<Item = GearsetId>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    /// Select every gearset in the store.
    pub fn all(store: &GearsetStore) -> Self {
        Self::of(store.iter().map(|g| g.id()))
    }

    /// Reconcile with the store after it changed.
    pub fn refresh(&mut self, store: &GearsetStore) {
        if self.selected.is_empty() {
            *self = Self::active(store);
        } else {
            self.selected.retain(|id| store.get(*id).is_some());
        }
    }

    /// Toggle one gearset.
    pub fn toggle(&mut self, id: GearsetId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether a gearset is selected.
    pub fn contains(&self, id: GearsetId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of selected gearsets.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in id order.
    pub fn ids(&self) -> impl Iterator<Item = GearsetId> + '_ {
        self.selected.iter().copied()
    }
}
