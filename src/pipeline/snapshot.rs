//! Published pipeline results.

use std::sync::{Arc, RwLock};

use crate::materia::MateriaCounts;
use crate::overlap::OverlapGroup;
use crate::solver::Resolution;

/// Everything one pass produced.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Number of completed passes; the initial snapshot is generation 0.
    pub generation: u64,
    pub resolution: Arc<Resolution>,
    pub materia: MateriaCounts,
    pub overlaps: Vec<OverlapGroup>,
}

/// Cheap, cloneable read handle on the latest snapshot.
///
/// Readers clone the inner `Arc` out of the lock and never hold it across
/// work, so the worker is never blocked for long.
#[derive(Debug, Clone, Default)]
pub struct SnapshotReader {
    slot: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotReader {
    pub(crate) fn new(initial: Snapshot) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.slot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Latest resolution.
    pub fn latest(&self) -> Arc<Resolution> {
        Arc::clone(&self.snapshot().resolution)
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        let mut guard = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(snapshot);
    }
}
