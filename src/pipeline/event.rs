//! Messages into and notifications out of the change pipeline.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::inventory::InventorySource;
use crate::model::{CountSelection, GearsetStore};

/// Something changed that should trigger a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Owned quantities changed.
    Inventory,
    /// The gearset model changed outside the pipeline.
    Gearsets { effects_assignments: bool },
    /// A setting changed.
    Configuration { effects_assignments: bool },
}

impl ChangeEvent {
    /// Whether the event can change which requirement claims what.
    pub fn effects_assignments(&self) -> bool {
        match self {
            Self::Inventory => true,
            Self::Gearsets {
                effects_assignments,
            }
            | Self::Configuration {
                effects_assignments,
            } => *effects_assignments,
        }
    }
}

/// Broadcast to subscribers after a pass completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The gearset model changed.
    GearsetsChanged,
    /// Settings changed.
    ConfigurationChanged { effects_assignments: bool },
    /// A new snapshot was published.
    Resolved { generation: u64 },
}

pub(crate) type StoreEdit = Box<dyn FnOnce(&mut GearsetStore) -> Result<()> + Send>;

pub(crate) enum PipelineMessage {
    Request(ChangeEvent),
    ReplaceInventory(Arc<dyn InventorySource>),
    ReplaceSettings(Box<Settings>),
    ReplaceSelection(CountSelection),
    Edit(StoreEdit),
    Flush(Sender<u64>),
    Shutdown,
}
