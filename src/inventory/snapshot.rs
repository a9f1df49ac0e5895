//! File-backed inventory snapshots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::InventorySource;
use crate::catalog::ItemId;
use crate::config::InventorySettings;
use crate::error::{GearplanError, Result};

/// Kind of item container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Main inventory bags.
    Bags,
    /// Currently equipped gear.
    Equipped,
    /// Armoury chest.
    Armoury,
    /// Chocobo saddlebag.
    Saddlebag,
    /// A retainer's inventory.
    Retainer,
    /// Items purchasable with currency already held.
    ShopStock,
}

impl ContainerKind {
    /// Whether the settings include this kind of container.
    pub fn included(self, settings: &InventorySettings) -> bool {
        match self {
            Self::Bags | Self::Equipped => true,
            Self::Armoury => settings.include_armoury,
            Self::Saddlebag => settings.include_saddlebag,
            Self::Retainer => settings.include_retainers,
            Self::ShopStock => settings.include_shop_stock,
        }
    }
}

/// A quantity of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItemStack {
    pub item_id: ItemId,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

/// One container's contents as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Container {
    pub kind: ContainerKind,

    /// Display name, e.g. a retainer's name.
    #[serde(default)]
    pub name: String,

    /// False while the container is being reloaded and cannot be read.
    #[serde(default = "available")]
    pub available: bool,

    #[serde(default)]
    pub items: Vec<ItemStack>,
}

fn available() -> bool {
    true
}

/// On-disk inventory file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InventoryFile {
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl InventoryFile {
    /// Load an inventory file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GearplanError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GearplanError::Io(e)
            }
        })?;
        serde_yaml::from_str(&content).map_err(|e| GearplanError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Owned quantity per item id, merged across included containers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    quantities: BTreeMap<ItemId, u32>,
    unavailable: Vec<String>,
}

impl InventorySnapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build directly from quantities. Repeated ids are summed.
    pub fn from_quantities(items: impl IntoIterator<Item = (ItemId, u32)>) -> Self {
        let mut snapshot = Self::new();
        for (item, quantity) in items {
            snapshot.add(item, quantity);
        }
        snapshot
    }

    /// Merge containers the settings include.
    ///
    /// Unavailable containers count as empty and are remembered so the
    /// caller can report them; the next snapshot picks them up again.
    pub fn collect(containers: &[Container], settings: &InventorySettings) -> Self {
        let mut snapshot = Self::new();
        for container in containers.iter().filter(|c| c.kind.included(settings)) {
            if !container.available {
                let err = GearplanError::TransientUnavailable {
                    source_name: container_label(container),
                };
                tracing::warn!("{}", err);
                snapshot.unavailable.push(container_label(container));
                continue;
            }
            for stack in &container.items {
                snapshot.add(stack.item_id, stack.quantity);
            }
        }
        tracing::debug!(
            "Inventory snapshot: {} distinct items from {} containers",
            snapshot.quantities.len(),
            containers.len()
        );
        snapshot
    }

    /// Add units of an item.
    pub fn add(&mut self, item: ItemId, quantity: u32) {
        let entry = self.quantities.entry(item).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, item: impl Into<ItemId>, quantity: u32) -> Self {
        self.add(item.into(), quantity);
        self
    }

    /// Containers skipped because they were unavailable.
    pub fn unavailable(&self) -> &[String] {
        &self.unavailable
    }

    /// Number of distinct items owned.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Whether nothing is owned.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Owned items in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.quantities.iter().map(|(id, qty)| (*id, *qty))
    }
}

impl InventorySource for InventorySnapshot {
    fn owned_quantity(&self, item: ItemId) -> u32 {
        self.quantities.get(&item).copied().unwrap_or(0)
    }
}

fn container_label(container: &Container) -> String {
    if container.name.is_empty() {
        format!("{:?}", container.kind).to_lowercase()
    } else {
        container.name.clone()
    }
}
