//! Static item metadata.
//!
//! The catalog answers "what is this item" for the rest of the crate:
//! display name, stat type, whether it can be obtained without spending
//! inventory, its HQ pairing and the upgrade chain that leads to it.
//! It is read-only for the lifetime of a session.
//!
//! # Modules
//!
//! - [`item`] - Item ids and metadata records
//! - [`jobs`] - Class/job abbreviation table

pub mod item;
pub mod jobs;

pub use item::{ItemId, ItemInfo, MateriaInfo};
pub use jobs::{class_job_id, job_abbreviation};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{GearplanError, Result};

/// Read-only item metadata lookup.
pub trait ItemCatalog: Send + Sync {
    /// Look up an item. HQ ids fall back to their NQ entry.
    fn lookup(&self, id: ItemId) -> Option<&ItemInfo>;

    /// Whether the catalog knows this item.
    fn contains(&self, id: ItemId) -> bool {
        self.lookup(id).is_some()
    }

    /// Convert an id to its HQ variant when the item has one.
    fn convert_to_hq(&self, id: ItemId) -> ItemId {
        match self.lookup(id) {
            Some(info) if info.can_be_hq => id.to_hq(),
            _ => id,
        }
    }

    /// Display name, or the raw id for unknown items.
    fn display_name(&self, id: ItemId) -> String {
        match self.lookup(id) {
            Some(info) if id.is_hq() => format!("{} (HQ)", info.name),
            Some(info) => info.name.clone(),
            None => format!("#{}", id),
        }
    }

    /// Attach chance (percent) for a materia in the given socket of a gear item.
    ///
    /// Sockets below the gear's guaranteed count always attach; overmeld
    /// sockets use the materia's overmeld table and fall back to 0.
    fn attach_chance(&self, gear: ItemId, materia: ItemId, socket: usize) -> f64 {
        let guaranteed = self
            .lookup(gear)
            .map(|info| info.materia_slot_count as usize)
            .unwrap_or(2);
        if socket < guaranteed {
            return 100.0;
        }
        self.lookup(materia)
            .and_then(|info| info.materia.as_ref())
            .and_then(|m| m.overmeld_chances.get(socket - guaranteed).copied())
            .unwrap_or(0.0)
    }
}

/// On-disk catalog layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// All known items.
    #[serde(default)]
    pub items: Vec<ItemInfo>,
}

/// A catalog backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: HashMap<ItemId, ItemInfo>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from item records. Later duplicates replace earlier ones.
    pub fn from_items(items: impl IntoIterator<Item = ItemInfo>) -> Self {
        let items = items.into_iter().map(|info| (info.id, info)).collect();
        Self { items }
    }

    /// Insert or replace an item.
    pub fn insert(&mut self, info: ItemInfo) {
        self.items.insert(info.id, info);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load a catalog from a YAML (or JSON) file.
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
        let file: CatalogFile =
            serde_yaml::from_str(&content).map_err(|e| GearplanError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!("Loaded {} catalog items from {}", file.items.len(), path.display());
        Ok(Self::from_items(file.items))
    }
}

impl ItemCatalog for StaticCatalog {
    fn lookup(&self, id: ItemId) -> Option<&ItemInfo> {
        self.items
            .get(&id)
            .or_else(|| id.is_hq().then(|| self.items.get(&id.to_nq())).flatten())
    }
}
