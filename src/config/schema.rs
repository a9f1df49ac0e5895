//! Configuration schema.
//!
//! One YAML document per config layer. Every field has a default, so an
//! empty or missing file yields [`Settings::default`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::materia::{Confidence, RoundingPolicy};
use crate::model::PriorityPolicy;
use crate::solver::RequirementFilter;

/// Merged gearplan configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Target probability that all melds of a materia succeed (0.01-0.99).
    pub meld_confidence: f64,

    /// How per-socket needs are rounded.
    pub materia_rounding: RoundingPolicy,

    /// Which gearsets claim owned items first.
    pub priority: PriorityPolicy,

    /// Which containers count as owned.
    pub inventory: InventorySettings,

    /// Default filter for per-item highlight queries.
    pub highlight: RequirementFilter,

    /// Data file locations.
    pub files: FilesSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meld_confidence: Confidence::DEFAULT,
            materia_rounding: RoundingPolicy::default(),
            priority: PriorityPolicy::default(),
            inventory: InventorySettings::default(),
            highlight: RequirementFilter::default(),
            files: FilesSettings::default(),
        }
    }
}

impl Settings {
    /// The configured confidence, clamped.
    pub fn confidence(&self) -> Confidence {
        Confidence::new(self.meld_confidence)
    }

    /// Whether moving from `self` to `next` can change assignments.
    ///
    /// Only the priority policy reorders claims. Inventory container
    /// choices reach the solver as a new snapshot instead.
    pub fn effects_assignments(&self, next: &Settings) -> bool {
        self.priority != next.priority
    }
}

/// Which inventory containers are counted as owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InventorySettings {
    pub include_retainers: bool,
    pub include_saddlebag: bool,
    pub include_armoury: bool,
    /// Count items purchasable with currency already held.
    pub include_shop_stock: bool,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            include_retainers: true,
            include_saddlebag: true,
            include_armoury: true,
            include_shop_stock: false,
        }
    }
}

/// Data file paths, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilesSettings {
    pub gearsets: PathBuf,
    pub inventory: PathBuf,
    pub catalog: PathBuf,
}

impl Default for FilesSettings {
    fn default() -> Self {
        Self {
            gearsets: PathBuf::from(".gearplan/gearsets.yml"),
            inventory: PathBuf::from(".gearplan/inventory.yml"),
            catalog: PathBuf::from(".gearplan/catalog.yml"),
        }
    }
}
