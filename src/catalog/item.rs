//! Item identity and metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::GearpieceSlot;

/// Numeric game item id.
///
/// High-quality variants live at `nq + HQ_OFFSET` and convert back and forth
/// with [`ItemId::to_hq`] / [`ItemId::to_nq`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Offset between an NQ item id and its HQ counterpart.
    pub const HQ_OFFSET: u32 = 1_000_000;

    /// Create a new item id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this id refers to an HQ variant.
    pub fn is_hq(self) -> bool {
        self.0 > Self::HQ_OFFSET && self.0 < 2 * Self::HQ_OFFSET
    }

    /// The HQ variant of this id (idempotent).
    pub fn to_hq(self) -> Self {
        if self.is_hq() || self.0 == 0 {
            self
        } else {
            Self(self.0 + Self::HQ_OFFSET)
        }
    }

    /// The NQ variant of this id (idempotent).
    pub fn to_nq(self) -> Self {
        if self.is_hq() {
            Self(self.0 - Self::HQ_OFFSET)
        } else {
            self
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Materia-specific metadata for catalog entries that are materia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MateriaInfo {
    /// Stat the materia raises (e.g. "Critical Hit").
    pub stat_type: String,

    /// Materia grade/tier (I..XII as 1..12).
    pub grade: u8,

    /// Amount of stat granted.
    #[serde(default)]
    pub stat_strength: u16,

    /// Attach chance (percent) for each overmeld socket past the guaranteed
    /// ones, in socket order.
    #[serde(default)]
    pub overmeld_chances: Vec<f64>,
}

/// Catalog metadata for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemInfo {
    /// Item id (NQ id for items that have an HQ variant).
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Icon id for rendering.
    #[serde(default)]
    pub icon_id: u32,

    /// Primary stat type, if any.
    #[serde(default)]
    pub stat_type: Option<String>,

    /// Equipment slot for gear items.
    #[serde(default)]
    pub slot: Option<GearpieceSlot>,

    /// Whether this item is consumed to obtain another item.
    #[serde(default)]
    pub is_prerequisite_source: bool,

    /// Whether the item can be crafted or bought with no inventory cost.
    #[serde(default)]
    pub is_directly_obtainable: bool,

    /// Whether an HQ variant exists.
    #[serde(default)]
    pub can_be_hq: bool,

    /// Guaranteed materia sockets for gear items.
    #[serde(default = "default_materia_slots")]
    pub materia_slot_count: u8,

    /// Items consumed to obtain this one, nearest-to-target first.
    #[serde(default)]
    pub prerequisites: Vec<ItemId>,

    /// Materia metadata when this item is a materia.
    #[serde(default)]
    pub materia: Option<MateriaInfo>,
}

fn default_materia_slots() -> u8 {
    2
}

impl ItemInfo {
    /// Minimal entry with only an id and a name.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon_id: 0,
            stat_type: None,
            slot: None,
            is_prerequisite_source: false,
            is_directly_obtainable: false,
            can_be_hq: false,
            materia_slot_count: default_materia_slots(),
            prerequisites: Vec::new(),
            materia: None,
        }
    }

    /// Builder: mark as directly obtainable.
    pub fn directly_obtainable(mut self) -> Self {
        self.is_directly_obtainable = true;
        self
    }

    /// Builder: set the upgrade chain.
    pub fn with_prerequisites(mut self, prerequisites: Vec<ItemId>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    /// Builder: set the equipment slot.
    pub fn with_slot(mut self, slot: GearpieceSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Builder: attach materia metadata.
    pub fn with_materia(mut self, materia: MateriaInfo) -> Self {
        self.stat_type = Some(materia.stat_type.clone());
        self.materia = Some(materia);
        self
    }

    /// Whether this item is a materia.
    pub fn is_materia(&self) -> bool {
        self.materia.is_some()
    }
}
