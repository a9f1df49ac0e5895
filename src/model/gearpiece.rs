//! Gearpieces, their prerequisite chains and materia sockets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::GearpieceId;
use super::slot::GearpieceSlot;
use crate::catalog::ItemId;

/// One materia socket requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MateriaRequirement {
    /// Materia item id.
    pub item_id: ItemId,

    /// Stat the materia raises.
    #[serde(default)]
    pub stat_type: String,

    /// Materia grade.
    #[serde(default)]
    pub level: u8,

    /// Chance (0-100) that a single meld attempt attaches.
    #[serde(default = "guaranteed_attach")]
    pub percent_chance_to_attach: f64,

    /// Set once the materia has been melded.
    #[serde(default)]
    pub is_collected: bool,
}

fn guaranteed_attach() -> f64 {
    100.0
}

impl MateriaRequirement {
    /// A socket with a guaranteed attach.
    pub fn new(item_id: impl Into<ItemId>) -> Self {
        Self {
            item_id: item_id.into(),
            stat_type: String::new(),
            level: 0,
            percent_chance_to_attach: guaranteed_attach(),
            is_collected: false,
        }
    }

    /// Builder: set the attach chance in percent.
    pub fn with_chance(mut self, percent: f64) -> Self {
        self.percent_chance_to_attach = percent;
        self
    }

    /// Builder: set stat and grade.
    pub fn with_stat(mut self, stat_type: impl Into<String>, level: u8) -> Self {
        self.stat_type = stat_type.into();
        self.level = level;
        self
    }

    /// Builder: mark as already melded.
    pub fn collected(mut self) -> Self {
        self.is_collected = true;
        self
    }

    /// Attach probability in `[0, 1]`.
    pub fn attach_probability(&self) -> f64 {
        (self.percent_chance_to_attach / 100.0).clamp(0.0, 1.0)
    }
}

/// One link of a prerequisite chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Prerequisite {
    /// Item consumed on the way to the target.
    pub item_id: ItemId,

    /// Set once the link has been consumed toward the target.
    #[serde(default)]
    pub is_collected: bool,
}

impl Prerequisite {
    /// An uncollected link.
    pub fn new(item_id: impl Into<ItemId>) -> Self {
        Self {
            item_id: item_id.into(),
            is_collected: false,
        }
    }
}

/// One equipment slot's requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Gearpiece {
    /// Assigned by the store.
    #[serde(skip)]
    #[schemars(skip)]
    pub(crate) id: GearpieceId,

    /// Equipment slot.
    pub slot: GearpieceSlot,

    /// Final target item.
    pub item_id: ItemId,

    /// Items needed before the target, nearest-to-target first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<Prerequisite>,

    /// Materia sockets in meld order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materia: Vec<MateriaRequirement>,

    /// Set once the target itself is owned or equipped.
    #[serde(default)]
    pub is_collected: bool,
}

impl Gearpiece {
    /// A gearpiece with no chain and no materia.
    pub fn new(slot: GearpieceSlot, item_id: impl Into<ItemId>) -> Self {
        Self {
            id: GearpieceId::default(),
            slot,
            item_id: item_id.into(),
            prerequisites: Vec::new(),
            materia: Vec::new(),
            is_collected: false,
        }
    }

    /// Builder: set the prerequisite chain.
    pub fn with_prerequisites(mut self, items: impl IntoIterator<Item = ItemId>) -> Self {
        self.prerequisites = items.into_iter().map(Prerequisite::new).collect();
        self
    }

    /// Builder: append a materia socket.
    pub fn with_materia(mut self, materia: MateriaRequirement) -> Self {
        self.materia.push(materia);
        self
    }

    /// Store-assigned id.
    pub fn id(&self) -> GearpieceId {
        self.id
    }

    /// Materia sockets that still need melding.
    pub fn outstanding_materia(&self) -> impl Iterator<Item = &MateriaRequirement> {
        self.materia.iter().filter(|m| !m.is_collected)
    }
}
