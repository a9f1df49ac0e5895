//! Equipment slots and requirement slots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Equipment slot of a gearpiece. Declaration order is the resolution order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GearpieceSlot {
    MainHand,
    OffHand,
    Head,
    Body,
    Hands,
    Legs,
    Feet,
    Ears,
    Neck,
    Wrists,
    FingerLeft,
    FingerRight,
}

impl GearpieceSlot {
    /// All slots in resolution order.
    pub const ALL: [GearpieceSlot; 12] = [
        Self::MainHand,
        Self::OffHand,
        Self::Head,
        Self::Body,
        Self::Hands,
        Self::Legs,
        Self::Feet,
        Self::Ears,
        Self::Neck,
        Self::Wrists,
        Self::FingerLeft,
        Self::FingerRight,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MainHand => "Main Hand",
            Self::OffHand => "Off Hand",
            Self::Head => "Head",
            Self::Body => "Body",
            Self::Hands => "Hands",
            Self::Legs => "Legs",
            Self::Feet => "Feet",
            Self::Ears => "Ears",
            Self::Neck => "Neck",
            Self::Wrists => "Wrists",
            Self::FingerLeft => "Left Ring",
            Self::FingerRight => "Right Ring",
        }
    }
}

impl fmt::Display for GearpieceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GearpieceSlot {
    type Err = String;

    /// Accepts the snake_case names as well as the slot keys used by
    /// common gear planners (`Weapon`, `Hand`, `RingLeft`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "mainhand" | "weapon" | "weapon2h" | "weapon1h" => Ok(Self::MainHand),
            "offhand" | "shield" => Ok(Self::OffHand),
            "head" => Ok(Self::Head),
            "body" => Ok(Self::Body),
            "hands" | "hand" => Ok(Self::Hands),
            "legs" => Ok(Self::Legs),
            "feet" => Ok(Self::Feet),
            "ears" | "earrings" => Ok(Self::Ears),
            "neck" | "necklace" => Ok(Self::Neck),
            "wrists" | "wrist" | "bracelet" | "bracelets" => Ok(Self::Wrists),
            "fingerleft" | "ringleft" | "leftring" => Ok(Self::FingerLeft),
            "fingerright" | "ringright" | "rightring" => Ok(Self::FingerRight),
            _ => Err(format!("unknown gear slot: {}", s)),
        }
    }
}

/// Position of one requirement inside a gearpiece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum RequirementSlot {
    /// The gearpiece's own target item.
    Target,
    /// A link of the prerequisite chain, nearest-to-target first.
    Prerequisite(usize),
    /// A materia socket.
    Materia(usize),
}

impl fmt::Display for RequirementSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => f.write_str("target"),
            Self::Prerequisite(i) => write!(f, "prerequisite[{}]", i),
            Self::Materia(i) => write!(f, "materia[{}]", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_follows_equipment_layout() {
        assert!(GearpieceSlot::MainHand < GearpieceSlot::Head);
        assert!(GearpieceSlot::Wrists < GearpieceSlot::FingerLeft);
        assert!(GearpieceSlot::FingerLeft < GearpieceSlot::FingerRight);
    }

    #[test]
    fn parses_planner_slot_names() {
        assert_eq!("Weapon".parse(), Ok(GearpieceSlot::MainHand));
        assert_eq!("Hand".parse(), Ok(GearpieceSlot::Hands));
        assert_eq!("RingLeft".parse(), Ok(GearpieceSlot::FingerLeft));
        assert_eq!("finger_right".parse(), Ok(GearpieceSlot::FingerRight));
        assert!("Tail".parse::<GearpieceSlot>().is_err());
    }

    #[test]
    fn requirement_slot_display() {
        assert_eq!(RequirementSlot::Target.to_string(), "target");
        assert_eq!(RequirementSlot::Materia(2).to_string(), "materia[2]");
    }
}
