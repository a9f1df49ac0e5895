//! Requirement satisfaction states.

use serde::Serialize;
use std::fmt;

/// How far a requirement is from being met.
///
/// Variants are declared worst-first so `Ord` ranks them and the worst of a
/// set is its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementState {
    /// Not owned and cannot be obtained without spending inventory.
    NotObtainable,
    /// Part of the prerequisite chain is in hand.
    ObtainablePartial,
    /// Everything needed to obtain it is in hand or freely obtainable.
    ObtainableFull,
    /// Owned and claimed, or already flagged collected.
    Collected,
}

impl RequirementState {
    /// Whether this is one of the two obtainable states.
    pub fn is_obtainable(self) -> bool {
        matches!(self, Self::ObtainablePartial | Self::ObtainableFull)
    }

    /// Short label for tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotObtainable => "not obtainable",
            Self::ObtainablePartial => "partial",
            Self::ObtainableFull => "obtainable",
            Self::Collected => "collected",
        }
    }
}

impl fmt::Display for RequirementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
