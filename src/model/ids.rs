//! Stable arena identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque id of a gearset inside a [`GearsetStore`](super::GearsetStore).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GearsetId(u32);

impl GearsetId {
    /// Create an id from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GearsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs{}", self.0)
    }
}

/// Opaque id of a gearpiece, unique across the whole store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GearpieceId(u32);

impl GearpieceId {
    /// Create an id from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GearpieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gp{}", self.0)
    }
}
