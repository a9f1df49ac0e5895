//! Filters for the per-item resolution query.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::state::RequirementState;
use crate::model::RequirementKind;

/// Which requirement entries count toward an item's resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RequirementFilter {
    /// Consider prerequisite-chain entries.
    pub include_prerequisites: bool,
    /// Consider materia entries.
    pub include_materia: bool,
    /// Consider entries that are already collected.
    pub include_collected: bool,
    /// Consider entries that are obtainable.
    pub include_obtainable: bool,
    /// Consider prerequisite entries that are collected.
    pub include_collected_prerequisites: bool,
}

impl Default for RequirementFilter {
    fn default() -> Self {
        Self {
            include_prerequisites: true,
            include_materia: true,
            include_collected: false,
            include_obtainable: true,
            include_collected_prerequisites: false,
        }
    }
}

impl RequirementFilter {
    /// A filter that admits every entry.
    pub fn everything() -> Self {
        Self {
            include_prerequisites: true,
            include_materia: true,
            include_collected: true,
            include_obtainable: true,
            include_collected_prerequisites: true,
        }
    }

    /// Whether an entry of `kind` in `state` passes the filter.
    pub fn admits(&self, kind: RequirementKind, state: RequirementState) -> bool {
        let kind_ok = match kind {
            RequirementKind::Gearpiece => true,
            RequirementKind::Prerequisite => self.include_prerequisites,
            RequirementKind::Materia => self.include_materia,
        };
        if !kind_ok {
            return false;
        }
        match state {
            RequirementState::Collected if kind == RequirementKind::Prerequisite => {
                self.include_collected_prerequisites
            }
            RequirementState::Collected => self.include_collected,
            RequirementState::ObtainableFull | RequirementState::ObtainablePartial => {
                self.include_obtainable
            }
            RequirementState::NotObtainable => true,
        }
    }
}
