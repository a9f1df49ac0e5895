//! Gearsets: named collections of gearpieces.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::gearpiece::Gearpiece;
use super::ids::GearsetId;

/// Where a gearset came from, kept for re-import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImportSourceType {
    /// Entered by hand.
    Manual,
    /// Native JSON export.
    Json,
    /// Xivgear planner document.
    Xivgear,
}

impl fmt::Display for ImportSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => f.write_str("manual"),
            Self::Json => f.write_str("json"),
            Self::Xivgear => f.write_str("xivgear"),
        }
    }
}

/// Origin metadata of a gearset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GearsetSource {
    /// Which import source produced it.
    pub source_type: ImportSourceType,
    /// Original url, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A named target equipment configuration for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Gearset {
    /// Assigned by the store.
    #[serde(skip)]
    #[schemars(skip)]
    pub(crate) id: GearsetId,

    /// Display name.
    pub name: String,

    /// Class/job id (0 when unknown).
    #[serde(default)]
    pub class_job_id: u32,

    /// Whether the gearset participates in assignment and aggregate counts.
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Origin metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<GearsetSource>,

    /// Gearpieces, kept in slot order by the store.
    pub gearpieces: Vec<Gearpiece>,

    /// When the gearset entered the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last mutation through the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub modified_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Gearset {
    /// An active, manually entered gearset.
    pub fn new(name: impl Into<String>, gearpieces: Vec<Gearpiece>) -> Self {
        Self {
            id: GearsetId::default(),
            name: name.into(),
            class_job_id: 0,
            is_active: true,
            source: None,
            gearpieces,
            created_at: None,
            modified_at: None,
        }
    }

    /// Builder: set the class job.
    pub fn with_job(mut self, class_job_id: u32) -> Self {
        self.class_job_id = class_job_id;
        self
    }

    /// Builder: set origin metadata.
    pub fn with_source(mut self, source_type: ImportSourceType, url: Option<String>) -> Self {
        self.source = Some(GearsetSource { source_type, url });
        self
    }

    /// Builder: set the active flag.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Store-assigned id.
    pub fn id(&self) -> GearsetId {
        self.id
    }

    /// Count of gearpieces flagged collected.
    pub fn collected_count(&self) -> usize {
        self.gearpieces.iter().filter(|gp| gp.is_collected).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GearpieceSlot;

    #[test]
    fn new_gearset_is_active_and_manual() {
        let gearset = Gearset::new("Savage", vec![]);
        assert!(gearset.is_active);
        assert!(gearset.source.is_none());
        assert_eq!(gearset.class_job_id, 0);
    }

    #[test]
    fn collected_count_counts_flagged_gearpieces() {
        let mut piece = Gearpiece::new(GearpieceSlot::Body, 20);
        piece.is_collected = true;
        let gearset = Gearset::new(
            "Savage",
            vec![piece, Gearpiece::new(GearpieceSlot::Head, 10)],
        );
        assert_eq!(gearset.collected_count(), 1);
    }

    #[test]
    fn deserializes_with_defaults() {
        let yaml = r#"
name: Crafted
source:
  source_type: xivgear
  url: https://xivgear.app/?page=sl|abc
gearpieces:
  - slot: head
    item_id: 10
"#;
        let gearset: Gearset = serde_yaml::from_str(yaml).unwrap();
        assert!(gearset.is_active);
        assert_eq!(
            gearset.source.unwrap().source_type,
            ImportSourceType::Xivgear
        );
        assert!(gearset.created_at.is_none());
    }

    #[test]
    fn source_type_displays_lowercase() {
        assert_eq!(ImportSourceType::Json.to_string(), "json");
    }
}
