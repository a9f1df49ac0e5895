//! The gearset arena.
//!
//! [`GearsetStore`] owns every gearset and hands out stable ids. Gearsets and
//! gearpieces never point at each other; all navigation goes through the
//! store. Every mutation records a [`ModelChange`] that the change pipeline
//! drains with [`GearsetStore::take_changes`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::gearpiece::Gearpiece;
use super::gearset::Gearset;
use super::ids::{GearpieceId, GearsetId};
use super::priority::PriorityPolicy;
use super::requirements::{AllItemRequirements, RequirementOwner};
use super::slot::RequirementSlot;
use crate::catalog::ItemId;
use crate::error::{GearplanError, Result};

/// What kind of mutation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChangeKind {
    Added,
    Removed,
    ActiveToggled,
    CollectedToggled,
    Reordered,
    Renamed,
    PolicyChanged,
}

/// A recorded mutation of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelChange {
    pub kind: ModelChangeKind,

    /// Gearset touched, if the change was about one gearset.
    pub gearset: Option<GearsetId>,

    /// Whether assignments may differ after this change.
    pub effects_assignments: bool,
}

impl ModelChange {
    fn new(kind: ModelChangeKind, gearset: Option<GearsetId>, effects_assignments: bool) -> Self {
        Self {
            kind,
            gearset,
            effects_assignments,
        }
    }
}

/// Arena of gearsets addressed by [`GearsetId`].
#[derive(Debug, Clone, Default)]
pub struct GearsetStore {
    gearsets: Vec<Gearset>,
    next_gearset: u32,
    next_gearpiece: u32,
    policy: PriorityPolicy,
    pending: Vec<ModelChange>,
}

impl GearsetStore {
    /// Create an empty store with the default priority policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from gearsets, validating each one.
    pub fn from_gearsets(gearsets: impl IntoIterator<Item = Gearset>) -> Result<Self> {
        let mut store = Self::new();
        for gearset in gearsets {
            store.add_gearset(gearset)?;
        }
        store.pending.clear();
        Ok(store)
    }

    // --- Queries ---

    /// Gearsets in store (listed) order.
    pub fn iter(&self) -> impl Iterator<Item = &Gearset> {
        self.gearsets.iter()
    }

    /// Number of gearsets.
    pub fn len(&self) -> usize {
        self.gearsets.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.gearsets.is_empty()
    }

    /// Look up a gearset.
    pub fn get(&self, id: GearsetId) -> Option<&Gearset> {
        self.gearsets.iter().find(|g| g.id == id)
    }

    /// Look up a gearpiece and the gearset holding it.
    pub fn gearpiece(&self, id: GearpieceId) -> Option<(&Gearset, &Gearpiece)> {
        self.gearsets.iter().find_map(|gs| {
            gs.gearpieces
                .iter()
                .find(|gp| gp.id == id)
                .map(|gp| (gs, gp))
        })
    }

    /// First gearset with the given name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Gearset> {
        self.gearsets
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Active priority policy.
    pub fn priority_policy(&self) -> PriorityPolicy {
        self.policy
    }

    /// All gearsets in priority order.
    pub fn ordered(&self) -> Vec<&Gearset> {
        self.policy.order(&self.gearsets)
    }

    /// Active gearsets in priority order.
    pub fn active_ordered(&self) -> Vec<&Gearset> {
        self.ordered().into_iter().filter(|g| g.is_active).collect()
    }

    /// Flattened item requirements over active gearsets.
    ///
    /// Follows resolution order: gearsets by priority, gearpieces by slot,
    /// then target, prerequisite chain and uncollected materia.
    pub fn all_item_requirements(&self) -> AllItemRequirements {
        let mut all = AllItemRequirements::new();
        for gearset in self.active_ordered() {
            for piece in &gearset.gearpieces {
                let owner = |slot: RequirementSlot| RequirementOwner {
                    gearset: gearset.id,
                    gearpiece: piece.id,
                    slot,
                };
                all.push(piece.item_id, owner(RequirementSlot::Target));
                for (i, link) in piece.prerequisites.iter().enumerate() {
                    all.push(link.item_id, owner(RequirementSlot::Prerequisite(i)));
                }
                for (i, materia) in piece.materia.iter().enumerate() {
                    if !materia.is_collected {
                        all.push(materia.item_id, owner(RequirementSlot::Materia(i)));
                    }
                }
            }
        }
        all
    }

    /// Drain changes recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<ModelChange> {
        std::mem::take(&mut self.pending)
    }

    // --- Mutations ---

    /// Validate and insert a gearset at the end of the list.
    ///
    /// Gearpieces are sorted into slot order and get fresh ids.
    pub fn add_gearset(&mut self, mut gearset: Gearset) -> Result<GearsetId> {
        validate_gearset(&gearset)?;

        self.next_gearset += 1;
        let id = GearsetId::new(self.next_gearset);
        gearset.id = id;
        gearset.name = gearset.name.trim().to_string();
        gearset.gearpieces.sort_by_key(|gp| gp.slot);
        for piece in &mut gearset.gearpieces {
            self.next_gearpiece += 1;
            piece.id = GearpieceId::new(self.next_gearpiece);
        }
        let now = Utc::now();
        gearset.created_at.get_or_insert(now);
        gearset.modified_at = Some(now);

        tracing::debug!(
            "Added gearset '{}' ({}) with {} gearpieces",
            gearset.name,
            id,
            gearset.gearpieces.len()
        );
        let active = gearset.is_active;
        self.gearsets.push(gearset);
        self.record(ModelChangeKind::Added, Some(id), active);
        Ok(id)
    }

    /// Remove a gearset, returning it.
    pub fn remove_gearset(&mut self, id: GearsetId) -> Result<Gearset> {
        let index = self.index_of(id)?;
        let removed = self.gearsets.remove(index);
        self.record(ModelChangeKind::Removed, Some(id), removed.is_active);
        Ok(removed)
    }

    /// Toggle whether a gearset participates in assignment.
    pub fn set_active(&mut self, id: GearsetId, active: bool) -> Result<ModelChange> {
        let index = self.index_of(id)?;
        let gearset = &mut self.gearsets[index];
        let changed = gearset.is_active != active;
        gearset.is_active = active;
        gearset.modified_at = Some(Utc::now());
        Ok(self.record(ModelChangeKind::ActiveToggled, Some(id), changed))
    }

    /// Flag a gearpiece's target as collected or not.
    pub fn set_gearpiece_collected(
        &mut self,
        id: GearpieceId,
        collected: bool,
    ) -> Result<ModelChange> {
        self.update_gearpiece(id, |piece| {
            let changed = piece.is_collected != collected;
            piece.is_collected = collected;
            Ok(changed)
        })
    }

    /// Flag one link of a gearpiece's prerequisite chain.
    pub fn set_prerequisite_collected(
        &mut self,
        id: GearpieceId,
        index: usize,
        collected: bool,
    ) -> Result<ModelChange> {
        self.update_gearpiece(id, |piece| {
            let link = piece.prerequisites.get_mut(index).ok_or_else(|| {
                GearplanError::invalid(format!("{} has no prerequisite {}", id, index))
            })?;
            let changed = link.is_collected != collected;
            link.is_collected = collected;
            Ok(changed)
        })
    }

    /// Flag one materia socket of a gearpiece as melded or not.
    pub fn set_materia_collected(
        &mut self,
        id: GearpieceId,
        index: usize,
        collected: bool,
    ) -> Result<ModelChange> {
        self.update_gearpiece(id, |piece| {
            let materia = piece.materia.get_mut(index).ok_or_else(|| {
                GearplanError::invalid(format!("{} has no materia socket {}", id, index))
            })?;
            let changed = materia.is_collected != collected;
            materia.is_collected = collected;
            Ok(changed)
        })
    }

    /// Move a gearset to a new position in the listed order.
    pub fn move_gearset(&mut self, id: GearsetId, position: usize) -> Result<ModelChange> {
        let index = self.index_of(id)?;
        let position = position.min(self.gearsets.len() - 1);
        let gearset = self.gearsets.remove(index);
        self.gearsets.insert(position, gearset);
        Ok(self.record(ModelChangeKind::Reordered, Some(id), index != position))
    }

    /// Rename a gearset. Never affects assignments.
    pub fn rename_gearset(&mut self, id: GearsetId, name: &str) -> Result<ModelChange> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GearplanError::invalid("gearset name cannot be empty"));
        }
        let index = self.index_of(id)?;
        let gearset = &mut self.gearsets[index];
        gearset.name = name.to_string();
        gearset.modified_at = Some(Utc::now());
        Ok(self.record(ModelChangeKind::Renamed, Some(id), false))
    }

    /// Change the priority policy.
    pub fn set_priority_policy(&mut self, policy: PriorityPolicy) -> ModelChange {
        let changed = self.policy != policy;
        self.policy = policy;
        self.record(ModelChangeKind::PolicyChanged, None, changed)
    }

    fn index_of(&self, id: GearsetId) -> Result<usize> {
        self.gearsets
            .iter()
            .position(|g| g.id == id)
            .ok_or(GearplanError::UnknownGearset { id })
    }

    fn update_gearpiece(
        &mut self,
        id: GearpieceId,
        update: impl FnOnce(&mut Gearpiece) -> Result<bool>,
    ) -> Result<ModelChange> {
        let (gearset, piece) = self
            .gearsets
            .iter_mut()
            .find_map(|gs| {
                let gearset_id = gs.id;
                let piece = gs.gearpieces.iter_mut().find(|gp| gp.id == id)?;
                Some((gearset_id, piece))
            })
            .ok_or(GearplanError::UnknownGearpiece { id })?;
        let changed = update(piece)?;
        if let Some(gs) = self.gearsets.iter_mut().find(|g| g.id == gearset) {
            gs.modified_at = Some(Utc::now());
        }
        Ok(self.record(ModelChangeKind::CollectedToggled, Some(gearset), changed))
    }

    fn record(
        &mut self,
        kind: ModelChangeKind,
        gearset: Option<GearsetId>,
        effects_assignments: bool,
    ) -> ModelChange {
        let change = ModelChange::new(kind, gearset, effects_assignments);
        self.pending.push(change);
        change
    }
}

/// Reject malformed gearsets before they enter the store.
pub fn validate_gearset(gearset: &Gearset) -> Result<()> {
    if gearset.name.trim().is_empty() {
        return Err(GearplanError::invalid("gearset name cannot be empty"));
    }
    if gearset.gearpieces.is_empty() {
        return Err(GearplanError::invalid(format!(
            "gearset '{}' has no gearpieces",
            gearset.name
        )));
    }

    let mut slots = HashSet::new();
    for piece in &gearset.gearpieces {
        if !slots.insert(piece.slot) {
            return Err(GearplanError::invalid(format!(
                "gearset '{}' has more than one {} gearpiece",
                gearset.name, piece.slot
            )));
        }
        let items = std::iter::once(piece.item_id)
            .chain(piece.prerequisites.iter().map(|p| p.item_id))
            .chain(piece.materia.iter().map(|m| m.item_id));
        for item in items {
            if item == ItemId::default() {
                return Err(GearplanError::invalid(format!(
                    "gearset '{}' {} references item id 0",
                    gearset.name, piece.slot
                )));
            }
        }
        for materia in &piece.materia {
            let chance = materia.percent_chance_to_attach;
            if !chance.is_finite() || !(0.0..=100.0).contains(&chance) {
                return Err(GearplanError::invalid(format!(
                    "gearset '{}' {} has attach chance {} outside 0-100",
                    gearset.name, piece.slot, chance
                )));
            }
        }
    }
    Ok(())
}

/// On-disk gearsets file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GearsetsFile {
    /// Gearsets in priority order.
    #[serde(default)]
    pub gearsets: Vec<Gearset>,
}

impl GearsetsFile {
    /// Load a gearsets file. A missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| GearplanError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save using write-to-temp-then-rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let content = serde_yaml::to_string(self).map_err(|e| {
            GearplanError::ConfigValidationError {
                message: format!("Failed to serialize gearsets: {}", e),
            }
        })?;
        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Build a store from the file's gearsets.
    pub fn into_store(self) -> Result<GearsetStore> {
        GearsetStore::from_gearsets(self.gearsets)
    }
}

impl From<&GearsetStore> for GearsetsFile {
    fn from(store: &GearsetStore) -> Self {
        Self {
            gearsets: store.iter().cloned().collect(),
        }
    }
}
