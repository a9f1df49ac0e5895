//! The output of one solver pass.

use serde::Serialize;
use std::collections::BTreeMap;

use super::ledger::{AssignmentLedger, RequirementKey};
use super::query::RequirementFilter;
use super::state::RequirementState;
use crate::catalog::ItemId;
use crate::model::{AllItemRequirements, GearpieceId, GearsetId, RequirementKind, RequirementSlot};

/// Per-requirement states, per-gearpiece aggregates and the claim ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub(crate) ledger: AssignmentLedger,
    pub(crate) requirements: BTreeMap<RequirementKey, RequirementState>,
    pub(crate) gearpieces: BTreeMap<GearpieceId, RequirementState>,
    pub(crate) gearsets: Vec<GearsetProgress>,
    pub(crate) items: AllItemRequirements,
    pub(crate) unknown_items: Vec<ItemId>,
}

/// Collection progress of one active gearset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GearsetProgress {
    pub gearset: GearsetId,
    pub collected: usize,
    pub total: usize,
}

impl Resolution {
    /// Claim ledger of the pass.
    pub fn ledger(&self) -> &AssignmentLedger {
        &self.ledger
    }

    /// The all-item-requirements view the pass resolved.
    pub fn requirements(&self) -> &AllItemRequirements {
        &self.items
    }

    /// State of one requirement.
    pub fn state(&self, gearpiece: GearpieceId, slot: RequirementSlot) -> Option<RequirementState> {
        self.requirements
            .get(&RequirementKey::new(gearpiece, slot))
            .copied()
    }

    /// Aggregate state of a gearpiece.
    pub fn gearpiece_state(&self, gearpiece: GearpieceId) -> Option<RequirementState> {
        self.gearpieces.get(&gearpiece).copied()
    }

    /// Every requirement state in key order.
    pub fn requirement_states(&self) -> impl Iterator<Item = (RequirementKey, RequirementState)> + '_ {
        self.requirements.iter().map(|(k, s)| (*k, *s))
    }

    /// Progress of each active gearset in priority order.
    pub fn gearset_progress(&self) -> &[GearsetProgress] {
        &self.gearsets
    }

    /// Item ids the catalog did not know, sorted and de-duplicated.
    pub fn unknown_items(&self) -> &[ItemId] {
        &self.unknown_items
    }

    /// Worst state among the entries for `item` that pass `filter`.
    ///
    /// Gearpiece entries use the gearpiece's aggregate state. Returns `None`
    /// when the item is not required or every entry was filtered out.
    pub fn resolution_state(
        &self,
        item: ItemId,
        filter: RequirementFilter,
    ) -> Option<RequirementState> {
        let requirement = self.items.get(item)?;
        requirement
            .owners
            .iter()
            .filter_map(|owner| {
                let kind = owner.kind();
                let state = match kind {
                    RequirementKind::Gearpiece => self.gearpiece_state(owner.gearpiece)?,
                    _ => self.state(owner.gearpiece, owner.slot)?,
                };
                filter.admits(kind, state).then_some(state)
            })
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequirementOwner;

    fn owner(gp: u32, slot: RequirementSlot) -> RequirementOwner {
        RequirementOwner {
            gearset: GearsetId::new(1),
            gearpiece: GearpieceId::new(gp),
            slot,
        }
    }

    fn resolution() -> Resolution {
        let mut resolution = Resolution::default();
        let item = ItemId::new(7);
        resolution.items.push(item, owner(1, RequirementSlot::Target));
        resolution.items.push(item, owner(2, RequirementSlot::Prerequisite(0)));
        resolution
            .gearpieces
            .insert(GearpieceId::new(1), RequirementState::Collected);
        resolution.requirements.insert(
            RequirementKey::new(GearpieceId::new(1), RequirementSlot::Target),
            RequirementState::Collected,
        );
        resolution.requirements.insert(
            RequirementKey::new(GearpieceId::new(2), RequirementSlot::Prerequisite(0)),
            RequirementState::ObtainableFull,
        );
        resolution
    }

    #[test]
    fn resolution_state_takes_worst_admitted_entry() {
        let resolution = resolution();
        assert_eq!(
            resolution.resolution_state(ItemId::new(7), RequirementFilter::everything()),
            Some(RequirementState::ObtainableFull)
        );
    }

    #[test]
    fn resolution_state_respects_filter() {
        let resolution = resolution();
        let no_prereqs = RequirementFilter {
            include_prerequisites: false,
            ..Default::default()
        };
        // the only remaining entry is collected, hidden by default
        assert_eq!(resolution.resolution_state(ItemId::new(7), no_prereqs), None);
        assert_eq!(resolution.resolution_state(ItemId::new(8), no_prereqs), None);
    }
}
