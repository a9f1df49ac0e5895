//! Greedy, priority-ordered assignment of owned items to requirements.

use std::collections::{BTreeMap, BTreeSet};

use super::ledger::{AssignmentLedger, RequirementKey};
use super::resolution::{GearsetProgress, Resolution};
use super::state::RequirementState;
use crate::catalog::{ItemCatalog, ItemId};
use crate::inventory::InventorySource;
use crate::model::{Gearpiece, GearpieceId, GearsetStore, RequirementSlot};

/// Resolves every requirement of the active gearsets in one pass.
///
/// Requirements are visited in a fixed order: gearsets by priority,
/// gearpieces by slot, then each gearpiece's target, its prerequisite chain
/// from nearest-to-target outward, and finally its materia sockets. Each
/// visit claims at most one owned unit; nothing is ever reassigned, so the
/// first requirement in that order wins a contested item.
pub struct AssignmentSolver<'a> {
    catalog: &'a dyn ItemCatalog,
}

struct Pass<'a> {
    catalog: &'a dyn ItemCatalog,
    inventory: &'a dyn InventorySource,
    ledger: AssignmentLedger,
    requirements: BTreeMap<RequirementKey, RequirementState>,
    unknown: BTreeSet<ItemId>,
}

impl<'a> AssignmentSolver<'a> {
    pub fn new(catalog: &'a dyn ItemCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve the store against an inventory. Never fails.
    pub fn solve(&self, store: &GearsetStore, inventory: &dyn InventorySource) -> Resolution {
        let mut pass = Pass {
            catalog: self.catalog,
            inventory,
            ledger: AssignmentLedger::new(),
            requirements: BTreeMap::new(),
            unknown: BTreeSet::new(),
        };
        let mut gearpieces = BTreeMap::new();
        let mut gearsets = Vec::new();

        for gearset in store.active_ordered() {
            let mut collected = 0;
            for piece in &gearset.gearpieces {
                let state = pass.resolve_gearpiece(piece);
                if state == RequirementState::Collected {
                    collected += 1;
                }
                gearpieces.insert(piece.id(), state);
            }
            gearsets.push(GearsetProgress {
                gearset: gearset.id(),
                collected,
                total: gearset.gearpieces.len(),
            });
        }

        Resolution {
            ledger: pass.ledger,
            requirements: pass.requirements,
            gearpieces,
            gearsets,
            items: store.all_item_requirements(),
            unknown_items: pass.unknown.into_iter().collect(),
        }
    }
}

impl Pass<'_> {
    fn resolve_gearpiece(&mut self, piece: &Gearpiece) -> RequirementState {
        let id = piece.id();

        let target = if piece.is_collected {
            RequirementState::Collected
        } else {
            self.claim(piece.item_id)
        };
        self.record(id, RequirementSlot::Target, target);

        let aggregate = if target == RequirementState::Collected {
            // an owned target retires its chain
            for i in 0..piece.prerequisites.len() {
                self.record(id, RequirementSlot::Prerequisite(i), RequirementState::Collected);
            }
            RequirementState::Collected
        } else {
            let mut satisfied = 0;
            for (i, link) in piece.prerequisites.iter().enumerate() {
                let state = if link.is_collected {
                    RequirementState::Collected
                } else {
                    self.claim(link.item_id)
                };
                if matches!(
                    state,
                    RequirementState::Collected | RequirementState::ObtainableFull
                ) {
                    satisfied += 1;
                }
                self.record(id, RequirementSlot::Prerequisite(i), state);
            }
            let chain = match satisfied {
                0 => RequirementState::NotObtainable,
                n if n == piece.prerequisites.len() => RequirementState::ObtainableFull,
                _ => RequirementState::ObtainablePartial,
            };
            // progress on the chain never hides a target obtainable on its own
            target.max(chain)
        };

        for (i, materia) in piece.materia.iter().enumerate() {
            let state = if materia.is_collected {
                RequirementState::Collected
            } else {
                self.claim(materia.item_id)
            };
            self.record(id, RequirementSlot::Materia(i), state);
        }

        aggregate
    }

    /// Try to claim one unit; on failure fall back to the catalog's
    /// obtainability flag.
    fn claim(&mut self, item: ItemId) -> RequirementState {
        let Some(info) = self.catalog.lookup(item) else {
            self.unknown.insert(item);
            return RequirementState::NotObtainable;
        };
        if self.ledger.try_claim(item, self.inventory) {
            RequirementState::Collected
        } else if info.is_directly_obtainable {
            RequirementState::ObtainableFull
        } else {
            RequirementState::NotObtainable
        }
    }

    fn record(&mut self, gearpiece: GearpieceId, slot: RequirementSlot, state: RequirementState) {
        self.requirements
            .insert(RequirementKey::new(gearpiece, slot), state);
    }
}
