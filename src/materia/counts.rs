//! Per-materia totals over a selection of gearsets.

use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

use super::estimator::{materia_needed, remaining, Confidence, MateriaGroup, RoundingPolicy};
use crate::catalog::{ItemCatalog, ItemId};
use crate::inventory::InventorySource;
use crate::model::{CountSelection, GearsetStore};

/// One row of the materia table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MateriaRow {
    pub materia: ItemId,
    pub name: String,
    pub stat_type: String,
    pub grade: u8,
    /// Outstanding sockets of this materia.
    pub slot_count: usize,
    pub needed: u32,
    pub inventory: u32,
    pub remaining: u32,
}

/// Column to sort the table by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MateriaSortColumn {
    #[default]
    Name,
    Stat,
    Slots,
    Needed,
    Inventory,
    Remaining,
}

impl FromStr for MateriaSortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "stat" => Ok(Self::Stat),
            "slots" => Ok(Self::Slots),
            "needed" => Ok(Self::Needed),
            "inventory" => Ok(Self::Inventory),
            "remaining" => Ok(Self::Remaining),
            _ => Err(format!("unknown sort column: {}", s)),
        }
    }
}

/// Materia needs for the counted gearsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MateriaCounts {
    groups: Vec<MateriaGroup>,
    rows: Vec<MateriaRow>,
    confidence: Confidence,
    policy: RoundingPolicy,
}

impl MateriaCounts {
    /// Group the uncollected materia of every selected gearset by item id.
    ///
    /// Rows follow first appearance in priority order until sorted.
    pub fn build(
        store: &GearsetStore,
        selection: &CountSelection,
        catalog: &dyn ItemCatalog,
        inventory: &dyn InventorySource,
        confidence: Confidence,
        policy: RoundingPolicy,
    ) -> Self {
        let mut groups: Vec<MateriaGroup> = Vec::new();
        let sockets = store
            .ordered()
            .into_iter()
            .filter(|g| selection.contains(g.id()))
            .flat_map(|g| g.gearpieces.iter())
            .flat_map(|gp| gp.outstanding_materia());
        for materia in sockets {
            let q = materia.attach_probability();
            match groups.iter_mut().find(|g| g.materia == materia.item_id) {
                Some(group) => group.push(q),
                None => groups.push(MateriaGroup::from_probabilities(materia.item_id, [q])),
            }
        }

        let rows = groups
            .iter()
            .map(|group| {
                let info = catalog.lookup(group.materia);
                let (stat_type, grade) = info
                    .and_then(|i| i.materia.as_ref())
                    .map(|m| (m.stat_type.clone(), m.grade))
                    .unwrap_or_default();
                MateriaRow {
                    materia: group.materia,
                    name: catalog.display_name(group.materia),
                    stat_type,
                    grade,
                    slot_count: group.slot_count(),
                    needed: 0,
                    inventory: inventory.owned_quantity(group.materia),
                    remaining: 0,
                }
            })
            .collect();

        let mut counts = Self {
            groups,
            rows,
            confidence,
            policy,
        };
        counts.recompute();
        counts
    }

    /// Re-evaluate needs for a new confidence from cached groups.
    pub fn set_confidence(&mut self, confidence: Confidence) {
        self.confidence = confidence;
        self.recompute();
    }

    /// Re-evaluate needs under a new rounding policy.
    pub fn set_policy(&mut self, policy: RoundingPolicy) {
        self.policy = policy;
        self.recompute();
    }

    /// Sort rows by a column. Ties keep their current order.
    pub fn sort(&mut self, column: MateriaSortColumn, descending: bool) {
        self.rows.sort_by(|a, b| {
            let ordering = compare(a, b, column);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    pub fn rows(&self) -> &[MateriaRow] {
        &self.rows
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Whether no outstanding materia were found.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn recompute(&mut self) {
        for row in &mut self.rows {
            if let Some(group) = self.groups.iter().find(|g| g.materia == row.materia) {
                row.needed = materia_needed(group, self.confidence, self.policy);
                row.remaining = remaining(row.needed, row.inventory);
            }
        }
    }
}

fn compare(a: &MateriaRow, b: &MateriaRow, column: MateriaSortColumn) -> Ordering {
    match column {
        MateriaSortColumn::Name => a.name.cmp(&b.name),
        MateriaSortColumn::Stat => a
            .stat_type
            .cmp(&b.stat_type)
            .then_with(|| a.grade.cmp(&b.grade)),
        MateriaSortColumn::Slots => a.slot_count.cmp(&b.slot_count),
        MateriaSortColumn::Needed => a.needed.cmp(&b.needed),
        MateriaSortColumn::Inventory => a.inventory.cmp(&b.inventory),
        MateriaSortColumn::Remaining => a.remaining.cmp(&b.remaining),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemInfo, MateriaInfo, StaticCatalog};
    use crate::inventory::InventorySnapshot;
    use crate::model::{Gearpiece, GearpieceSlot, Gearset, MateriaRequirement};

    fn materia_info(id: u32, name: &str, stat: &str, grade: u8) -> ItemInfo {
        ItemInfo::new(id, name).with_materia(MateriaInfo {
            stat_type: stat.into(),
            grade,
            stat_strength: 0,
            overmeld_chances: vec![],
        })
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::from_items([
            materia_info(500, "Savage Aim Materia XII", "Critical Hit", 12),
            materia_info(501, "Heavens' Eye Materia XII", "Direct Hit", 12),
        ])
    }

    fn store() -> GearsetStore {
        let piece = Gearpiece::new(GearpieceSlot::Head, 10)
            .with_materia(MateriaRequirement::new(500))
            .with_materia(MateriaRequirement::new(500).with_chance(70.0))
            .with_materia(MateriaRequirement::new(501).collected())
            .with_materia(MateriaRequirement::new(501));
        let other = Gearpiece::new(GearpieceSlot::Head, 11).with_materia(MateriaRequirement::new(501));
        GearsetStore::from_gearsets(vec![
            Gearset::new("A", vec![piece]),
            Gearset::new("B", vec![other]).active(false),
        ])
        .unwrap()
    }

    #[test]
    fn build_groups_outstanding_sockets_of_selected_gearsets() {
        let store = store();
        let catalog = catalog();
        let inventory = InventorySnapshot::new().with(500, 1);
        let counts = MateriaCounts::build(
            &store,
            &CountSelection::active(&store),
            &catalog,
            &inventory,
            Confidence::new(0.70),
            RoundingPolicy::Pooled,
        );

        let rows = counts.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].materia, ItemId::new(500));
        assert_eq!(rows[0].slot_count, 2);
        assert_eq!(rows[0].needed, 2);
        assert_eq!(rows[0].remaining, 1);
        assert_eq!(rows[1].slot_count, 1);
        assert_eq!(rows[1].stat_type, "Direct Hit");
    }

    #[test]
    fn confidence_change_recomputes_from_cache() {
        let store = store();
        let catalog = catalog();
        let inventory = InventorySnapshot::new();
        let mut counts = MateriaCounts::build(
            &store,
            &CountSelection::active(&store),
            &catalog,
            &inventory,
            Confidence::new(0.70),
            RoundingPolicy::Pooled,
        );
        counts.set_confidence(Confidence::new(0.91));
        assert_eq!(counts.rows()[0].needed, 3);
    }

    #[test]
    fn sort_by_remaining_descending() {
        let store = store();
        let catalog = catalog();
        let inventory = InventorySnapshot::new();
        let mut counts = MateriaCounts::build(
            &store,
            &CountSelection::all(&store),
            &catalog,
            &inventory,
            Confidence::default(),
            RoundingPolicy::Pooled,
        );
        counts.sort(MateriaSortColumn::Name, false);
        assert_eq!(counts.rows()[0].materia, ItemId::new(501));
        counts.sort(MateriaSortColumn::Remaining, true);
        assert!(counts.rows()[0].remaining >= counts.rows()[1].remaining);
    }

    #[test]
    fn parses_sort_columns() {
        assert_eq!("Needed".parse(), Ok(MateriaSortColumn::Needed));
        assert!("color".parse::<MateriaSortColumn>().is_err());
    }
}
