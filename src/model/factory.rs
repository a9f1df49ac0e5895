//! Builds gearpieces from bare item ids using catalog metadata.

use super::gearpiece::{Gearpiece, MateriaRequirement, Prerequisite};
use super::slot::GearpieceSlot;
use crate::catalog::{ItemCatalog, ItemId};

/// Fills in prerequisite chains and materia details for imported items.
pub struct GearpieceFactory<'a> {
    catalog: &'a dyn ItemCatalog,
}

impl<'a> GearpieceFactory<'a> {
    /// Create a factory over a catalog.
    pub fn new(catalog: &'a dyn ItemCatalog) -> Self {
        Self { catalog }
    }

    /// Build a gearpiece for `item` in `slot` with materia melded in order.
    ///
    /// The slot falls back to the catalog's slot for the item when `None`.
    /// Returns `None` when no slot can be determined.
    pub fn build(
        &self,
        slot: Option<GearpieceSlot>,
        item: ItemId,
        materia: &[ItemId],
    ) -> Option<Gearpiece> {
        let info = self.catalog.lookup(item);
        let slot = slot.or_else(|| info.and_then(|i| i.slot))?;

        let mut piece = Gearpiece::new(slot, item);
        if let Some(info) = info {
            piece.prerequisites = info
                .prerequisites
                .iter()
                .map(|id| Prerequisite::new(*id))
                .collect();
        } else {
            tracing::warn!("Item {} is not in the catalog", item);
        }

        piece.materia = materia
            .iter()
            .enumerate()
            .map(|(socket, id)| self.materia(item, *id, socket))
            .collect();
        Some(piece)
    }

    fn materia(&self, gear: ItemId, id: ItemId, socket: usize) -> MateriaRequirement {
        let chance = self.catalog.attach_chance(gear, id, socket);
        let mut requirement = MateriaRequirement::new(id).with_chance(chance);
        if let Some(m) = self.catalog.lookup(id).and_then(|info| info.materia.as_ref()) {
            requirement = requirement.with_stat(m.stat_type.clone(), m.grade);
        }
        requirement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemInfo, MateriaInfo, StaticCatalog};

    fn catalog() -> StaticCatalog {
        StaticCatalog::from_items([
            ItemInfo::new(40, "Augmented Ring")
                .with_slot(GearpieceSlot::FingerLeft)
                .with_prerequisites(vec![ItemId::new(41), ItemId::new(42)]),
            ItemInfo::new(500, "Savage Aim Materia XII").with_materia(MateriaInfo {
                stat_type: "Critical Hit".into(),
                grade: 12,
                stat_strength: 54,
                overmeld_chances: vec![17.0],
            }),
        ])
    }

    #[test]
    fn build_fills_chain_and_materia_chances() {
        let catalog = catalog();
        let factory = GearpieceFactory::new(&catalog);
        let ids = [ItemId::new(500); 3];
        let piece = factory.build(None, ItemId::new(40), &ids).unwrap();

        assert_eq!(piece.slot, GearpieceSlot::FingerLeft);
        assert_eq!(piece.prerequisites.len(), 2);
        assert_eq!(piece.materia[0].percent_chance_to_attach, 100.0);
        assert_eq!(piece.materia[2].percent_chance_to_attach, 17.0);
        assert_eq!(piece.materia[0].stat_type, "Critical Hit");
        assert_eq!(piece.materia[0].level, 12);
    }

    #[test]
    fn build_without_slot_information_fails() {
        let catalog = catalog();
        let factory = GearpieceFactory::new(&catalog);
        assert!(factory.build(None, ItemId::new(9), &[]).is_none());
        let piece = factory
            .build(Some(GearpieceSlot::Head), ItemId::new(9), &[])
            .unwrap();
        assert!(piece.prerequisites.is_empty());
    }
}
