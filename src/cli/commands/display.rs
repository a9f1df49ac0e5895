//! Shared display helpers.
//!
//! Used by `status`, `materia`, `overlap` and `items` so gearsets and
//! warnings read the same everywhere.

use anyhow::Context;
use serde::Serialize;

use crate::catalog::{job_abbreviation, ItemCatalog, ItemId};
use crate::error::Result;
use crate::model::{Gearset, GearsetId, GearsetStore};
use crate::overlap::OverlapGroup;
use crate::ui::UserInterface;

/// Write a value as pretty JSON.
pub fn print_json<T: Serialize>(ui: &mut dyn UserInterface, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    ui.data(&text);
    Ok(())
}

/// `Name [JOB]`, or just the name when the job is unknown.
pub fn gearset_label(gearset: &Gearset) -> String {
    match job_abbreviation(gearset.class_job_id) {
        Some(job) => format!("{} [{}]", gearset.name, job),
        None => gearset.name.clone(),
    }
}

/// Name of a gearset by id, falling back to the id.
pub fn gearset_name(store: &GearsetStore, id: GearsetId) -> String {
    store
        .get(id)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Warn once about items the catalog does not know.
pub fn warn_unknown_items(ui: &mut dyn UserInterface, items: &[ItemId]) {
    if items.is_empty() {
        return;
    }
    let ids: Vec<String> = items.iter().map(|id| id.to_string()).collect();
    ui.warning(&format!(
        "{} item(s) missing from the catalog: {}",
        items.len(),
        ids.join(", ")
    ));
}

/// Warn about each overlapping group of gearsets.
pub fn warn_overlaps(
    ui: &mut dyn UserInterface,
    store: &GearsetStore,
    catalog: &dyn ItemCatalog,
    groups: &[OverlapGroup],
) {
    for group in groups {
        let names: Vec<String> = group
            .gearsets
            .iter()
            .map(|id| gearset_name(store, *id))
            .collect();
        let items: Vec<String> = group
            .items
            .iter()
            .map(|id| catalog.display_name(*id))
            .collect();
        ui.warning(&format!(
            "{} share {}: counts include these items more than once",
            names.join(", "),
            items.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::model::{Gearpiece, GearpieceSlot};
    use crate::ui::MockUI;

    #[test]
    fn label_includes_known_job() {
        let gearset = Gearset::new("Savage", vec![]).with_job(40);
        assert_eq!(gearset_label(&gearset), "Savage [SGE]");
        assert_eq!(gearset_label(&Gearset::new("Plain", vec![])), "Plain");
    }

    #[test]
    fn unknown_items_warn_once() {
        let mut ui = MockUI::new();
        warn_unknown_items(&mut ui, &[]);
        assert!(ui.warnings().is_empty());
        warn_unknown_items(&mut ui, &[ItemId::new(5), ItemId::new(9)]);
        assert_eq!(ui.warnings().len(), 1);
        assert!(ui.has_warning("5, 9"));
    }

    #[test]
    fn overlap_warning_names_gearsets() {
        let store = GearsetStore::from_gearsets(vec![
            Gearset::new("A", vec![Gearpiece::new(GearpieceSlot::Head, 1)]),
            Gearset::new("B", vec![Gearpiece::new(GearpieceSlot::Head, 1)]),
        ])
        .unwrap();
        let ids: Vec<GearsetId> = store.iter().map(|g| g.id()).collect();
        let group = OverlapGroup {
            gearsets: ids,
            items: vec![ItemId::new(1)],
        };
        let mut ui = MockUI::new();
        warn_overlaps(&mut ui, &store, &StaticCatalog::new(), &[group]);
        assert!(ui.has_warning("A, B share #1"));
    }

    #[test]
    fn print_json_goes_to_data() {
        let mut ui = MockUI::new();
        print_json(&mut ui, &vec![1, 2]).unwrap();
        assert!(ui.data_output()[0].contains('1'));
    }
}
