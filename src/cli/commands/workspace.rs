//! Loading the files a command works on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::StaticCatalog;
use crate::config::{load_config, validate, Settings};
use crate::error::{GearplanError, Result};
use crate::inventory::{InventoryFile, InventorySnapshot};
use crate::model::{CountSelection, GearsetStore, GearsetsFile};
use crate::pipeline::ChangePipeline;
use crate::ui::UserInterface;

/// Settings, catalog, inventory and gearsets of one project.
pub struct Workspace {
    pub root: PathBuf,
    pub settings: Settings,
    pub catalog: Arc<StaticCatalog>,
    pub inventory: Arc<InventorySnapshot>,
    pub store: GearsetStore,
}

impl Workspace {
    /// Load everything. The catalog must exist; a missing inventory or
    /// gearsets file counts as empty.
    pub fn load(root: &Path, config_override: Option<&Path>) -> Result<Self> {
        let settings = load_config(root, config_override)?;
        validate(&settings)?;

        let catalog = StaticCatalog::load(&root.join(&settings.files.catalog))?;

        let inventory_path = root.join(&settings.files.inventory);
        let inventory = match InventoryFile::load(&inventory_path) {
            Ok(file) => InventorySnapshot::collect(&file.containers, &settings.inventory),
            Err(GearplanError::ConfigNotFound { .. }) => {
                tracing::debug!("No inventory at {}", inventory_path.display());
                InventorySnapshot::new()
            }
            Err(e) => return Err(e),
        };

        let mut store = GearsetsFile::load(&root.join(&settings.files.gearsets))?.into_store()?;
        store.set_priority_policy(settings.priority);
        store.take_changes();

        Ok(Self {
            root: root.to_path_buf(),
            settings,
            catalog: Arc::new(catalog),
            inventory: Arc::new(inventory),
            store,
        })
    }

    /// Like [`load`](Self::load), but reports missing input files on the UI
    /// and yields `None` so the command can exit with code 2.
    pub fn open(
        ui: &mut dyn UserInterface,
        root: &Path,
        config_override: Option<&Path>,
    ) -> Result<Option<Self>> {
        match Self::load(root, config_override) {
            Ok(workspace) => Ok(Some(workspace)),
            Err(GearplanError::ConfigNotFound { path }) => {
                ui.error(&format!("Required file not found: {}", path.display()));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Where the gearsets file lives.
    pub fn gearsets_path(&self) -> PathBuf {
        self.root.join(&self.settings.files.gearsets)
    }

    /// Selection of the named gearsets, or the active ones when `names` is
    /// empty.
    pub fn selection(&self, names: &[String]) -> Result<CountSelection> {
        if names.is_empty() {
            return Ok(CountSelection::active(&self.store));
        }
        let ids = names
            .iter()
            .map(|name| {
                self.store
                    .find_by_name(name)
                    .map(|g| g.id())
                    .ok_or_else(|| GearplanError::GearsetNotFound { name: name.clone() })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CountSelection::of(ids))
    }

    /// Start a pipeline over a copy of the store.
    pub fn pipeline(&self) -> Result<ChangePipeline> {
        ChangePipeline::spawn(
            self.store.clone(),
            self.inventory.clone(),
            self.catalog.clone(),
            self.settings.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project(catalog: bool) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".gearplan");
        fs::create_dir_all(&dir).unwrap();
        if catalog {
            fs::write(dir.join("catalog.yml"), "items:\n  - id: 10\n    name: Head\n").unwrap();
        }
        fs::write(
            dir.join("gearsets.yml"),
            "gearsets:\n  - name: Savage\n    gearpieces:\n      - slot: head\n        item_id: 10\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn loads_with_missing_inventory() {
        let temp = project(true);
        let workspace = Workspace::load(temp.path(), None).unwrap();
        assert_eq!(workspace.store.len(), 1);
        assert!(workspace.inventory.is_empty());
    }

    #[test]
    fn missing_catalog_is_reported() {
        let temp = project(false);
        let mut ui = MockUI::new();
        let workspace = Workspace::open(&mut ui, temp.path(), None).unwrap();
        assert!(workspace.is_none());
        assert!(ui.errors()[0].contains("catalog.yml"));
    }

    #[test]
    fn selection_by_name() {
        let temp = project(true);
        let workspace = Workspace::load(temp.path(), None).unwrap();
        assert_eq!(workspace.selection(&["savage".into()]).unwrap().len(), 1);
        assert!(matches!(
            workspace.selection(&["nope".into()]),
            Err(GearplanError::GearsetNotFound { .. })
        ));
    }
}
