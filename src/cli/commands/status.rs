//! Status command implementation.
//!
//! The `gearplan status` command resolves the gearsets against the
//! inventory and shows each gearpiece's state.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::catalog::{ItemCatalog, ItemId};
use crate::cli::args::StatusArgs;
use crate::error::{GearplanError, Result};
use crate::model::{Gearpiece, Gearset, RequirementSlot};
use crate::solver::{RequirementState, Resolution};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::workspace::Workspace;

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    config: Option<PathBuf>,
    args: StatusArgs,
}

#[derive(Serialize)]
struct StatusReport {
    gearsets: Vec<GearsetReport>,
    unknown_items: Vec<ItemId>,
    claimed_units: u64,
}

#[derive(Serialize)]
struct GearsetReport {
    name: String,
    class_job_id: u32,
    active: bool,
    collected: usize,
    total: usize,
    gearpieces: Vec<GearpieceReport>,
}

#[derive(Serialize)]
struct GearpieceReport {
    slot: String,
    item_id: ItemId,
    name: String,
    state: Option<RequirementState>,
    prerequisites: Vec<RequirementReport>,
    materia: Vec<RequirementReport>,
}

#[derive(Serialize)]
struct RequirementReport {
    item_id: ItemId,
    state: Option<RequirementState>,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, config: Option<&Path>, args: StatusArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
        }
    }

    fn report(
        &self,
        gearsets: &[&Gearset],
        resolution: &Resolution,
        catalog: &dyn ItemCatalog,
    ) -> StatusReport {
        let gearsets = gearsets
            .iter()
            .map(|gearset| GearsetReport {
                name: gearset.name.clone(),
                class_job_id: gearset.class_job_id,
                active: gearset.is_active,
                collected: collected(gearset, resolution),
                total: gearset.gearpieces.len(),
                gearpieces: gearset
                    .gearpieces
                    .iter()
                    .map(|piece| gearpiece_report(piece, resolution, catalog))
                    .collect(),
            })
            .collect();
        StatusReport {
            gearsets,
            unknown_items: resolution.unknown_items().to_vec(),
            claimed_units: resolution.ledger().total_claimed(),
        }
    }
}

fn gearpiece_report(
    piece: &Gearpiece,
    resolution: &Resolution,
    catalog: &dyn ItemCatalog,
) -> GearpieceReport {
    let id = piece.id();
    GearpieceReport {
        slot: piece.slot.to_string(),
        item_id: piece.item_id,
        name: catalog.display_name(piece.item_id),
        state: resolution.gearpiece_state(id),
        prerequisites: piece
            .prerequisites
            .iter()
            .enumerate()
            .map(|(i, link)| RequirementReport {
                item_id: link.item_id,
                state: resolution.state(id, RequirementSlot::Prerequisite(i)),
            })
            .collect(),
        materia: piece
            .materia
            .iter()
            .enumerate()
            .map(|(i, m)| RequirementReport {
                item_id: m.item_id,
                state: resolution.state(id, RequirementSlot::Materia(i)),
            })
            .collect(),
    }
}

/// Collected gearpieces per the resolution; inactive gearsets fall back to
/// their flags.
fn collected(gearset: &Gearset, resolution: &Resolution) -> usize {
    resolution
        .gearset_progress()
        .iter()
        .find(|p| p.gearset == gearset.id())
        .map(|p| p.collected)
        .unwrap_or_else(|| gearset.collected_count())
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(workspace) = Workspace::open(ui, &self.project_root, self.config.as_deref())?
        else {
            return Ok(CommandResult::failure(2));
        };

        let gearsets: Vec<&Gearset> = match &self.args.gearset {
            Some(name) => vec![workspace
                .store
                .find_by_name(name)
                .ok_or_else(|| GearplanError::GearsetNotFound { name: name.clone() })?],
            None => workspace.store.ordered(),
        };

        let pipeline = workspace.pipeline()?;
        let resolution = pipeline.latest();
        pipeline.shutdown();
        let catalog = workspace.catalog.as_ref();

        if self.args.json {
            display::print_json(ui, &self.report(&gearsets, &resolution, catalog))?;
            return Ok(CommandResult::success());
        }

        if gearsets.is_empty() {
            ui.message("No gearsets. Import some with 'gearplan import'.");
            return Ok(CommandResult::success());
        }

        ui.show_header("Gearsets");
        let detail = ui.output_mode().shows_detail();
        for gearset in gearsets {
            let title = format!(
                "{}  {}/{} collected",
                display::gearset_label(gearset),
                collected(gearset, &resolution),
                gearset.gearpieces.len()
            );
            if !gearset.is_active {
                ui.message(&format!("{}  (inactive)", title));
                continue;
            }
            ui.message(&title);

            let mut table = Table::new(vec!["Slot", "Item", "State"]);
            for piece in &gearset.gearpieces {
                let state = resolution
                    .gearpiece_state(piece.id())
                    .map(|s| ui.state_label(s))
                    .unwrap_or_default();
                table.add_row([
                    piece.slot.to_string(),
                    catalog.display_name(piece.item_id),
                    state,
                ]);
                if detail {
                    for (i, link) in piece.prerequisites.iter().enumerate() {
                        let state = resolution.state(piece.id(), RequirementSlot::Prerequisite(i));
                        table.add_row([
                            String::new(),
                            format!("  ↳ {}", catalog.display_name(link.item_id)),
                            state.map(|s| ui.state_label(s)).unwrap_or_default(),
                        ]);
                    }
                    for (i, materia) in piece.materia.iter().enumerate() {
                        let state = resolution.state(piece.id(), RequirementSlot::Materia(i));
                        table.add_row([
                            String::new(),
                            format!("  ◇ {}", catalog.display_name(materia.item_id)),
                            state.map(|s| ui.state_label(s)).unwrap_or_default(),
                        ]);
                    }
                }
            }
            ui.message(&table.render());
            ui.message("");
        }

        display::warn_unknown_items(ui, resolution.unknown_items());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".gearplan");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("catalog.yml"),
            r#"items:
  - id: 10
    name: Raid Head
  - id: 20
    name: Tome Body
    prerequisites: [21]
  - id: 21
    name: Twine
    is_directly_obtainable: true
"#,
        )
        .unwrap();
        fs::write(
            dir.join("gearsets.yml"),
            r#"gearsets:
  - name: Savage
    class_job_id: 40
    gearpieces:
      - slot: head
        item_id: 10
      - slot: body
        item_id: 20
        prerequisites:
          - item_id: 21
  - name: Old
    is_active: false
    gearpieces:
      - slot: head
        item_id: 99
"#,
        )
        .unwrap();
        fs::write(
            dir.join("inventory.yml"),
            "containers:\n  - kind: bags\n    items:\n      - item_id: 10\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn shows_states_per_gearpiece() {
        let temp = project();
        let cmd = StatusCommand::new(temp.path(), None, StatusArgs::default());
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Savage [SGE]  1/2 collected"));
        assert!(ui.has_message("(inactive)"));
        let table = ui.messages().iter().find(|m| m.contains("Raid Head")).unwrap();
        assert!(table.contains("collected"));
        assert!(table.contains("obtainable"));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn verbose_lists_chain_links() {
        let temp = project();
        let cmd = StatusCommand::new(temp.path(), None, StatusArgs::default());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_message("↳ Twine"));
    }

    #[test]
    fn json_report() {
        let temp = project();
        let args = StatusArgs {
            gearset: Some("savage".into()),
            json: true,
        };
        let mut ui = MockUI::new();
        StatusCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.data_output()[0]).unwrap();
        assert_eq!(value["gearsets"].as_array().unwrap().len(), 1);
        assert_eq!(value["gearsets"][0]["gearpieces"][0]["state"], "collected");
        assert_eq!(value["claimed_units"], 1);
    }

    #[test]
    fn unknown_gearset_name_is_error() {
        let temp = project();
        let args = StatusArgs {
            gearset: Some("nope".into()),
            json: false,
        };
        let mut ui = MockUI::new();
        assert!(StatusCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .is_err());
    }

    #[test]
    fn missing_catalog_exits_2() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = StatusCommand::new(temp.path(), None, StatusArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert_eq!(result.exit_code, 2);
    }
}
