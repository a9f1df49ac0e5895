//! Items command implementation.
//!
//! The `gearplan items` command lists every item the active gearsets still
//! care about, the same list the item service hands to other tools.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::catalog::{ItemCatalog, ItemId};
use crate::cli::args::ItemsArgs;
use crate::error::Result;
use crate::solver::RequirementState;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::workspace::Workspace;

/// The items command implementation.
pub struct ItemsCommand {
    project_root: PathBuf,
    config: Option<PathBuf>,
    args: ItemsArgs,
}

#[derive(Serialize)]
struct ItemRow {
    item_id: ItemId,
    name: String,
    demand: usize,
    owned: u32,
    state: Option<RequirementState>,
}

impl ItemsCommand {
    /// Create a new items command.
    pub fn new(project_root: &Path, config: Option<&Path>, args: ItemsArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ItemsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(workspace) = Workspace::open(ui, &self.project_root, self.config.as_deref())?
        else {
            return Ok(CommandResult::failure(2));
        };
        let pipeline = workspace.pipeline()?;
        let resolution = pipeline.latest();
        pipeline.shutdown();

        let filter = workspace.settings.highlight;
        let rows: Vec<ItemRow> = resolution
            .requirements()
            .iter()
            .map(|requirement| ItemRow {
                item_id: requirement.item_id,
                name: workspace.catalog.display_name(requirement.item_id),
                demand: requirement.demand(),
                owned: resolution.ledger().owned(requirement.item_id).unwrap_or(0),
                state: resolution.resolution_state(requirement.item_id, filter),
            })
            .collect();

        if self.args.json {
            display::print_json(ui, &rows)?;
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("{} required items", rows.len()));
        let mut table = Table::new(vec!["Id", "Item", "Needed", "Owned", "State"])
            .align_right(0)
            .align_right(2)
            .align_right(3);
        for row in &rows {
            table.add_row([
                row.item_id.to_string(),
                row.name.clone(),
                row.demand.to_string(),
                row.owned.to_string(),
                row.state.map(|s| ui.state_label(s)).unwrap_or_default(),
            ]);
        }
        ui.message(&table.render());
        Ok(CommandResult::success())
    }
}
