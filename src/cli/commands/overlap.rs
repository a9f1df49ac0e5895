//! Overlap command implementation.
//!
//! The `gearplan overlap` command warns about gearsets whose counts would
//! include the same items more than once.

use std::path::{Path, PathBuf};

use crate::cli::args::OverlapArgs;
use crate::error::Result;
use crate::overlap::detect_overlaps;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::workspace::Workspace;

/// The overlap command implementation.
pub struct OverlapCommand {
    project_root: PathBuf,
    config: Option<PathBuf>,
    args: OverlapArgs,
}

impl OverlapCommand {
    /// Create a new overlap command.
    pub fn new(project_root: &Path, config: Option<&Path>, args: OverlapArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for OverlapCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(workspace) = Workspace::open(ui, &self.project_root, self.config.as_deref())?
        else {
            return Ok(CommandResult::failure(2));
        };
        let selection = workspace.selection(&self.args.gearset)?;
        let groups = detect_overlaps(&workspace.store, &selection);

        if groups.is_empty() {
            ui.success(&format!("No overlaps among {} gearset(s)", selection.len()));
            return Ok(CommandResult::success());
        }
        display::warn_overlaps(ui, &workspace.store, workspace.catalog.as_ref(), &groups);
        Ok(CommandResult::success())
    }
}
