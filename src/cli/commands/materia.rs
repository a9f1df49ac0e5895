//! Materia command implementation.
//!
//! The `gearplan materia` command estimates how many of each materia the
//! selected gearsets still need at the configured meld confidence.

use std::path::{Path, PathBuf};

use crate::cli::args::MateriaArgs;
use crate::config::validate;
use crate::error::{GearplanError, Result};
use crate::materia::MateriaSortColumn;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::workspace::Workspace;

/// The materia command implementation.
pub struct MateriaCommand {
    project_root: PathBuf,
    config: Option<PathBuf>,
    args: MateriaArgs,
}

impl MateriaCommand {
    /// Create a new materia command.
    pub fn new(project_root: &Path, config: Option<&Path>, args: MateriaArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for MateriaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let column: MateriaSortColumn = self.args.sort.parse().map_err(GearplanError::invalid)?;

        let Some(mut workspace) =
            Workspace::open(ui, &self.project_root, self.config.as_deref())?
        else {
            return Ok(CommandResult::failure(2));
        };
        if let Some(confidence) = self.args.confidence {
            workspace.settings.meld_confidence = confidence;
            validate(&workspace.settings)?;
        }
        let selection = workspace.selection(&self.args.gearset)?;

        let pipeline = workspace.pipeline()?;
        pipeline.update_selection(selection);
        pipeline.flush()?;
        let snapshot = pipeline.snapshot();
        pipeline.shutdown();

        let mut counts = snapshot.materia.clone();
        counts.sort(column, self.args.descending);

        if self.args.json {
            display::print_json(ui, &counts.rows())?;
            return Ok(CommandResult::success());
        }

        if counts.is_empty() {
            ui.message("No outstanding materia.");
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!(
            "Materia at {} confidence ({})",
            counts.confidence(),
            counts.policy()
        ));
        let mut table = Table::new(vec![
            "Materia",
            "Stat",
            "Slots",
            "Needed",
            "Owned",
            "Remaining",
        ])
        .align_right(2)
        .align_right(3)
        .align_right(4)
        .align_right(5);
        for row in counts.rows() {
            table.add_row([
                row.name.clone(),
                row.stat_type.clone(),
                row.slot_count.to_string(),
                row.needed.to_string(),
                row.inventory.to_string(),
                row.remaining.to_string(),
            ]);
        }
        ui.message(&table.render());

        display::warn_overlaps(
            ui,
            &workspace.store,
            workspace.catalog.as_ref(),
            &snapshot.overlaps,
        );
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
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
  - id: 500
    name: Savage Aim Materia XII
    materia:
      stat_type: Critical Hit
      grade: 12
"#,
        )
        .unwrap();
        fs::write(
            dir.join("gearsets.yml"),
            r#"gearsets:
  - name: Savage
    gearpieces:
      - slot: head
        item_id: 10
        materia:
          - item_id: 500
            percent_chance_to_attach: 70
  - name: Alt
    gearpieces:
      - slot: head
        item_id: 10
"#,
        )
        .unwrap();
        temp
    }

    #[test]
    fn confidence_changes_estimate() {
        let temp = project();
        let mut ui = MockUI::new();
        let args = MateriaArgs {
            json: true,
            sort: "name".into(),
            ..Default::default()
        };
        MateriaCommand::new(temp.path(), None, args.clone())
            .execute(&mut ui)
            .unwrap();
        let rows: serde_json::Value = serde_json::from_str(&ui.data_output()[0]).unwrap();
        assert_eq!(rows[0]["needed"], 1);

        let mut ui = MockUI::new();
        let args = MateriaArgs {
            confidence: Some(0.91),
            ..args
        };
        MateriaCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();
        let rows: serde_json::Value = serde_json::from_str(&ui.data_output()[0]).unwrap();
        assert_eq!(rows[0]["needed"], 2);
    }

    #[test]
    fn table_and_overlap_warning() {
        let temp = project();
        let mut ui = MockUI::new();
        let args = MateriaArgs {
            sort: "needed".into(),
            ..Default::default()
        };
        let result = MateriaCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.has_message("Savage Aim Materia XII"));
        assert!(ui.has_warning("Savage, Alt share Raid Head"));
    }

    #[test]
    fn selecting_one_gearset_skips_overlap() {
        let temp = project();
        let mut ui = MockUI::new();
        let args = MateriaArgs {
            gearset: vec!["Alt".into()],
            sort: "name".into(),
            ..Default::default()
        };
        MateriaCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("No outstanding materia."));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn rejects_bad_sort_and_confidence() {
        let temp = project();
        let mut ui = MockUI::new();
        let bad_sort = MateriaArgs {
            sort: "color".into(),
            ..Default::default()
        };
        assert!(MateriaCommand::new(temp.path(), None, bad_sort)
            .execute(&mut ui)
            .is_err());

        let bad_confidence = MateriaArgs {
            confidence: Some(1.5),
            sort: "name".into(),
            ..Default::default()
        };
        assert!(MateriaCommand::new(temp.path(), None, bad_confidence)
            .execute(&mut ui)
            .is_err());
    }
}
