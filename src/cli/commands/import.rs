//! Import command implementation.
//!
//! The `gearplan import` command parses a gearset document and appends the
//! gearsets it contains to the project's gearsets file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::StaticCatalog;
use crate::cli::args::{ImportArgs, ImportFormat};
use crate::config::{load_config, validate};
use crate::error::{GearplanError, Result};
use crate::import::{import_gearsets, JsonSource, XivgearSource};
use crate::model::GearsetsFile;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The import command implementation.
pub struct ImportCommand {
    project_root: PathBuf,
    config: Option<PathBuf>,
    args: ImportArgs,
}

impl ImportCommand {
    /// Create a new import command.
    pub fn new(project_root: &Path, config: Option<&Path>, args: ImportArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
        }
    }

    fn missing(&self, ui: &mut dyn UserInterface, path: &Path) -> Result<CommandResult> {
        ui.error(&format!("Required file not found: {}", path.display()));
        Ok(CommandResult::failure(2))
    }
}

impl Command for ImportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = load_config(&self.project_root, self.config.as_deref())?;
        validate(&settings)?;

        let input_path = self.project_root.join(&self.args.file);
        let input = match fs::read_to_string(&input_path) {
            Ok(input) => input,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return self.missing(ui, &input_path)
            }
            Err(e) => return Err(e.into()),
        };

        let catalog_path = self.project_root.join(&settings.files.catalog);
        let imported = match self.args.source {
            ImportFormat::Json => {
                if self.args.url.is_some() {
                    ui.warning("--url only applies to xivgear imports; ignoring it");
                }
                import_gearsets(&JsonSource, &input)?
            }
            ImportFormat::Xivgear => {
                let catalog = match StaticCatalog::load(&catalog_path) {
                    Ok(catalog) => catalog,
                    Err(GearplanError::ConfigNotFound { path }) => return self.missing(ui, &path),
                    Err(e) => return Err(e),
                };
                let source = match &self.args.url {
                    Some(url) => XivgearSource::for_page(&catalog, url)?,
                    None => XivgearSource::new(&catalog),
                };
                if let Some(api) = source.api_url() {
                    ui.message(&format!("Document source: {}", api));
                }
                import_gearsets(&source, &input)?
            }
        };

        let gearsets_path = self.project_root.join(&settings.files.gearsets);
        let mut store = GearsetsFile::load(&gearsets_path)?.into_store()?;
        let count = imported.len();
        for gearset in imported {
            let name = gearset.name.clone();
            store.add_gearset(gearset)?;
            ui.message(&format!("  + {}", name));
        }
        GearsetsFile::from(&store).save(&gearsets_path)?;

        ui.success(&format!(
            "Imported {} gearset(s) into {}",
            count,
            gearsets_path.display()
        ));
        Ok(CommandResult::success())
    }
}
