//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::merger::merge_configs;
use crate::config::schema::Settings;
use crate::error::{GearplanError, Result};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".gearplan";

/// Configuration files in merge order (later overrides earlier).
///
/// 1. User global config (`~/.gearplan/config.yml`)
/// 2. Project config (`.gearplan/config.yml`)
/// 3. Local overrides (`.gearplan/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub user_global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover existing config files for a project root.
    pub fn discover(project_root: &Path) -> Self {
        let user_global = dirs::home_dir().map(|home| home.join(CONFIG_DIR).join("config.yml"));
        let project_dir = project_root.join(CONFIG_DIR);
        Self {
            user_global: user_global.filter(|p| p.exists()),
            project: existing(project_dir.join("config.yml")),
            project_local: existing(project_dir.join("config.local.yml")),
        }
    }

    /// Existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Walk up from `start` looking for a `.gearplan` directory, then `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read a config file as a raw YAML value.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GearplanError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GearplanError::Io(e)
        }
    })?;
    serde_yaml::from_str(&content).map_err(|e| GearplanError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load one config file, no merging.
pub fn load_config_file(path: &Path) -> Result<Settings> {
    let value = load_config_value(path)?;
    parse_value(merge_configs(&[value]), path)
}

/// Discover and merge every config layer. Missing layers are skipped; with
/// none present the defaults apply.
pub fn load_merged_config(project_root: &Path) -> Result<Settings> {
    let paths = ConfigPaths::discover(project_root);
    let mut layers = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }
    parse_value(
        merge_configs(&layers),
        &project_root.join(CONFIG_DIR).join("config.yml"),
    )
}

/// Load config, honouring an explicit `--config` path.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<Settings> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

fn parse_value(value: serde_yaml::Value, path: &Path) -> Result<Settings> {
    serde_yaml::from_value(value).map_err(|e| GearplanError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
