//! Configuration loading, merging and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Configuration File Locations
//!
//! Layers merge in this order, later winning:
//! 1. User global config (`~/.gearplan/config.yml`)
//! 2. Project config (`.gearplan/config.yml`)
//! 3. Local overrides (`.gearplan/config.local.yml`)
//!
//! # Example
//!
//! ```
//! use gearplan::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".gearplan");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "meld_confidence: 0.85").unwrap();
//!
//! let settings = load_merged_config(temp.path()).unwrap();
//! validate(&settings).unwrap();
//! assert_eq!(settings.meld_confidence, 0.85);
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{FilesSettings, InventorySettings, Settings};
pub use validator::{validate, validate_settings, ValidationError};
