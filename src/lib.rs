//! gearplan - Gearset requirement tracking and item assignment.
//!
//! Players keep several target gearsets per job. gearplan works out which
//! owned items each requirement can claim, how far every gearpiece is from
//! done, and how much materia is still needed for a chosen meld confidence.
//!
//! # Modules
//!
//! - [`catalog`] - Static item metadata and job lookup
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`import`] - Gearset import from external documents
//! - [`inventory`] - Owned item quantities
//! - [`ipc`] - Required-item service for other tools
//! - [`materia`] - Meld-confidence materia estimates
//! - [`model`] - Gearsets, gearpieces, and the gearset store
//! - [`overlap`] - Overlapping gearset detection
//! - [`pipeline`] - Background recomputation on change
//! - [`solver`] - Priority-ordered item assignment
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use gearplan::catalog::{ItemInfo, StaticCatalog};
//! use gearplan::inventory::InventorySnapshot;
//! use gearplan::model::{Gearpiece, GearpieceSlot, Gearset, GearsetStore};
//! use gearplan::solver::{AssignmentSolver, RequirementState};
//!
//! let catalog = StaticCatalog::from_items([ItemInfo::new(10, "Raid Head")]);
//! let store = GearsetStore::from_gearsets(vec![Gearset::new(
//!     "Savage",
//!     vec![Gearpiece::new(GearpieceSlot::Head, 10)],
//! )])
//! .unwrap();
//! let inventory = InventorySnapshot::new().with(10, 1);
//!
//! let resolution = AssignmentSolver::new(&catalog).solve(&store, &inventory);
//! let piece = store.ordered()[0].gearpieces[0].id();
//! assert_eq!(resolution.gearpiece_state(piece), Some(RequirementState::Collected));
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod inventory;
pub mod ipc;
pub mod materia;
pub mod model;
pub mod overlap;
pub mod pipeline;
pub mod solver;
pub mod ui;

pub use error::{GearplanError, Result};
