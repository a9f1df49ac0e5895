//! Assignment of owned items to requirements.
//!
//! # Modules
//!
//! - [`state`] - The four satisfaction states
//! - [`ledger`] - Per-item claim accounting
//! - [`assign`] - The greedy priority-ordered solver
//! - [`resolution`] - Pass output and per-item queries
//! - [`query`] - Filters for per-item queries

pub mod assign;
pub mod ledger;
pub mod query;
pub mod resolution;
pub mod state;

pub use assign::AssignmentSolver;
pub use ledger::{AssignmentLedger, RequirementKey};
pub use query::RequirementFilter;
pub use resolution::{GearsetProgress, Resolution};
pub use state::RequirementState;
