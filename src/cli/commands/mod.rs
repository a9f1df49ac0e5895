//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that read project data
//! share [`workspace::Workspace`] for loading it.

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod import;
pub mod items;
pub mod materia;
pub mod overlap;
pub mod schema;
pub mod status;
pub mod workspace;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use workspace::Workspace;
