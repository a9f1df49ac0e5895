//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::import::ImportCommand;
use super::items::ItemsCommand;
use super::materia::MateriaCommand;
use super::overlap::OverlapCommand;
use super::schema::SchemaCommand;
use super::status::StatusCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            project_root,
            config,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command. No subcommand means `status`.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = self.project_root.as_path();
        let config = self.config.as_deref();
        match &cli.command {
            Some(Commands::Status(args)) => {
                StatusCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Materia(args)) => {
                MateriaCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Overlap(args)) => {
                OverlapCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Items(args)) => ItemsCommand::new(root, config, args.clone()).execute(ui),
            Some(Commands::Import(args)) => {
                ImportCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Schema) => SchemaCommand.execute(ui),
            Some(Commands::Completions(args)) => CompletionsCommand::new(args.clone()).execute(ui),
            None => StatusCommand::new(root, config, StatusArgs::default()).execute(ui),
        }
    }
}
