//! Command-line interface for gearplan.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, ImportArgs, ImportFormat, ItemsArgs, MateriaArgs, OverlapArgs,
    StatusArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
