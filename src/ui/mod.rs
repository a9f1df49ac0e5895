//! Terminal output for the command-line front end.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes and CI
//! - [`MockUI`] for capturing output in tests
//! - [`Table`] for column-aligned reports
//!
//! # Example
//!
//! ```
//! use gearplan::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Gearsets");
//! ui.success("All items resolved");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, GearplanTheme};

use crate::solver::RequirementState;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Emit machine-readable output. Never suppressed by the output mode.
    fn data(&mut self, text: &str);

    /// Render a requirement state as a short label.
    fn state_label(&self, state: RequirementState) -> String {
        state.label().to_string()
    }

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}
