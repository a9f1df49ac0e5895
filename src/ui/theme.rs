//! Visual theme and styling.

use console::Style;

use crate::solver::RequirementState;

/// Colors for status lines and requirement states.
#[derive(Debug, Clone)]
pub struct GearplanTheme {
    /// Success messages and collected requirements (green).
    pub success: Style,
    /// Warnings and partially obtainable requirements (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Directly obtainable requirements (cyan).
    pub obtainable: Style,
    /// Requirements with no source (red).
    pub missing: Style,
    /// Dim/secondary text.
    pub dim: Style,
    /// Highlighted text (bold).
    pub highlight: Style,
    /// Headers (bold cyan).
    pub header: Style,
}

impl Default for GearplanTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl GearplanTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            obtainable: Style::new().cyan(),
            missing: Style::new().red(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            obtainable: Style::new(),
            missing: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
        }
    }

    /// Style used for a requirement state.
    pub fn state_style(&self, state: RequirementState) -> &Style {
        match state {
            RequirementState::Collected => &self.success,
            RequirementState::ObtainableFull => &self.obtainable,
            RequirementState::ObtainablePartial => &self.warning,
            RequirementState::NotObtainable => &self.missing,
        }
    }

    /// Format a requirement state label in its color.
    pub fn format_state(&self, state: RequirementState) -> String {
        format!("{}", self.state_style(state).apply_to(state.label()))
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("◆"), self.highlight.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}
