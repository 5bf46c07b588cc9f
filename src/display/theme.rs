//! Consistent color theme and styling for terminal output.

use crate::types::SymbolKind;
use console::Style;
use owo_colors::OwoColorize;
use std::sync::LazyLock;

/// Global theme instance for consistent styling across the application.
pub static THEME: LazyLock<Theme> = LazyLock::new(Theme::default);

/// Color theme for terminal output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Success/positive indicators
    pub success: Style,
    /// Error/failure indicators
    pub error: Style,
    /// Warning/caution indicators
    pub warning: Style,
    /// Headers and titles
    pub header: Style,
    /// Dimmed/secondary text
    pub dim: Style,
    /// File paths
    pub path: Style,
    /// Numbers, scores and source locations
    pub number: Style,
    /// Type kinds (class, iface, struct, ...)
    pub type_kind: Style,
    /// Callable kinds (function, method, ctor, ...)
    pub callable_kind: Style,
    /// Member kinds (property, signal, vfunc)
    pub member_kind: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: Style::new().green().bright(),
            error: Style::new().red().bright(),
            warning: Style::new().yellow().bright(),
            header: Style::new().cyan().bold(),
            dim: Style::new().dim(),
            path: Style::new().magenta(),
            number: Style::new().cyan(),
            type_kind: Style::new().blue().bright(),
            callable_kind: Style::new().green(),
            member_kind: Style::new().yellow(),
        }
    }
}

impl Theme {
    /// Format a success message with checkmark.
    pub fn success_with_icon(&self, text: &str) -> String {
        if Self::should_disable_colors() {
            format!("✓ {text}")
        } else {
            format!("{} {}", "✓".green(), self.success.apply_to(text))
        }
    }

    /// Format an error message with X mark.
    pub fn error_with_icon(&self, text: &str) -> String {
        if Self::should_disable_colors() {
            format!("✗ {text}")
        } else {
            format!("{} {}", "✗".red(), self.error.apply_to(text))
        }
    }

    /// Format a warning message with warning sign.
    pub fn warning_with_icon(&self, text: &str) -> String {
        if Self::should_disable_colors() {
            format!("⚠ {text}")
        } else {
            format!("{} {}", "⚠".yellow(), self.warning.apply_to(text))
        }
    }

    /// Style for a symbol kind label.
    pub fn kind_style(&self, kind: SymbolKind) -> &Style {
        match kind {
            SymbolKind::Property | SymbolKind::Signal | SymbolKind::Vfunc => &self.member_kind,
            kind if kind.is_type() || kind == SymbolKind::Callback => &self.type_kind,
            _ => &self.callable_kind,
        }
    }

    /// Styled symbol kind.
    pub fn kind(&self, kind: SymbolKind) -> String {
        self.apply(self.kind_style(kind), kind.as_str())
    }

    /// Check if color output should be disabled.
    pub fn should_disable_colors() -> bool {
        use is_terminal::IsTerminal;
        std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal()
    }

    /// Apply theme styling conditionally based on terminal support.
    pub fn apply<T: std::fmt::Display>(&self, style: &Style, text: T) -> String {
        if Self::should_disable_colors() {
            text.to_string()
        } else {
            style.apply_to(text).to_string()
        }
    }
}
