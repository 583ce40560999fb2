//! Semantic color theme for consistent terminal output
//!
//! - `ACTIVE` => blue - headers, low-priority items
//! - `SUCCESS` => green - completed operations, automated cases
//! - `WARNING` => yellow - warnings, medium-priority items
//! - `FAIL` => red - errors, high-priority items

use std::sync::LazyLock;

use owo_colors::Style;
use tcparse_core::Priority;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    /// Blue - headers, low-priority items
    pub active: Style,
    /// Green - success messages, automated cases
    pub success: Style,
    /// Yellow - warnings, medium-priority items
    pub warning: Style,
    /// Red - errors, high-priority items
    pub fail: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            active: Style::new().blue(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }
}

impl SemanticColors {
    /// HIGH=fail, MEDIUM=warning, LOW=active
    pub fn priority(&self, priority: Priority) -> Style {
        match priority {
            Priority::High => self.fail,
            Priority::Medium => self.warning,
            Priority::Low => self.active,
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);
