//! Grid behavior configuration.

use serde::{Deserialize, Serialize};

/// Behavior switches for the selection/editing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Global readonly mode: blocks editing, paste and cut-clear.
    pub readonly: bool,
    /// Range selection allowed (shift-click, shift-arrow, drag, autofill).
    pub range: bool,
    /// Copy/paste wiring enabled.
    pub use_clipboard: bool,
    /// Apply pending edit value when the editor closes for a reason other
    /// than Escape.
    pub apply_changes_on_close: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            readonly: false,
            range: true,
            use_clipboard: true,
            apply_changes_on_close: false,
        }
    }
}
