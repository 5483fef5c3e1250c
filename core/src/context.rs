//! Display context for the UI shell.
//!
//! `DisplayContext` is a plain data container. After each call into
//! `CalcEngine`, the shell reads these fields to render the screen. No
//! callbacks, no traits: the shell reads fields directly.

use serde::Serialize;

use crate::error::EngineError;

/// What the shell should render after the latest event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayContext {
    /// Main display line (operand or result)
    pub display_text: String,

    /// Error raised by the latest event, if any
    pub error: Option<EngineError>,

    /// Glyph of the pending operation (for highlighting its button)
    pub pending_symbol: Option<char>,

    /// Hint line, e.g. "50 +" while the second operand is typed
    pub auxiliary_text: String,
}

impl DisplayContext {
    /// Create a context showing "0".
    pub fn new() -> Self {
        Self {
            display_text: "0".to_string(),
            ..Self::default()
        }
    }

    /// Reset to the initial display.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Check if the latest event failed.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
