//! libcalc-core
//!
//! Computation core of a basic calculator: an operand buffer, a running
//! total and a pending operation, driven one input event at a time.
//!
//! Public API:
//! - `CalcEngine` - Session wrapper with per-event methods and `process_key`
//! - `EngineState` - Session state and its transitions
//! - `Operation` / `apply` - Arithmetic on the accumulator
//! - `InputBuffer` - Textual operand entry
//! - `DisplayContext` - What the UI shell renders after each event
//! - `EngineError` - Failures reported to the caller
//! - `Config` - Operand policy, display and key binding options
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::EngineError;

pub mod operation;
pub use operation::{apply, Operation};

pub mod format;

pub mod input_buffer;
pub use input_buffer::{InputBuffer, OperandPolicy};

pub mod session;
pub use session::{EngineMode, EngineState};

pub mod context;
pub use context::DisplayContext;

pub mod engine;
pub use engine::{CalcEngine, KeyEvent, KeyResult};

/// Engine configuration.
///
/// Front-end crates extend this with their own options by flattening it into
/// their config (see `CalculatorConfig` in `libcalc`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// How to read an operand that is not a finite number ("." or "-")
    pub operand_policy: OperandPolicy,

    /// Group the display text in thousands ("1,234.5"); the buffer is never grouped
    pub thousands_separator: bool,

    // Key bindings used to translate `KeyEvent::Char`.
    // Digits and the operator glyphs (+ - * x / ÷) are fixed.
    /// Keys that clear the session
    pub clear_keys: String,
    /// Keys that remove the last typed character
    pub backspace_keys: String,
    /// Keys that toggle the operand sign
    pub sign_keys: String,
    /// Keys that turn the pending operation into a percent
    pub percent_keys: String,
    /// Keys that finalize the pending operation
    pub equals_keys: String,
    /// Keys that type a decimal point
    pub dot_keys: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            operand_policy: OperandPolicy::ZeroOnInvalid,
            thousands_separator: false,
            clear_keys: "cC".to_string(),
            backspace_keys: "<\u{8}\u{7f}".to_string(),
            sign_keys: "~n±".to_string(),
            percent_keys: "%".to_string(),
            equals_keys: "=".to_string(),
            dot_keys: ".,".to_string(),
        }
    }
}

impl Config {
    /// Translate a typed character into an engine event.
    ///
    /// Configured bindings win over the fixed operator glyphs, so a layout
    /// can claim `x` or `-` for something else. Returns None for unbound keys.
    pub fn binding_for(&self, ch: char) -> Option<KeyEvent> {
        if ch.is_ascii_digit() {
            return Some(KeyEvent::Digit(ch));
        }

        let bindings = [
            (&self.clear_keys, KeyEvent::Clear),
            (&self.backspace_keys, KeyEvent::Backspace),
            (&self.sign_keys, KeyEvent::ToggleSign),
            (&self.percent_keys, KeyEvent::Percent),
            (&self.equals_keys, KeyEvent::Equals),
            (&self.dot_keys, KeyEvent::Dot),
        ];
        for (keys, event) in bindings {
            if keys.contains(ch) {
                return Some(event);
            }
        }

        Operation::from_symbol(ch).map(KeyEvent::Operator)
    }
}
