//! Operand buffer for calculator input.
//!
//! The buffer stores the operand exactly as typed (e.g. `"-12."`). Sign and
//! decimal point entry are text edits, so partial input like a trailing `.`
//! survives until the operand is read as a number.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How to read a buffer that does not hold a finite number (`"."`, `"-"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandPolicy {
    /// Read it as `0`.
    #[default]
    ZeroOnInvalid,
    /// Fail with `EngineError::InvalidOperand`.
    Reject,
}

/// Textual operand being typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Create a buffer holding `"0"`.
    pub fn new() -> Self {
        Self {
            text: "0".to_string(),
        }
    }

    /// Get the raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the buffer is empty (just after an operator was selected).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the buffer is exactly `"0"`.
    pub fn is_zero(&self) -> bool {
        self.text == "0"
    }

    /// Text to show for this buffer; an empty buffer shows `"0"`.
    pub fn display(&self) -> &str {
        if self.text.is_empty() {
            "0"
        } else {
            &self.text
        }
    }

    /// Reset to `"0"`.
    pub fn reset(&mut self) {
        self.text.clear();
        self.text.push('0');
    }

    /// Empty the buffer so the next digit starts a fresh operand.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replace the contents with a formatted result.
    pub(crate) fn set(&mut self, text: String) {
        self.text = text;
    }

    /// Append a digit, replacing a lone `"0"`.
    ///
    /// Returns false (and leaves the buffer alone) for non-digits and for a
    /// digit that would push the value past the `f64` range.
    pub fn push_digit(&mut self, d: char) -> bool {
        if !d.is_ascii_digit() {
            return false;
        }

        let mut next = if self.is_zero() {
            String::with_capacity(1)
        } else {
            self.text.clone()
        };
        next.push(d);
        if matches!(next.parse::<f64>(), Ok(value) if !value.is_finite()) {
            return false;
        }

        self.text = next;
        true
    }

    /// Append a decimal point unless one is already present.
    /// Returns true if the point was added.
    pub fn push_dot(&mut self) -> bool {
        if self.text.contains('.') {
            return false;
        }
        self.text.push('.');
        true
    }

    /// Add or remove a leading `-`.
    pub fn toggle_sign(&mut self) {
        if self.text.starts_with('-') {
            self.text.remove(0);
        } else {
            self.text.insert(0, '-');
        }
    }

    /// Remove the last character (backspace).
    ///
    /// Does nothing while the display shows `"0"`. A buffer emptied by this
    /// call goes back to `"0"`. Returns true if a character was removed.
    pub fn pop(&mut self) -> bool {
        if self.display() == "0" {
            return false;
        }
        self.text.pop();
        if self.text.is_empty() {
            self.reset();
        }
        true
    }

    /// Read the buffer as a number.
    ///
    /// An empty buffer reads as `0` under either policy.
    pub fn parse(&self, policy: OperandPolicy) -> Result<f64, EngineError> {
        if self.text.is_empty() {
            return Ok(0.0);
        }
        match self.text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => match policy {
                OperandPolicy::ZeroOnInvalid => Ok(0.0),
                OperandPolicy::Reject => Err(EngineError::InvalidOperand(self.text.clone())),
            },
        }
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
