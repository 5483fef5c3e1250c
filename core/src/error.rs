//! Errors reported by the calculator engine.
//!
//! Every failure is returned to the caller as a value. None of them is fatal:
//! the engine state is left exactly as it was before the failing event.

use serde::Serialize;
use thiserror::Error;

/// Failure produced while converting an operand or computing a result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum EngineError {
    /// Divide (or percent under a divide) with a zero operand.
    #[error("division by zero")]
    DivisionByZero,

    /// The input buffer could not be read as a finite number.
    ///
    /// Only raised under [`OperandPolicy::Reject`](crate::OperandPolicy::Reject);
    /// the default policy reads such buffers as `0`.
    #[error("invalid operand: {0:?}")]
    InvalidOperand(String),

    /// The computed result is not finite (e.g. `1e308 * 10`).
    #[error("result out of range")]
    Overflow,
}

impl EngineError {
    /// Short code the UI shell can map to its own message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "division_by_zero",
            Self::InvalidOperand(_) => "invalid_operand",
            Self::Overflow => "overflow",
        }
    }
}
