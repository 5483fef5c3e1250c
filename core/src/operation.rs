//! Arithmetic operations and the pure `apply` function.
//!
//! An `Operation` is a stateless tag. `apply` combines the accumulator
//! (`previous`) with the operand that was typed after the operator.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Binary operation selected by an operator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Percent of the accumulator, interpreted through the last binary operation.
    PercentOf,
}

impl Operation {
    /// Glyph shown in the auxiliary display.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
            Self::PercentOf => '%',
        }
    }

    /// Map an operator character to one of the four binary operations.
    ///
    /// `%` is not mapped here: percent is a separate event that modifies the
    /// pending operation instead of selecting a new one.
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// True for the four operations an operator key can select.
    pub fn is_binary(self) -> bool {
        !matches!(self, Self::PercentOf)
    }
}

/// Compute `previous <op> operand`.
///
/// `last_op` is only consulted for `PercentOf`, which scales the operand to a
/// fraction of `previous` and then applies the last binary operation. Percent
/// with no last operation, or chained on itself, leaves `previous` unchanged.
pub fn apply(
    op: Operation,
    operand: f64,
    previous: f64,
    last_op: Option<Operation>,
) -> Result<f64, EngineError> {
    let result = match op {
        Operation::Add => previous + operand,
        Operation::Subtract => previous - operand,
        Operation::Multiply => previous * operand,
        Operation::Divide => {
            if operand == 0.0 {
                return Err(EngineError::DivisionByZero);
            }
            previous / operand
        }
        Operation::PercentOf => {
            let fraction = operand / 100.0;
            match last_op {
                Some(Operation::Add) => previous + previous * fraction,
                Some(Operation::Subtract) => previous - previous * fraction,
                Some(Operation::Multiply) => previous * fraction,
                Some(Operation::Divide) => {
                    if operand == 0.0 {
                        return Err(EngineError::DivisionByZero);
                    }
                    previous / fraction
                }
                Some(Operation::PercentOf) | None => previous,
            }
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(EngineError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operations() {
        assert_eq!(apply(Operation::Add, 25.0, 50.0, None), Ok(75.0));
        assert_eq!(apply(Operation::Subtract, 8.0, 5.0, None), Ok(-3.0));
        assert_eq!(apply(Operation::Multiply, 4.0, 2.5, None), Ok(10.0));
        assert_eq!(apply(Operation::Divide, 4.0, 10.0, None), Ok(2.5));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            apply(Operation::Divide, 0.0, 10.0, None),
            Err(EngineError::DivisionByZero)
        );
        // Negative zero is still zero
        assert_eq!(
            apply(Operation::Divide, -0.0, 10.0, None),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_percent_under_each_operation() {
        let pct = |last| apply(Operation::PercentOf, 10.0, 200.0, Some(last));
        assert_eq!(pct(Operation::Add), Ok(220.0));
        assert_eq!(pct(Operation::Subtract), Ok(180.0));
        assert_eq!(pct(Operation::Multiply), Ok(20.0));
        assert_eq!(pct(Operation::Divide), Ok(2000.0));
    }

    #[test]
    fn test_percent_under_divide_by_zero() {
        assert_eq!(
            apply(Operation::PercentOf, 0.0, 200.0, Some(Operation::Divide)),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_percent_without_binary_last_op_is_noop() {
        assert_eq!(apply(Operation::PercentOf, 10.0, 200.0, None), Ok(200.0));
        assert_eq!(
            apply(Operation::PercentOf, 10.0, 200.0, Some(Operation::PercentOf)),
            Ok(200.0)
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            apply(Operation::Multiply, 10.0, f64::MAX, None),
            Err(EngineError::Overflow)
        );
        assert_eq!(
            apply(Operation::Divide, 1e-300, 1e300, None),
            Err(EngineError::Overflow)
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Operation::from_symbol('+'), Some(Operation::Add));
        assert_eq!(Operation::from_symbol('x'), Some(Operation::Multiply));
        assert_eq!(Operation::from_symbol('÷'), Some(Operation::Divide));
        assert_eq!(Operation::from_symbol('%'), None);
        assert_eq!(Operation::Multiply.symbol(), '×');
        assert!(!Operation::PercentOf.is_binary());
    }
}
