//! Calculator session state.
//!
//! `EngineState` is the whole mutable state of a calculator session. Each
//! transition method handles one input event; the wrapper in `engine` adds
//! configuration, logging and the display context on top.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::format;
use crate::input_buffer::{InputBuffer, OperandPolicy};
use crate::operation::{apply, Operation};

/// State-machine state, derived from the pending operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineMode {
    /// No operation pending
    #[default]
    Idle,
    /// Operator selected, second operand being typed
    AwaitingOperand,
}

/// Session state: operand text, running total and operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Operand being typed (e.g. "12.5")
    input_buffer: InputBuffer,

    /// Running total from prior operations; always finite
    accumulator: f64,

    /// Operator selected but not yet applied
    pending_operation: Option<Operation>,

    /// Last binary operator selected, kept across equals for percent
    last_operation: Option<Operation>,
}

impl EngineState {
    /// Create the initial session state.
    pub fn new() -> Self {
        Self {
            input_buffer: InputBuffer::new(),
            accumulator: 0.0,
            pending_operation: None,
            last_operation: None,
        }
    }

    /// Get the input buffer.
    pub fn input_buffer(&self) -> &InputBuffer {
        &self.input_buffer
    }

    /// Get the accumulator.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Get the pending operation.
    pub fn pending_operation(&self) -> Option<Operation> {
        self.pending_operation
    }

    /// Get the last selected operation.
    pub fn last_operation(&self) -> Option<Operation> {
        self.last_operation
    }

    /// Current state-machine state.
    pub fn mode(&self) -> EngineMode {
        if self.pending_operation.is_some() {
            EngineMode::AwaitingOperand
        } else {
            EngineMode::Idle
        }
    }

    /// Text the display should show for this state.
    pub fn display(&self) -> &str {
        self.input_buffer.display()
    }

    /// Type a digit. Returns false for anything outside '0'..='9'.
    pub fn digit(&mut self, d: char) -> bool {
        self.input_buffer.push_digit(d)
    }

    /// Type a decimal point. Returns false if the operand already has one.
    pub fn dot(&mut self) -> bool {
        self.input_buffer.push_dot()
    }

    /// Flip the sign of the operand text.
    pub fn toggle_sign(&mut self) {
        self.input_buffer.toggle_sign();
    }

    /// Remove the last typed character. Returns false while showing "0".
    pub fn backspace(&mut self) -> bool {
        self.input_buffer.pop()
    }

    /// Reset everything to the initial state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Capture the operand into the accumulator and queue `op`.
    ///
    /// A previously pending operation is replaced without being applied.
    /// Returns `Ok(false)` for `PercentOf`, which cannot be selected this way.
    pub fn select_operation(
        &mut self,
        op: Operation,
        policy: OperandPolicy,
    ) -> Result<bool, EngineError> {
        if !op.is_binary() {
            return Ok(false);
        }

        let operand = self.input_buffer.parse(policy)?;
        self.accumulator = operand;
        self.input_buffer.clear();
        self.pending_operation = Some(op);
        self.last_operation = Some(op);
        Ok(true)
    }

    /// Turn the pending operation into a percent. Returns false when idle.
    pub fn select_percent(&mut self) -> bool {
        if self.pending_operation.is_none() {
            return false;
        }
        self.pending_operation = Some(Operation::PercentOf);
        true
    }

    /// Apply the pending operation to the accumulator and the operand.
    ///
    /// Returns `Ok(None)` when nothing is pending. On error the state is
    /// left untouched.
    pub fn equals(&mut self, policy: OperandPolicy) -> Result<Option<f64>, EngineError> {
        let Some(op) = self.pending_operation else {
            return Ok(None);
        };

        let operand = self.input_buffer.parse(policy)?;
        let result = apply(op, operand, self.accumulator, self.last_operation)?;

        self.input_buffer.set(format::canonical(result));
        self.accumulator = result;
        self.pending_operation = None;
        Ok(Some(result))
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(state: &mut EngineState, digits: &str) {
        for d in digits.chars() {
            assert!(state.digit(d));
        }
    }

    #[test]
    fn test_initial_state() {
        let state = EngineState::new();
        assert_eq!(state.input_buffer().text(), "0");
        assert_eq!(state.accumulator(), 0.0);
        assert_eq!(state.pending_operation(), None);
        assert_eq!(state.last_operation(), None);
        assert_eq!(state.mode(), EngineMode::Idle);
    }

    #[test]
    fn test_select_operation_captures_operand() {
        let mut state = EngineState::new();
        type_digits(&mut state, "50");
        assert_eq!(
            state.select_operation(Operation::Add, OperandPolicy::default()),
            Ok(true)
        );

        assert_eq!(state.accumulator(), 50.0);
        assert!(state.input_buffer().is_empty());
        assert_eq!(state.display(), "0");
        assert_eq!(state.pending_operation(), Some(Operation::Add));
        assert_eq!(state.last_operation(), Some(Operation::Add));
        assert_eq!(state.mode(), EngineMode::AwaitingOperand);
    }

    #[test]
    fn test_chained_operator_replaces_pending() {
        let mut state = EngineState::new();
        type_digits(&mut state, "8");
        state
            .select_operation(Operation::Add, OperandPolicy::default())
            .unwrap();
        type_digits(&mut state, "2");
        state
            .select_operation(Operation::Multiply, OperandPolicy::default())
            .unwrap();

        // 8 + is discarded; 2 is the captured operand
        assert_eq!(state.accumulator(), 2.0);
        assert_eq!(state.pending_operation(), Some(Operation::Multiply));

        type_digits(&mut state, "3");
        assert_eq!(state.equals(OperandPolicy::default()), Ok(Some(6.0)));
    }

    #[test]
    fn test_operator_on_operator_captures_zero() {
        let mut state = EngineState::new();
        type_digits(&mut state, "9");
        state
            .select_operation(Operation::Add, OperandPolicy::default())
            .unwrap();
        state
            .select_operation(Operation::Subtract, OperandPolicy::Reject)
            .unwrap();
        assert_eq!(state.accumulator(), 0.0);
    }

    #[test]
    fn test_select_percent_operation_is_refused() {
        let mut state = EngineState::new();
        type_digits(&mut state, "4");
        assert_eq!(
            state.select_operation(Operation::PercentOf, OperandPolicy::default()),
            Ok(false)
        );
        assert_eq!(state, {
            let mut expected = EngineState::new();
            expected.digit('4');
            expected
        });
    }

    #[test]
    fn test_select_percent_requires_pending() {
        let mut state = EngineState::new();
        assert!(!state.select_percent());
        assert_eq!(state.pending_operation(), None);

        type_digits(&mut state, "200");
        state
            .select_operation(Operation::Subtract, OperandPolicy::default())
            .unwrap();
        assert!(state.select_percent());
        assert_eq!(state.pending_operation(), Some(Operation::PercentOf));
        assert_eq!(state.last_operation(), Some(Operation::Subtract));
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let mut state = EngineState::new();
        type_digits(&mut state, "12");
        let before = state.clone();
        assert_eq!(state.equals(OperandPolicy::default()), Ok(None));
        assert_eq!(state, before);
    }

    #[test]
    fn test_equals_keeps_last_operation() {
        let mut state = EngineState::new();
        type_digits(&mut state, "3");
        state
            .select_operation(Operation::Multiply, OperandPolicy::default())
            .unwrap();
        type_digits(&mut state, "4");
        assert_eq!(state.equals(OperandPolicy::default()), Ok(Some(12.0)));

        assert_eq!(state.input_buffer().text(), "12");
        assert_eq!(state.accumulator(), 12.0);
        assert_eq!(state.pending_operation(), None);
        assert_eq!(state.last_operation(), Some(Operation::Multiply));
    }

    #[test]
    fn test_equals_error_leaves_state() {
        let mut state = EngineState::new();
        type_digits(&mut state, "10");
        state
            .select_operation(Operation::Divide, OperandPolicy::default())
            .unwrap();
        type_digits(&mut state, "0");
        let before = state.clone();

        assert_eq!(
            state.equals(OperandPolicy::default()),
            Err(EngineError::DivisionByZero)
        );
        assert_eq!(state, before);
        assert_eq!(state.accumulator(), 10.0);
    }

    #[test]
    fn test_reject_policy_keeps_state() {
        let mut state = EngineState::new();
        state.clear();
        state.toggle_sign();
        state.toggle_sign();
        state.dot();
        // Buffer is "0." which parses fine
        assert_eq!(
            state.select_operation(Operation::Add, OperandPolicy::Reject),
            Ok(true)
        );

        state.toggle_sign();
        let before = state.clone();
        assert_eq!(
            state.equals(OperandPolicy::Reject),
            Err(EngineError::InvalidOperand("-".to_string()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = EngineState::new();
        type_digits(&mut state, "7");
        state
            .select_operation(Operation::Divide, OperandPolicy::default())
            .unwrap();
        state.select_percent();
        state.clear();
        assert_eq!(state, EngineState::new());
    }
}
