//! Calculator engine with key event processing.
//!
//! `CalcEngine` owns one session (`EngineState`), the configuration and the
//! `DisplayContext` the UI shell reads. Every event method returns the new
//! display string or the error that stopped the event; `process_key` routes a
//! `KeyEvent` to the matching method.

use crate::context::DisplayContext;
use crate::error::EngineError;
use crate::format;
use crate::operation::Operation;
use crate::session::{EngineMode, EngineState};
use crate::Config;

/// Input events the engine can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Digit key ('0'..='9')
    Digit(char),
    /// Decimal point
    Dot,
    /// Plus/minus key
    ToggleSign,
    /// Remove last character (swipe or backspace)
    Backspace,
    /// AC: reset the session
    Clear,
    /// One of the four binary operators
    Operator(Operation),
    /// Percent key (modifies the pending operation)
    Percent,
    /// Equals key
    Equals,
    /// Raw character, translated through the configured key bindings
    Char(char),
}

/// Result of processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Event applied (possibly as a documented no-op)
    Handled,
    /// Event failed; state is unchanged and the error is in the context
    Rejected(EngineError),
    /// Event is not a calculator input (pass through to the shell)
    NotHandled,
}

/// Calculator engine for one session.
///
/// Events must be delivered one at a time in arrival order; the engine has
/// no interior locking.
#[derive(Debug, Clone)]
pub struct CalcEngine {
    state: EngineState,
    config: Config,
    context: DisplayContext,
}

impl CalcEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an engine with the given configuration.
    pub fn with_config(config: Config) -> Self {
        let mut engine = Self {
            state: EngineState::new(),
            config,
            context: DisplayContext::new(),
        };
        engine.sync_context();
        engine
    }

    /// Get the session state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the display context for rendering.
    pub fn context(&self) -> &DisplayContext {
        &self.context
    }

    /// Current display string.
    pub fn display(&self) -> &str {
        &self.context.display_text
    }

    /// Type a digit. Non-digits are a caller error and are ignored.
    pub fn digit(&mut self, d: char) -> Result<String, EngineError> {
        if !self.state.digit(d) {
            tracing::warn!(
                "digit: {:?} not accepted after {:?}",
                d,
                self.state.input_buffer().text()
            );
        }
        self.finish(Ok(()))
    }

    /// Type a decimal point.
    pub fn dot(&mut self) -> Result<String, EngineError> {
        self.state.dot();
        self.finish(Ok(()))
    }

    /// Flip the operand sign.
    pub fn toggle_sign(&mut self) -> Result<String, EngineError> {
        self.state.toggle_sign();
        self.finish(Ok(()))
    }

    /// Remove the last typed character.
    pub fn backspace(&mut self) -> Result<String, EngineError> {
        self.state.backspace();
        self.finish(Ok(()))
    }

    /// Reset the session. Always succeeds.
    pub fn clear(&mut self) -> Result<String, EngineError> {
        self.state.clear();
        self.context.clear();
        tracing::debug!("clear: session reset");
        self.finish(Ok(()))
    }

    /// Capture the operand and queue a binary operation.
    pub fn select_operation(&mut self, op: Operation) -> Result<String, EngineError> {
        let outcome = self
            .state
            .select_operation(op, self.config.operand_policy)
            .map(|selected| {
                if selected {
                    tracing::debug!(
                        "select_operation: {} {}",
                        self.state.accumulator(),
                        op.symbol()
                    );
                } else {
                    tracing::warn!("select_operation: {:?} is not a binary operation", op);
                }
            });
        self.finish(outcome)
    }

    /// Turn the pending operation into a percent of the accumulator.
    pub fn select_percent(&mut self) -> Result<String, EngineError> {
        if !self.state.select_percent() {
            tracing::debug!("select_percent: nothing pending");
        }
        self.finish(Ok(()))
    }

    /// Apply the pending operation.
    pub fn equals(&mut self) -> Result<String, EngineError> {
        let pending = self.state.pending_operation();
        let outcome = self
            .state
            .equals(self.config.operand_policy)
            .map(|result| match (pending, result) {
                (Some(op), Some(value)) => {
                    tracing::debug!("equals: {:?} -> {}", op, value);
                }
                _ => tracing::debug!("equals: nothing pending"),
            });
        self.finish(outcome)
    }

    /// Process a key event and update the display context.
    ///
    /// After calling this, the shell should read `context()` to render.
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        let key = match key {
            KeyEvent::Char(ch) => match self.config.binding_for(ch) {
                Some(event) => event,
                None => {
                    tracing::trace!("process_key: unbound char {:?}", ch);
                    return KeyResult::NotHandled;
                }
            },
            other => other,
        };

        let outcome = match key {
            KeyEvent::Digit(d) if !d.is_ascii_digit() => return KeyResult::NotHandled,
            KeyEvent::Operator(op) if !op.is_binary() => return KeyResult::NotHandled,
            KeyEvent::Digit(d) => self.digit(d),
            KeyEvent::Dot => self.dot(),
            KeyEvent::ToggleSign => self.toggle_sign(),
            KeyEvent::Backspace => self.backspace(),
            KeyEvent::Clear => self.clear(),
            KeyEvent::Operator(op) => self.select_operation(op),
            KeyEvent::Percent => self.select_percent(),
            KeyEvent::Equals => self.equals(),
            KeyEvent::Char(_) => unreachable!("chars are translated before routing"),
        };

        match outcome {
            Ok(_) => KeyResult::Handled,
            Err(e) => KeyResult::Rejected(e),
        }
    }

    /// Record the outcome of an event in the context.
    fn finish(&mut self, outcome: Result<(), EngineError>) -> Result<String, EngineError> {
        match outcome {
            Ok(()) => {
                self.context.error = None;
                self.sync_context();
                Ok(self.context.display_text.clone())
            }
            Err(e) => {
                tracing::warn!("event rejected: {}", e);
                self.context.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Refresh display, pending symbol and hint text from the state.
    fn sync_context(&mut self) {
        self.context.display_text = self.format_for_display(self.state.display());

        match (self.state.mode(), self.state.pending_operation()) {
            (EngineMode::AwaitingOperand, Some(op)) => {
                let previous = self.format_for_display(&format::canonical(self.state.accumulator()));
                self.context.pending_symbol = Some(op.symbol());
                self.context.auxiliary_text = match (op, self.state.last_operation()) {
                    (Operation::PercentOf, Some(last)) => {
                        format!("{} {} %", previous, last.symbol())
                    }
                    _ => format!("{} {}", previous, op.symbol()),
                };
            }
            _ => {
                self.context.pending_symbol = None;
                self.context.auxiliary_text.clear();
            }
        }
    }

    fn format_for_display(&self, text: &str) -> String {
        if self.config.thousands_separator {
            format::group_thousands(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for CalcEngine {
    fn default() -> Self {
        Self::new()
    }
}
