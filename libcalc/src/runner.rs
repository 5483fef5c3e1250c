//! Key sequence runner shared by the REPL and `eval`.

use libcalc_core::{CalcEngine, DisplayContext, EngineState, KeyEvent, KeyResult};
use serde::Serialize;

/// One key press and the display it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub key: char,
    pub result: KeyResult,
    pub display: String,
}

/// Feed every non-whitespace char of `keys` to the engine, in order.
///
/// Unbound characters are reported as `KeyResult::NotHandled` steps and do
/// not stop the sequence; neither do rejected events.
pub fn run_keys(engine: &mut CalcEngine, keys: &str) -> Vec<Step> {
    keys.chars()
        .filter(|c| !c.is_whitespace())
        .map(|key| {
            let result = engine.process_key(KeyEvent::Char(key));
            if result == KeyResult::NotHandled {
                tracing::debug!("run_keys: {:?} not bound, skipped", key);
            }
            Step {
                key,
                result,
                display: engine.display().to_string(),
            }
        })
        .collect()
}

/// Snapshot of the engine for JSON output.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub context: &'a DisplayContext,
    pub state: &'a EngineState,
}

impl<'a> Report<'a> {
    pub fn of(engine: &'a CalcEngine) -> Self {
        Self {
            context: engine.context(),
            state: engine.state(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render a display line, with the error (if any) the way the REPL prints it.
pub fn render(context: &DisplayContext) -> String {
    match &context.error {
        Some(e) => format!("{}  [error: {}]", context.display_text, e),
        None if !context.auxiliary_text.is_empty() => {
            format!("{}  ({})", context.display_text, context.auxiliary_text)
        }
        None => context.display_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcalc_core::EngineError;

    #[test]
    fn test_run_keys_skips_whitespace() {
        let mut engine = CalcEngine::new();
        let steps = run_keys(&mut engine, "1 2 + 3");
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].display, "12");
        assert_eq!(steps[3].display, "3");
    }

    #[test]
    fn test_run_keys_reports_unbound() {
        let mut engine = CalcEngine::new();
        let steps = run_keys(&mut engine, "4?");
        assert_eq!(steps[1].result, KeyResult::NotHandled);
        assert_eq!(steps[1].display, "4");
    }

    #[test]
    fn test_render() {
        let mut engine = CalcEngine::new();
        run_keys(&mut engine, "8+");
        assert_eq!(render(engine.context()), "0  (8 +)");

        run_keys(&mut engine, "0=");
        assert_eq!(render(engine.context()), "8");

        run_keys(&mut engine, "/0=");
        assert_eq!(engine.context().error, Some(EngineError::DivisionByZero));
        assert_eq!(render(engine.context()), "0  [error: division by zero]");
    }
}
