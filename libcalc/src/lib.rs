//! libcalc crate root
//!
//! Front-end pieces around `libcalc-core`: configuration file handling,
//! logging setup and the key sequence runner used by the `libcalc` binary.

pub mod config;
pub mod logging;
pub mod runner;

// Re-export the engine API from core.
pub use libcalc_core::{
    apply, CalcEngine, Config, DisplayContext, EngineError, EngineMode, EngineState, InputBuffer,
    KeyEvent, KeyResult, OperandPolicy, Operation,
};

pub use config::CalculatorConfig;
pub use runner::{render, run_keys, Report, Step};

/// Create an engine from a front-end config.
pub fn engine_from_config(config: &CalculatorConfig) -> CalcEngine {
    CalcEngine::with_config(config.base().clone())
}
