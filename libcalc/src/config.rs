//! Front-end configuration that extends the engine `Config` from core.
//!
//! This configuration includes:
//! - All engine options from `libcalc_core::Config` (flattened via serde)
//! - The default log level for the binary
//!
//! # Example
//!
//! ```rust
//! use libcalc::CalculatorConfig;
//!
//! let config = CalculatorConfig::default();
//! let base_config = config.into_base();
//! // Use base_config with CalcEngine::with_config()
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CalculatorConfig {
    /// Engine options (operand policy, display, key bindings)
    #[serde(flatten)]
    pub base: libcalc_core::Config,

    /// Log filter used when RUST_LOG is not set (e.g. "warn", "libcalc_core=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            base: libcalc_core::Config::default(),
            log_level: default_log_level(),
        }
    }
}

impl CalculatorConfig {
    /// Convert this config into the engine config for `CalcEngine::with_config()`
    pub fn into_base(self) -> libcalc_core::Config {
        self.base
    }

    /// Get a reference to the engine config
    pub fn base(&self) -> &libcalc_core::Config {
        &self.base
    }

    /// Get a mutable reference to the engine config
    pub fn base_mut(&mut self) -> &mut libcalc_core::Config {
        &mut self.base
    }

    /// `~/.libcalc/config.toml`, falling back to the working directory
    /// when no home directory is set.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".libcalc").join("config.toml")
    }

    /// Config file to use: the explicit `--config` path if given, else
    /// `default_path()`. Both loading and `config --write` go through this.
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(Self::default_path)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from `path`. A missing file yields the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = self.to_toml_string()?;
        std::fs::write(path, content).with_context(|| format!("writing config {}", path.display()))
    }
}
