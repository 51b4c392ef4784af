//! Browser configuration

use serde::{Deserialize, Serialize};

use ferrule_navigation::CompatMode;

use crate::error::CoreError;
use crate::Result;

const COMPAT_MODE_VAR: &str = "FERRULE_COMPAT_MODE";
const LOG_FILTER_VAR: &str = "FERRULE_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Emulated browser family; decides how location hashes are transcoded
    pub compat_mode: CompatMode,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    pub fn new(compat_mode: CompatMode) -> Self {
        Self {
            compat_mode,
            log_filter: "info".to_string(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Defaults overridden by `FERRULE_COMPAT_MODE` and `FERRULE_LOG`
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(mode) = lookup(COMPAT_MODE_VAR) {
            config.compat_mode = mode
                .parse()
                .map_err(|e: String| CoreError::Config(format!("{}: {}", COMPAT_MODE_VAR, e)))?;
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(CompatMode::default())
    }
}
