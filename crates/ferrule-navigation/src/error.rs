//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] ferrule_url::AddressError),

    #[error("No document loaded in window {0}")]
    Unavailable(String),

    #[error("Failed to load {url}: {source}")]
    Load { url: String, source: LoadError },

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Window closed: {0}")]
    WindowClosed(String),
}

/// Failure reported by a [`DocumentLoader`](crate::DocumentLoader)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Failure reported by a [`ScriptExecutor`](crate::ScriptExecutor)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Script error in {origin}: {message}")]
pub struct ScriptError {
    pub origin: String,
    pub message: String,
}

impl ScriptError {
    pub fn new(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            message: message.into(),
        }
    }
}
