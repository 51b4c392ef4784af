//! Collaborators the navigation core drives but does not implement

use ferrule_url::Address;

use crate::document::Document;
use crate::error::{LoadError, ScriptError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub address: Address,
    /// Set by a forced reload
    pub bypass_cache: bool,
}

impl LoadRequest {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            bypass_cache: false,
        }
    }

    pub fn bypassing_cache(mut self, bypass: bool) -> Self {
        self.bypass_cache = bypass;
        self
    }
}

/// Fetches and parses the resource behind an address.
///
/// Called with no window state locked, possibly from inside a deferred task,
/// so implementations may navigate other windows.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, request: &LoadRequest) -> Result<Document, LoadError>;
}

/// Runs `javascript:` URL bodies against a document
pub trait ScriptExecutor: Send + Sync {
    fn execute_inline(
        &self,
        document: &Document,
        source: &str,
        origin: &str,
    ) -> Result<(), ScriptError>;
}
