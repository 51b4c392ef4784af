//! Navigation lifecycle of a window
//!
//! ```text
//! Uninitialized
//!   ↓ first document
//! Attached ──replace()──→ Deferred
//!   ↓ assign / setters / reload   ↓ turn ends
//! Navigating ←────────────────────┘
//!   ↓ document replaced
//! Attached (fresh navigation state)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPhase {
    /// No document has been loaded yet
    Uninitialized,
    /// A document and its navigation state are live
    Attached,
    /// A `replace()` is queued for the end of the current turn
    Deferred,
    /// The document loader is fetching a replacement
    Navigating,
}

impl NavigationPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, NavigationPhase::Navigating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationPhase::Uninitialized => "uninitialized",
            NavigationPhase::Attached => "attached",
            NavigationPhase::Deferred => "deferred",
            NavigationPhase::Navigating => "navigating",
        }
    }
}

impl std::fmt::Display for NavigationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
