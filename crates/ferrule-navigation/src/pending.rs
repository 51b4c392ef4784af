//! Navigations postponed to the end of the current turn

use crate::location::Location;
use crate::Result;

/// A `location.replace()` target waiting for the turn to end. The target is
/// kept as written and only resolved when the navigation runs.
#[derive(Debug)]
pub struct PendingNavigation {
    location: Location,
    target: String,
}

impl PendingNavigation {
    pub(crate) fn new(location: Location, target: impl Into<String>) -> Self {
        Self {
            location,
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Consume the pending navigation and perform it
    pub(crate) fn execute(self) -> Result<()> {
        if let Some(window) = self.location.window() {
            window.finish_deferred();
        }
        self.location.set_href(&self.target)
    }
}
