//! Per-document navigation state

use std::sync::{Arc, Weak};

use crate::document::Document;
use crate::fragment::FragmentCache;
use crate::window::Window;

/// Navigation state for the document currently loaded in a window.
///
/// Owned by the window; holds only a weak reference back to it. A fresh
/// state is built for every document the window receives.
#[derive(Debug)]
pub struct NavigationState {
    window: Weak<Window>,
    fragment: FragmentCache,
}

impl NavigationState {
    pub(crate) fn attach(window: &Arc<Window>, document: &Document) -> Self {
        Self {
            window: Arc::downgrade(window),
            fragment: FragmentCache::seeded(
                window.compat_mode(),
                document.current_address().fragment(),
            ),
        }
    }

    pub fn window(&self) -> Option<Arc<Window>> {
        self.window.upgrade()
    }

    pub fn fragment(&self) -> &FragmentCache {
        &self.fragment
    }

    pub fn fragment_mut(&mut self) -> &mut FragmentCache {
        &mut self.fragment
    }
}
