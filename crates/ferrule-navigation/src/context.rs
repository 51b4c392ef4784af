//! Shared collaborators for every location in a browser

use std::sync::Arc;

use crate::deferred::DeferredQueue;
use crate::host::{DocumentLoader, ScriptExecutor};

pub struct NavigationContext {
    loader: Arc<dyn DocumentLoader>,
    scripts: Arc<dyn ScriptExecutor>,
    queue: DeferredQueue,
}

impl NavigationContext {
    pub fn new(loader: Arc<dyn DocumentLoader>, scripts: Arc<dyn ScriptExecutor>) -> Self {
        Self {
            loader,
            scripts,
            queue: DeferredQueue::new(),
        }
    }

    pub fn loader(&self) -> &dyn DocumentLoader {
        self.loader.as_ref()
    }

    pub fn scripts(&self) -> &dyn ScriptExecutor {
        self.scripts.as_ref()
    }

    pub fn queue(&self) -> &DeferredQueue {
        &self.queue
    }
}

impl std::fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationContext")
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}
