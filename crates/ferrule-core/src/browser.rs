//! Main browser state container
//!
//! Owns every open window and the collaborators they navigate through.
//! Script code runs in turns; navigations postponed by `location.replace()`
//! run when the turn that requested them has finished.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ferrule_navigation::{
    DocumentLoader, DrainReport, Location, NavigationContext, ScriptExecutor, Window,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Browser {
    /// Configuration
    config: Config,
    /// Loader, script executor and deferred queue shared by every window
    context: Arc<NavigationContext>,
    /// Open windows by ID
    windows: Arc<RwLock<HashMap<String, Arc<Window>>>>,
    /// Number of turns started
    turns: Arc<AtomicU64>,
}

impl Browser {
    pub fn new(
        config: Config,
        loader: Arc<dyn DocumentLoader>,
        scripts: Arc<dyn ScriptExecutor>,
    ) -> Self {
        tracing::info!(mode = %config.compat_mode, "Browser initialized");

        Self {
            config,
            context: Arc::new(NavigationContext::new(loader, scripts)),
            windows: Arc::new(RwLock::new(HashMap::new())),
            turns: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Window operations ===

    /// Open a window with no document loaded
    pub fn open_window(&self, name: impl Into<String>) -> Arc<Window> {
        let window = Window::new(name, self.config.compat_mode);
        self.windows
            .write()
            .insert(window.id().to_string(), Arc::clone(&window));

        tracing::info!(window_id = %window.id(), name = %window.name(), "Opened window");

        window
    }

    /// Open a window and load `url` into it. The window is not kept if the
    /// first load fails.
    pub fn open_window_at(&self, name: impl Into<String>, url: &str) -> Result<Arc<Window>> {
        let window = self.open_window(name);

        if let Err(e) = Location::new(&window, Arc::clone(&self.context)).assign(url) {
            self.windows.write().remove(window.id());
            return Err(e.into());
        }

        Ok(window)
    }

    pub fn window(&self, window_id: &str) -> Result<Arc<Window>> {
        self.windows
            .read()
            .get(window_id)
            .cloned()
            .ok_or_else(|| CoreError::WindowNotFound(window_id.to_string()))
    }

    pub fn windows(&self) -> Vec<Arc<Window>> {
        self.windows.read().values().cloned().collect()
    }

    /// Close a window. Navigations still queued for it fail when drained,
    /// including when callers still hold the window.
    pub fn close_window(&self, window_id: &str) -> Result<()> {
        let window = self
            .windows
            .write()
            .remove(window_id)
            .ok_or_else(|| CoreError::WindowNotFound(window_id.to_string()))?;
        window.close();

        tracing::info!(window_id = %window_id, "Closed window");

        Ok(())
    }

    /// The `location` object of an open window
    pub fn location(&self, window_id: &str) -> Result<Location> {
        let window = self.window(window_id)?;
        Ok(Location::new(&window, Arc::clone(&self.context)))
    }

    // === Turns ===

    /// Run one script turn, then drain navigations it deferred
    pub fn run_turn<T>(&self, turn: impl FnOnce(&Self) -> T) -> T {
        let number = self.turns.fetch_add(1, Ordering::SeqCst) + 1;

        let output = {
            let span = tracing::debug_span!("turn", turn = number);
            let _entered = span.enter();
            turn(self)
        };

        self.drain_deferred();
        output
    }

    pub fn drain_deferred(&self) -> DrainReport {
        self.context.queue().drain()
    }

    pub fn pending_tasks(&self) -> usize {
        self.context.queue().len()
    }

    pub fn turns_run(&self) -> u64 {
        self.turns.load(Ordering::SeqCst)
    }
}

impl Clone for Browser {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            context: Arc::clone(&self.context),
            windows: Arc::clone(&self.windows),
            turns: Arc::clone(&self.turns),
        }
    }
}
