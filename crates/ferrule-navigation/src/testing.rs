//! Shared fixtures for unit tests

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

use ferrule_url::Address;

use crate::compat::CompatMode;
use crate::context::NavigationContext;
use crate::document::Document;
use crate::error::{LoadError, ScriptError};
use crate::host::{DocumentLoader, LoadRequest, ScriptExecutor};
use crate::loader::StaticLoader;
use crate::location::Location;
use crate::phase::NavigationPhase;
use crate::window::Window;

pub(crate) const START: &str = "http://example.com/a/b?x=1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScriptCall {
    pub url: String,
    pub source: String,
    pub origin: String,
}

#[derive(Default)]
pub(crate) struct RecordingScripts {
    calls: Mutex<Vec<ScriptCall>>,
    failure: Mutex<Option<String>>,
}

impl RecordingScripts {
    pub fn calls(&self) -> Vec<ScriptCall> {
        self.calls.lock().clone()
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }
}

impl ScriptExecutor for RecordingScripts {
    fn execute_inline(
        &self,
        document: &Document,
        source: &str,
        origin: &str,
    ) -> Result<(), ScriptError> {
        self.calls.lock().push(ScriptCall {
            url: document.current_address().href().to_string(),
            source: source.to_string(),
            origin: origin.to_string(),
        });
        match self.failure.lock().clone() {
            Some(message) => Err(ScriptError::new(origin, message)),
            None => Ok(()),
        }
    }
}

/// Wraps a [`StaticLoader`] and notes the phase of a watched window at each
/// load
pub(crate) struct ProbingLoader {
    inner: Arc<StaticLoader>,
    watched: Mutex<Option<Weak<Window>>>,
    phases: Mutex<Vec<NavigationPhase>>,
}

impl DocumentLoader for ProbingLoader {
    fn load(&self, request: &LoadRequest) -> Result<Document, LoadError> {
        if let Some(window) = self.watched.lock().as_ref().and_then(Weak::upgrade) {
            self.phases.lock().push(window.phase());
        }
        self.inner.load(request)
    }
}

pub(crate) struct Fixture {
    pub loader: Arc<StaticLoader>,
    pub scripts: Arc<RecordingScripts>,
    pub probe: Arc<ProbingLoader>,
    pub context: Arc<NavigationContext>,
    pub window: Arc<Window>,
    pub location: Location,
}

impl Fixture {
    /// Window already showing [`START`]; no load has been recorded
    pub fn new(mode: CompatMode) -> Self {
        Self::at(mode, START)
    }

    pub fn at(mode: CompatMode, url: &str) -> Self {
        let fx = Self::unattached(mode);
        fx.window
            .replace_document(Document::new(Address::parse(url).unwrap(), ""));
        fx
    }

    pub fn unattached(mode: CompatMode) -> Self {
        let loader = Arc::new(StaticLoader::new());
        let scripts = Arc::new(RecordingScripts::default());
        let probe = Arc::new(ProbingLoader {
            inner: Arc::clone(&loader),
            watched: Mutex::new(None),
            phases: Mutex::new(Vec::new()),
        });
        let context = Arc::new(NavigationContext::new(
            Arc::clone(&probe) as Arc<dyn DocumentLoader>,
            Arc::clone(&scripts) as Arc<dyn ScriptExecutor>,
        ));
        let window = Window::new("test", mode);
        let location = Location::new(&window, Arc::clone(&context));

        Self {
            loader,
            scripts,
            probe,
            context,
            window,
            location,
        }
    }

    pub fn serve(&self, url: &str) {
        self.loader
            .register(url, format!("<title>{url}</title>"))
            .unwrap();
    }

    pub fn loaded_urls(&self) -> Vec<String> {
        self.loader
            .requests()
            .into_iter()
            .map(|r| r.address.href().to_string())
            .collect()
    }

    pub fn loader_probe_window(&self, window: &Arc<Window>) {
        *self.probe.watched.lock() = Some(Arc::downgrade(window));
    }

    pub fn probed_phases(&self) -> Vec<NavigationPhase> {
        self.probe.phases.lock().clone()
    }
}
