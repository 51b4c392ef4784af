//! Window / document binding
//!
//! A window owns at most one attachment: the document it currently shows
//! together with that document's navigation state. Both are swapped in a
//! single write so there is never more than one live navigation state.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::compat::CompatMode;
use crate::document::Document;
use crate::phase::NavigationPhase;
use crate::state::NavigationState;

#[derive(Debug)]
struct Attachment {
    document: Arc<Document>,
    navigation: NavigationState,
}

#[derive(Debug)]
pub struct Window {
    id: String,
    name: String,
    compat_mode: CompatMode,
    attachment: RwLock<Option<Attachment>>,
    /// Number of documents this window has received
    generation: AtomicU64,
    in_flight: AtomicUsize,
    deferred: AtomicUsize,
    closed: AtomicBool,
}

impl Window {
    pub fn new(name: impl Into<String>, compat_mode: CompatMode) -> Arc<Self> {
        let window = Arc::new(Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            compat_mode,
            attachment: RwLock::new(None),
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            deferred: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        });

        tracing::debug!(window_id = %window.id, name = %window.name, mode = %compat_mode, "Created window");

        window
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn compat_mode(&self) -> CompatMode {
        self.compat_mode
    }

    pub fn current_document(&self) -> Option<Arc<Document>> {
        self.attachment
            .read()
            .as_ref()
            .map(|a| Arc::clone(&a.document))
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.read().is_some()
    }

    /// Mark the window closed. Locations stop navigating it even while
    /// other handles keep it alive.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!(window_id = %self.id, "Window marked closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> NavigationPhase {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            NavigationPhase::Navigating
        } else if self.deferred.load(Ordering::SeqCst) > 0 {
            NavigationPhase::Deferred
        } else if self.is_attached() {
            NavigationPhase::Attached
        } else {
            NavigationPhase::Uninitialized
        }
    }

    /// Install `document`, discarding the previous document and its
    /// navigation state. The new state is seeded from the document's own
    /// fragment.
    pub fn replace_document(self: &Arc<Self>, document: Document) -> Arc<Document> {
        let document = Arc::new(document);
        let navigation = NavigationState::attach(self, &document);

        let previous = self.attachment.write().replace(Attachment {
            document: Arc::clone(&document),
            navigation,
        });
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            window_id = %self.id,
            url = %document.current_address(),
            generation,
            replaced = previous.is_some(),
            "Window received document"
        );

        document
    }

    /// Read the current document and navigation state together
    pub fn with_navigation<R>(
        &self,
        f: impl FnOnce(&Document, &NavigationState) -> R,
    ) -> Option<R> {
        let guard = self.attachment.read();
        guard.as_ref().map(|a| f(&*a.document, &a.navigation))
    }

    pub fn with_navigation_mut<R>(
        &self,
        f: impl FnOnce(&mut NavigationState) -> R,
    ) -> Option<R> {
        let mut guard = self.attachment.write();
        guard.as_mut().map(|a| f(&mut a.navigation))
    }

    pub(crate) fn begin_navigation(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlight(&self.in_flight)
    }

    pub(crate) fn defer_navigation(&self) {
        self.deferred.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn finish_deferred(&self) {
        let _ = self
            .deferred
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}

/// Marks a window as navigating until dropped
pub(crate) struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
