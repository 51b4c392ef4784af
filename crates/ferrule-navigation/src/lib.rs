//! Ferrule Navigation
//!
//! The state machine behind `window.location`:
//! - Hash writes update a per-document fragment cache and never load
//! - Writes to host, hostname, port, pathname, search, protocol or href
//!   rebuild the address and always load it
//! - `replace()` is postponed to a deferred queue drained after the turn
//! - `javascript:` targets run as inline script instead of navigating

mod compat;
mod context;
mod deferred;
mod document;
mod error;
mod fragment;
mod host;
mod loader;
mod location;
mod pending;
mod phase;
mod state;
mod window;

#[cfg(test)]
mod testing;

pub use compat::CompatMode;
pub use context::NavigationContext;
pub use deferred::{DeferredQueue, DrainReport, TaskId};
pub use document::Document;
pub use error::{LoadError, NavigationError, ScriptError};
pub use fragment::FragmentCache;
pub use host::{DocumentLoader, LoadRequest, ScriptExecutor};
pub use loader::StaticLoader;
pub use location::{Location, JAVASCRIPT_PREFIX, UNKNOWN_HREF};
pub use pending::PendingNavigation;
pub use phase::NavigationPhase;
pub use state::NavigationState;
pub use window::Window;

pub use ferrule_url::{Address, AddressError};

pub type Result<T> = std::result::Result<T, NavigationError>;
