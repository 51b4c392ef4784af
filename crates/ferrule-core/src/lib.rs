//! Ferrule Core
//!
//! Coordination layer for the navigation engine: owns configuration, the
//! document loader and script executor, the deferred task queue and every
//! open window. Script turns run through [`Browser::run_turn`], which drains
//! deferred navigations once the turn has finished.

mod browser;
mod config;
mod error;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

// Re-export navigation components
pub use ferrule_navigation::{
    Address, AddressError, CompatMode, Document, DocumentLoader, DrainReport, LoadError,
    LoadRequest, Location, NavigationError, NavigationPhase, ScriptError, ScriptExecutor,
    StaticLoader, Window,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}
