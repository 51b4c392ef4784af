//! `window.location`
//!
//! Decides, for every property write, whether it is a local fragment update
//! or a navigation. Hash writes only touch the fragment cache. Writes to any
//! other component rebuild the address and always load it, even when it is
//! unchanged. `replace()` is postponed to the end of the current turn.
//! Reading never navigates.

use std::sync::{Arc, Weak};

use ferrule_url::{parse_port, Address, AddressError};

use crate::context::NavigationContext;
use crate::deferred::TaskId;
use crate::error::NavigationError;
use crate::host::LoadRequest;
use crate::pending::PendingNavigation;
use crate::window::Window;
use crate::Result;

/// Reported as the href of a location with no document
pub const UNKNOWN_HREF: &str = "null";

pub const JAVASCRIPT_PREFIX: &str = "javascript:";

const SCRIPT_ORIGIN: &str = "new location value";

#[derive(Debug, Clone)]
pub struct Location {
    window: Weak<Window>,
    window_id: String,
    context: Arc<NavigationContext>,
}

impl Location {
    pub fn new(window: &Arc<Window>, context: Arc<NavigationContext>) -> Self {
        Self {
            window: Arc::downgrade(window),
            window_id: window.id().to_string(),
            context,
        }
    }

    /// The owning window, unless it has been dropped or closed
    pub fn window(&self) -> Option<Arc<Window>> {
        self.window.upgrade().filter(|w| !w.is_closed())
    }

    pub fn window_id(&self) -> &str {
        &self.window_id
    }

    // === Accessors ===

    /// Full address including the cached fragment
    pub fn href(&self) -> String {
        self.current_href()
            .unwrap_or_else(|| UNKNOWN_HREF.to_string())
    }

    pub fn to_display_string(&self) -> String {
        self.href()
    }

    pub fn hash(&self) -> String {
        self.window()
            .and_then(|w| w.with_navigation(|_, nav| nav.fragment().display()))
            .unwrap_or_default()
    }

    pub fn host(&self) -> String {
        self.committed(|a| a.host_and_port())
    }

    pub fn hostname(&self) -> String {
        self.committed(|a| a.host().to_string())
    }

    pub fn port(&self) -> String {
        self.committed(|a| a.port().map(|p| p.to_string()).unwrap_or_default())
    }

    pub fn pathname(&self) -> String {
        self.committed(|a| a.path().to_string())
    }

    pub fn search(&self) -> String {
        self.committed(|a| a.query().map(|q| format!("?{}", q)).unwrap_or_default())
    }

    pub fn protocol(&self) -> String {
        self.committed(|a| format!("{}:", a.scheme()))
    }

    // === Local mutation ===

    /// Update the cached fragment. Never loads anything.
    pub fn set_hash(&self, hash: Option<&str>) -> Result<()> {
        let window = self.live_window()?;
        window
            .with_navigation_mut(|nav| nav.fragment_mut().set(hash))
            .ok_or_else(|| NavigationError::Unavailable(self.window_id.clone()))?;

        tracing::debug!(window_id = %self.window_id, hash = ?hash, "Updated location hash");
        Ok(())
    }

    // === Navigating mutation ===

    pub fn assign(&self, url: &str) -> Result<()> {
        self.set_href(url)
    }

    /// Navigate to `target`, resolved against the current document.
    /// `javascript:` targets are executed instead.
    pub fn set_href(&self, target: &str) -> Result<()> {
        let window = self.live_window()?;
        let document = window.current_document();

        if let Some(source) = target.strip_prefix(JAVASCRIPT_PREFIX) {
            let document =
                document.ok_or_else(|| NavigationError::Unavailable(self.window_id.clone()))?;
            tracing::debug!(window_id = %self.window_id, "Executing javascript: location");
            self.context
                .scripts()
                .execute_inline(&document, source, SCRIPT_ORIGIN)?;
            return Ok(());
        }

        let resolved = match &document {
            Some(document) => document.resolve(target),
            None => Address::parse(target),
        };
        let address = resolved.map_err(|e| {
            tracing::error!(window_id = %self.window_id, target = %target, error = %e, "Rejected new location");
            e
        })?;

        self.commit_navigation(address, false)
    }

    pub fn set_hostname(&self, hostname: &str) -> Result<()> {
        let address = self.base_address()?.with_host(hostname)?;
        self.commit_navigation(address, false)
    }

    /// Set `hostname[:port]`. Without a port the current one is cleared.
    pub fn set_host(&self, host: &str) -> Result<()> {
        let (hostname, port) = split_host_port(host)?;
        let port = port.map(parse_port).transpose()?;
        let address = self
            .base_address()?
            .with_host(hostname)?
            .with_port(port)?;
        self.commit_navigation(address, false)
    }

    pub fn set_port(&self, port: &str) -> Result<()> {
        let port = parse_port(port)?;
        let address = self.base_address()?.with_port(Some(port))?;
        self.commit_navigation(address, false)
    }

    pub fn set_pathname(&self, pathname: &str) -> Result<()> {
        let address = self.base_address()?.with_path(pathname);
        self.commit_navigation(address, false)
    }

    /// Set the query. A leading `?` is optional; an empty value removes it.
    pub fn set_search(&self, search: &str) -> Result<()> {
        let query = search.strip_prefix('?').unwrap_or(search);
        let query = (!query.is_empty()).then_some(query);
        let address = self.base_address()?.with_query(query);
        self.commit_navigation(address, false)
    }

    pub fn set_protocol(&self, protocol: &str) -> Result<()> {
        let address = self.base_address()?.with_protocol(protocol)?;
        self.commit_navigation(address, false)
    }

    /// Load the current href again, fragment included. With no document
    /// loaded this is logged and otherwise ignored.
    pub fn reload(&self, force: bool) -> Result<()> {
        let Some(href) = self.current_href() else {
            let e = NavigationError::Unavailable(self.window_id.clone());
            tracing::error!(window_id = %self.window_id, error = %e, "Unable to reload location: current URL is unknown");
            return Ok(());
        };

        let address = Address::parse(&href)?;
        self.commit_navigation(address, force)
    }

    /// Queue a navigation to `url` for after the current turn. The target is
    /// resolved when the task runs.
    pub fn replace(&self, url: &str) -> TaskId {
        if let Some(window) = self.window() {
            window.defer_navigation();
        }

        let pending = PendingNavigation::new(self.clone(), url);
        tracing::debug!(window_id = %self.window_id, target = %pending.target(), "Postponed location.replace");

        self.context
            .queue()
            .enqueue(format!("location.replace({})", url), move || pending.execute())
    }

    /// Load `address` into the owning window, replacing its document.
    /// Blocks on the document loader.
    pub fn commit_navigation(&self, address: Address, bypass_cache: bool) -> Result<()> {
        let window = self.live_window()?;
        let request = LoadRequest::new(address).bypassing_cache(bypass_cache);

        tracing::info!(
            window_id = %self.window_id,
            url = %request.address,
            bypass_cache,
            "Navigating window"
        );

        let _in_flight = window.begin_navigation();
        let document = self.context.loader().load(&request).map_err(|source| {
            tracing::error!(window_id = %self.window_id, url = %request.address, error = %source, "Navigation failed");
            NavigationError::Load {
                url: request.address.to_string(),
                source,
            }
        })?;

        window.replace_document(document);
        Ok(())
    }

    // === Helpers ===

    fn live_window(&self) -> Result<Arc<Window>> {
        self.window()
            .ok_or_else(|| NavigationError::WindowClosed(self.window_id.clone()))
    }

    fn current_href(&self) -> Option<String> {
        self.window()?.with_navigation(|document, nav| {
            let fragment = nav.fragment().for_href();
            document
                .current_address()
                .with_new_fragment(fragment.as_deref())
                .href()
                .to_string()
        })
    }

    fn base_address(&self) -> Result<Address> {
        self.live_window()?
            .current_document()
            .map(|d| d.current_address().clone())
            .ok_or_else(|| NavigationError::Unavailable(self.window_id.clone()))
    }

    fn committed(&self, f: impl FnOnce(&Address) -> String) -> String {
        self.window()
            .and_then(|w| w.current_document())
            .map(|d| f(d.current_address()))
            .unwrap_or_default()
    }
}

/// Split `host[:port]`. Bracketed IPv6 literals keep their colons.
fn split_host_port(host: &str) -> std::result::Result<(&str, Option<&str>), AddressError> {
    if !host.starts_with('[') {
        return Ok(match host.split_once(':') {
            Some((hostname, port)) => (hostname, Some(port)),
            None => (host, None),
        });
    }

    let invalid = || AddressError::InvalidHost(host.to_string());
    let end = host.find(']').ok_or_else(invalid)?;
    let (hostname, rest) = host.split_at(end + 1);
    if rest.is_empty() {
        return Ok((hostname, None));
    }
    rest.strip_prefix(':')
        .map(|port| (hostname, Some(port)))
        .ok_or_else(invalid)
}
