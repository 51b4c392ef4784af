//! In-memory document loader
//!
//! Serves pre-registered pages and records every request it sees, which is
//! enough to drive the navigation core without a network stack.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;

use ferrule_url::Address;

use crate::document::Document;
use crate::error::LoadError;
use crate::host::{DocumentLoader, LoadRequest};

#[derive(Debug, Default)]
pub struct StaticLoader {
    /// Page content keyed by fragment-less href
    pages: RwLock<HashMap<String, String>>,
    requests: Mutex<Vec<LoadRequest>>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the content served for `url`
    pub fn register(&self, url: &str, content: impl Into<String>) -> ferrule_url::Result<()> {
        let key = page_key(&Address::parse(url)?);
        self.pages.write().insert(key, content.into());
        Ok(())
    }

    pub fn unregister(&self, url: &str) -> ferrule_url::Result<bool> {
        let key = page_key(&Address::parse(url)?);
        Ok(self.pages.write().remove(&key).is_some())
    }

    /// Every request seen so far, oldest first
    pub fn requests(&self) -> Vec<LoadRequest> {
        self.requests.lock().clone()
    }

    pub fn take_requests(&self) -> Vec<LoadRequest> {
        std::mem::take(&mut *self.requests.lock())
    }

    pub fn load_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl DocumentLoader for StaticLoader {
    fn load(&self, request: &LoadRequest) -> Result<Document, LoadError> {
        self.requests.lock().push(request.clone());

        let key = page_key(&request.address);
        let content = self
            .pages
            .read()
            .get(&key)
            .cloned()
            .ok_or(LoadError::NotFound(key))?;

        tracing::debug!(url = %request.address, bypass_cache = request.bypass_cache, "Served static page");

        Ok(Document::new(request.address.clone(), content))
    }
}

fn page_key(address: &Address) -> String {
    address.with_new_fragment(None).href().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_loader() {
        let loader = StaticLoader::new();
        loader
            .register("http://example.com/", "<p>home</p>")
            .unwrap();

        let request = LoadRequest::new(Address::parse("http://example.com/#intro").unwrap());
        let doc = loader.load(&request).unwrap();
        assert_eq!(doc.content(), "<p>home</p>");
        assert_eq!(doc.current_address().fragment(), Some("intro"));

        let missing = LoadRequest::new(Address::parse("http://example.com/missing").unwrap());
        assert_eq!(
            loader.load(&missing).unwrap_err(),
            LoadError::NotFound("http://example.com/missing".to_string())
        );

        assert_eq!(loader.load_count(), 2);
        assert_eq!(loader.take_requests().len(), 2);
        assert_eq!(loader.load_count(), 0);

        assert!(loader.unregister("http://example.com/").unwrap());
        assert!(loader.register("not a url", "").is_err());
    }
}
