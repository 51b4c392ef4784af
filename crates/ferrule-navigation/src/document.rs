//! Loaded documents

use ferrule_url::Address;

/// A document loaded into a window, identified by the address it was
/// fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    address: Address,
    content: String,
}

impl Document {
    pub fn new(address: Address, content: impl Into<String>) -> Self {
        Self {
            address,
            content: content.into(),
        }
    }

    pub fn current_address(&self) -> &Address {
        &self.address
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Resolve a relative or absolute target against this document
    pub fn resolve(&self, target: &str) -> ferrule_url::Result<Address> {
        self.address.join(target)
    }
}
