//! Document address value type
//!
//! An [`Address`] is always absolute. Component mutators never touch the
//! receiver; they reconstruct a new address and leave every other component
//! exactly as it was.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::AddressError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address {
    url: Url,
}

impl Address {
    /// Parse an absolute address. Relative input is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        Url::parse(input)
            .map(|url| Self { url })
            .map_err(|source| AddressError::Parse {
                input: input.to_string(),
                source,
            })
    }

    /// Resolve `target` against this address. Absolute targets replace it
    /// entirely.
    pub fn join(&self, target: &str) -> Result<Self> {
        self.url
            .join(target)
            .map(|url| Self { url })
            .map_err(|source| AddressError::Parse {
                input: target.to_string(),
                source,
            })
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Host name, or an empty string for addresses without an authority
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    /// Explicit port. Ports equal to the scheme's default are not reported.
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// `host` or `host:port` when a port is present
    pub fn host_and_port(&self) -> String {
        match self.port() {
            Some(port) => format!("{}:{}", self.host(), port),
            None => self.host().to_string(),
        }
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    /// Full serialized form
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn with_host(&self, host: &str) -> Result<Self> {
        let mut url = self.authority_url()?;
        url.set_host(Some(host))
            .map_err(|_| AddressError::InvalidHost(host.to_string()))?;
        Ok(Self { url })
    }

    pub fn with_port(&self, port: Option<u16>) -> Result<Self> {
        let mut url = self.authority_url()?;
        url.set_port(port).map_err(|()| {
            AddressError::InvalidPort(port.map(|p| p.to_string()).unwrap_or_default())
        })?;
        Ok(Self { url })
    }

    pub fn with_path(&self, path: &str) -> Self {
        let mut url = self.url.clone();
        url.set_path(path);
        Self { url }
    }

    pub fn with_query(&self, query: Option<&str>) -> Self {
        let mut url = self.url.clone();
        url.set_query(query);
        Self { url }
    }

    /// Replace the scheme. A single trailing `:` is accepted, as in
    /// `location.protocol = "https:"`.
    pub fn with_protocol(&self, protocol: &str) -> Result<Self> {
        let scheme = protocol.strip_suffix(':').unwrap_or(protocol);
        if scheme.is_empty() {
            return Err(AddressError::UnsupportedScheme(protocol.to_string()));
        }

        let mut url = self.url.clone();
        url.set_scheme(scheme)
            .map_err(|()| AddressError::UnsupportedScheme(protocol.to_string()))?;
        Ok(Self { url })
    }

    pub fn with_new_fragment(&self, fragment: Option<&str>) -> Self {
        let mut url = self.url.clone();
        url.set_fragment(fragment);
        Self { url }
    }

    fn authority_url(&self) -> Result<Url> {
        if self.url.cannot_be_a_base() {
            return Err(AddressError::CannotBeABase(self.url.to_string()));
        }
        Ok(self.url.clone())
    }
}

/// Strict decimal port parse: digits only, no sign, no surrounding space.
pub fn parse_port(input: &str) -> Result<u16> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::InvalidPort(input.to_string()));
    }
    input
        .parse()
        .map_err(|_| AddressError::InvalidPort(input.to_string()))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Url> for Address {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.com:8080/a/b?x=1#frag";

    fn base() -> Address {
        Address::parse(BASE).unwrap()
    }

    #[test]
    fn test_components() {
        let a = base();
        assert_eq!(a.scheme(), "http");
        assert_eq!(a.host(), "example.com");
        assert_eq!(a.port(), Some(8080));
        assert_eq!(a.host_and_port(), "example.com:8080");
        assert_eq!(a.path(), "/a/b");
        assert_eq!(a.query(), Some("x=1"));
        assert_eq!(a.fragment(), Some("frag"));
        assert_eq!(a.href(), BASE);
    }

    #[test]
    fn test_relative_rejected() {
        let err = Address::parse("/relative/path").unwrap_err();
        assert!(matches!(
            err,
            AddressError::Parse {
                source: url::ParseError::RelativeUrlWithoutBase,
                ..
            }
        ));
    }

    #[test]
    fn test_join() {
        let a = Address::parse("http://example.com/a/b").unwrap();
        assert_eq!(a.join("c").unwrap().href(), "http://example.com/a/c");
        assert_eq!(
            a.join("//cdn.example.com/x").unwrap().href(),
            "http://cdn.example.com/x"
        );
        assert_eq!(a.join("https://other.org/").unwrap().href(), "https://other.org/");
    }

    #[test]
    fn test_with_path_changes_only_path() {
        let a = base();
        for path in ["/c/d", "/", "/x%20y", "/deep/er/path.html"] {
            let b = a.with_path(path);
            assert_eq!(b.path(), path);
            assert_eq!(b.scheme(), a.scheme());
            assert_eq!(b.host(), a.host());
            assert_eq!(b.port(), a.port());
            assert_eq!(b.query(), a.query());
            assert_eq!(b.fragment(), a.fragment());
        }
        // Base is untouched
        assert_eq!(a.href(), BASE);
    }

    #[test]
    fn test_with_host() {
        let b = base().with_host("other.org").unwrap();
        assert_eq!(b.href(), "http://other.org:8080/a/b?x=1#frag");

        assert!(matches!(
            base().with_host(""),
            Err(AddressError::InvalidHost(_))
        ));
        assert!(base().with_host("bad:host").is_err());
    }

    #[test]
    fn test_with_host_on_opaque_address() {
        let blank = Address::parse("about:blank").unwrap();
        assert!(matches!(
            blank.with_host("example.com"),
            Err(AddressError::CannotBeABase(_))
        ));
    }

    #[test]
    fn test_with_port() {
        let b = base().with_port(Some(9090)).unwrap();
        assert_eq!(b.href(), "http://example.com:9090/a/b?x=1#frag");

        let cleared = base().with_port(None).unwrap();
        assert_eq!(cleared.href(), "http://example.com/a/b?x=1#frag");

        // Default port is elided
        let default = base().with_port(Some(80)).unwrap();
        assert_eq!(default.port(), None);

        let file = Address::parse("file:///tmp/page.html").unwrap();
        assert!(matches!(
            file.with_port(Some(81)),
            Err(AddressError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_with_query() {
        assert_eq!(
            base().with_query(Some("y=2")).href(),
            "http://example.com:8080/a/b?y=2#frag"
        );
        assert_eq!(
            base().with_query(None).href(),
            "http://example.com:8080/a/b#frag"
        );
    }

    #[test]
    fn test_with_protocol() {
        let b = base().with_protocol("https:").unwrap();
        assert_eq!(b.href(), "https://example.com:8080/a/b?x=1#frag");
        let c = base().with_protocol("https").unwrap();
        assert_eq!(b, c);

        assert!(matches!(
            base().with_protocol("foo"),
            Err(AddressError::UnsupportedScheme(_))
        ));
        assert!(base().with_protocol("ht tp").is_err());
        assert!(base().with_protocol(":").is_err());
    }

    #[test]
    fn test_with_new_fragment() {
        assert_eq!(
            base().with_new_fragment(Some("top")).href(),
            "http://example.com:8080/a/b?x=1#top"
        );
        assert_eq!(
            base().with_new_fragment(None).href(),
            "http://example.com:8080/a/b?x=1"
        );
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert_eq!(parse_port("0").unwrap(), 0);
        for bad in ["", "80a", "+80", " 80", "70000", "-1"] {
            assert!(parse_port(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&base()).unwrap();
        assert_eq!(json, format!("\"{BASE}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, base());
    }
}
