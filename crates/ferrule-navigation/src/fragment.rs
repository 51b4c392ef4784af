//! Fragment cache
//!
//! The hash is cached apart from the committed document address so that
//! assigning it never forces a reload. In standards mode assigned values are
//! percent-decoded on the way in and percent-encoded again when rebuilding
//! `href`; in IE mode they pass through untouched.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

use crate::compat::CompatMode;

/// Characters escaped when a cached fragment is written back into an href
const FRAGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'%');

#[derive(Error, Debug, PartialEq, Eq)]
enum DecodeError {
    #[error("malformed percent escape at byte {0}")]
    MalformedEscape(usize),

    #[error("decoded fragment is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentCache {
    mode: CompatMode,
    fragment: Option<String>,
}

impl FragmentCache {
    pub fn new(mode: CompatMode) -> Self {
        Self {
            mode,
            fragment: None,
        }
    }

    /// Build a cache seeded from a document's own fragment, applying the same
    /// decoding rule as [`FragmentCache::set`].
    pub fn seeded(mode: CompatMode, initial: Option<&str>) -> Self {
        let mut cache = Self::new(mode);
        cache.set(initial);
        cache
    }

    pub fn mode(&self) -> CompatMode {
        self.mode
    }

    /// Store a new fragment. One leading `#` is stripped. A value that fails
    /// to decode is stored raw.
    pub fn set(&mut self, raw: Option<&str>) {
        self.fragment = raw.map(|raw| {
            let raw = raw.strip_prefix('#').unwrap_or(raw);
            if !self.mode.transcodes_fragments() {
                return raw.to_string();
            }
            match decode_strict(raw) {
                Ok(decoded) => decoded,
                Err(err) => {
                    tracing::warn!(fragment = %raw, error = %err, "Keeping undecodable fragment as-is");
                    raw.to_string()
                }
            }
        });
    }

    /// The stored fragment without the leading `#`
    pub fn get(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// `#fragment`, or an empty string when nothing non-empty is stored
    pub fn display(&self) -> String {
        match self.non_empty() {
            Some(fragment) => format!("#{}", fragment),
            None => String::new(),
        }
    }

    /// The fragment as it should appear in a reconstructed href
    pub fn for_href(&self) -> Option<String> {
        let fragment = self.non_empty()?;
        if self.mode.transcodes_fragments() {
            Some(utf8_percent_encode(fragment, FRAGMENT_ENCODE_SET).to_string())
        } else {
            Some(fragment.to_string())
        }
    }

    fn non_empty(&self) -> Option<&str> {
        self.fragment.as_deref().filter(|f| !f.is_empty())
    }
}

/// Percent-decode, rejecting `%` not followed by two hex digits
fn decode_strict(raw: &str) -> Result<String, DecodeError> {
    let bytes = raw.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let escape = bytes.get(i + 1..i + 3);
        if !matches!(escape, Some([h, l]) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()) {
            return Err(DecodeError::MalformedEscape(i));
        }
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8)
}
