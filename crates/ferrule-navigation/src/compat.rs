//! Browser compatibility mode
//!
//! Fragment handling differs between emulated browser families: standards
//! mode percent-decodes assigned hashes and re-encodes them for `href`,
//! Internet Explorer mode stores and reports them verbatim.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatMode {
    #[default]
    Standards,
    #[serde(rename = "ie")]
    InternetExplorer,
}

impl CompatMode {
    pub fn is_ie(&self) -> bool {
        matches!(self, CompatMode::InternetExplorer)
    }

    /// Whether assigned fragments are percent-decoded before being cached
    pub fn transcodes_fragments(&self) -> bool {
        !self.is_ie()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompatMode::Standards => "standards",
            CompatMode::InternetExplorer => "ie",
        }
    }
}

impl std::fmt::Display for CompatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CompatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standards" | "standard" => Ok(CompatMode::Standards),
            "ie" | "internetexplorer" | "internet-explorer" => Ok(CompatMode::InternetExplorer),
            _ => Err(format!("Unknown compatibility mode: {}", s)),
        }
    }
}
