//! Address error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid host: {0:?}")]
    InvalidHost(String),

    #[error("Invalid port: {0:?}")]
    InvalidPort(String),

    #[error("Unsupported scheme: {0:?}")]
    UnsupportedScheme(String),

    #[error("Address has no authority to modify: {0}")]
    CannotBeABase(String),
}
