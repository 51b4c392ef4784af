//! Ferrule URL Model
//!
//! Immutable, always-absolute document addresses. Every mutation is a
//! reconstruction: `with_*` functions take a base address and return a new
//! one with exactly one component replaced.

mod address;
mod error;

pub use address::{parse_port, Address};
pub use error::AddressError;

pub type Result<T> = std::result::Result<T, AddressError>;
