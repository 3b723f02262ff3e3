//! Device configuration
//!
//! Identity, radio timing and display preferences. Written by hand as a
//! small TOML file or stored by the device as postcard binary data.

#[cfg(feature = "serde")]
pub mod persist;
pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
