//! Configuration persistence
//!
//! The board keeps two optional blobs: a hand-written TOML file and a
//! postcard binary written by the device itself. TOML wins when both
//! exist; with neither the defaults are used.

use super::toml::{parse_config, ParseError};
use super::types::{DeviceConfig, CONFIG_VERSION};

/// Maximum serialized config size (binary)
pub const MAX_CONFIG_SIZE: usize = 128;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// TOML parsing failed
    TomlParse(ParseError),
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// Config version mismatch
    VersionMismatch { found: u8 },
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::TomlParse(e)
    }
}

/// Serialize into `buffer`; returns the used part
pub fn to_bytes<'a>(
    config: &DeviceConfig,
    buffer: &'a mut [u8],
) -> Result<&'a mut [u8], ConfigError> {
    postcard::to_slice(config, buffer).map_err(|_| ConfigError::Serialize)
}

/// Deserialize a binary config, checking its version
pub fn from_bytes(bytes: &[u8]) -> Result<DeviceConfig, ConfigError> {
    let config: DeviceConfig =
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

    if config.version != CONFIG_VERSION {
        warn!(
            "Config version mismatch: found {}, expected {}",
            config.version,
            CONFIG_VERSION
        );
        return Err(ConfigError::VersionMismatch {
            found: config.version,
        });
    }

    Ok(config)
}

/// Parse a TOML config from raw storage bytes
pub fn from_toml_bytes(bytes: &[u8]) -> Result<DeviceConfig, ConfigError> {
    let text = core::str::from_utf8(bytes).map_err(|_| ConfigError::InvalidUtf8)?;
    Ok(parse_config(text)?)
}

/// Load configuration
///
/// Tries TOML first, falls back to binary, then to defaults. A blob that
/// is present but broken is logged and skipped.
pub fn load(toml: Option<&[u8]>, binary: Option<&[u8]>) -> DeviceConfig {
    if let Some(bytes) = toml {
        match from_toml_bytes(bytes) {
            Ok(config) => {
                info!("Loaded configuration from TOML");
                return config;
            }
            Err(e) => warn!("Failed to load TOML config: {:?}, trying binary", e),
        }
    }

    if let Some(bytes) = binary {
        match from_bytes(bytes) {
            Ok(config) => {
                info!("Loaded binary configuration");
                return config;
            }
            Err(e) => warn!("Failed to load binary config: {:?}", e),
        }
    }

    debug!("Using default configuration");
    DeviceConfig::default()
}
