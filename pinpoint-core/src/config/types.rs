//! Configuration type definitions
//!
//! Stored as postcard-serialized binary, or written by hand as TOML.

use pinpoint_protocol::{DeviceName, PacketAssembler, DEFAULT_PARTIAL_TIMEOUT_MS};

use crate::geo::DistanceUnit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current binary config layout
pub const CONFIG_VERSION: u8 = 1;

/// Identity announced in every packet header
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IdentityConfig {
    /// Unique id, never 0 (the broadcast address)
    pub id: u32,
    pub name: DeviceName,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        let mut name = DeviceName::new();
        // Fits: shorter than MAX_NAME_LEN
        let _ = name.push_str("Pinpoint");
        Self { id: 1, name }
    }
}

/// Radio link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadioConfig {
    /// Period of the position broadcast (ms)
    pub broadcast_interval_ms: u32,
    /// Idle time before a partial packet is dropped (ms), 0 = never
    pub partial_frame_timeout_ms: u32,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            broadcast_interval_ms: 5000,
            partial_frame_timeout_ms: DEFAULT_PARTIAL_TIMEOUT_MS,
        }
    }
}

impl RadioConfig {
    /// Assembler for the radio line with the configured timeout
    pub fn packet_assembler(&self) -> PacketAssembler {
        PacketAssembler::new(self.partial_frame_timeout_ms)
    }
}

/// Presentation settings handed to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Fixed offset of the local clock from UTC
    pub utc_offset_hours: i8,
    pub distance_unit: DistanceUnit,
    /// Lines available to the conversation view
    pub window_lines: u8,
    pub chars_per_line: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: -7,
            distance_unit: DistanceUnit::Miles,
            window_lines: 10,
            chars_per_line: 30,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Layout version for binary storage
    pub version: u8,
    pub device: IdentityConfig,
    pub radio: RadioConfig,
    pub display: DisplayConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            device: IdentityConfig::default(),
            radio: RadioConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}
