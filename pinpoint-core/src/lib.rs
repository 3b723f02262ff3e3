//! Board-agnostic device logic for Pinpoint
//!
//! Everything between the serial lines and the screen that does not
//! depend on a particular board:
//!
//! - Own GPS state built from parsed sentences
//! - Peer registry, conversations and drafts
//! - Distance and map scaling
//! - Frame hand-off from UART readers to the main loop
//! - Position broadcast schedule
//! - Configuration types, TOML subset parser and binary persistence
//!
//! [`Device`] owns all mutable state; the UI hears about changes through
//! [`DeviceListener`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod broadcast;
pub mod config;
pub mod device;
pub mod error;
pub mod fix;
pub mod geo;
pub mod link;
pub mod peers;
pub mod traits;

pub use broadcast::BroadcastSchedule;
pub use config::DeviceConfig;
pub use device::{Device, IgnoreReason, RadioEvent};
pub use error::DeviceError;
pub use fix::SelfState;
pub use geo::{DistanceUnit, MapScale};
pub use link::{pump_gps, pump_radio, FrameQueues};
pub use traits::DeviceListener;
