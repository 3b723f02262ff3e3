//! Interfaces to external collaborators
//!
//! The display and menu system live outside this crate; they learn about
//! state changes through these traits.

pub mod listener;

pub use listener::DeviceListener;
