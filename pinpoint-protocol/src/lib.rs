//! Pinpoint Radio Protocol
//!
//! Packets exchanged between devices over the shared radio channel. Every
//! packet is a fixed header followed by exactly one payload whose size is
//! set by the header's type tag:
//!
//! ```text
//! ┌──────┬────────┬──────────┬──────┬──────────────┐
//! │ DEST │ SOURCE │ NAME     │ TYPE │ PAYLOAD      │
//! │ 4B   │ 4B     │ 20B      │ 1B   │ 0 / 26 / 255B│
//! └──────┴────────┴──────────┴──────┴──────────────┘
//! ```
//!
//! Destination 0 is a broadcast. There is no start byte, no length field
//! and no trailer.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod assembler;
pub mod packet;
pub mod payload;
mod wire;

pub use assembler::{PacketAssembler, DEFAULT_PARTIAL_TIMEOUT_MS};
pub use packet::{
    device_name, DeviceName, Header, Packet, PacketBuf, PacketError, BROADCAST_ID, HEADER_SIZE,
    MAX_NAME_LEN, MAX_PACKET_SIZE,
};
pub use payload::{
    MessageText, Payload, PayloadType, PositionReport, MAX_PAYLOAD_SIZE, MAX_TEXT_LEN,
    POSITION_SIZE,
};
