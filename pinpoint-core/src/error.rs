//! Device error type

use pinpoint_nmea::{ChecksumError, NmeaError};
use pinpoint_protocol::PacketError;

/// Errors returned by [`Device`](crate::device::Device) operations
///
/// All of these are recoverable: the frame or request that caused them
/// is dropped and committed state is left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// GPS sentence failed the checksum check
    ChecksumError(ChecksumError),
    /// GPS sentence field failed to parse (1-based index after the tag)
    FieldParseError { field: u8 },
    /// GPS sentence kind is not handled
    UnknownSentence,
    /// Radio packet announced an unknown payload type
    UnknownPacketType(u8),
    /// Radio frame ended before the packet did
    TruncatedFrame { needed: usize },
    /// No peer with this id
    PeerNotFound(u32),
    /// Other packet encoding or decoding failure
    Packet(PacketError),
    /// Draft is at its maximum length
    DraftFull,
    /// Nothing to send
    EmptyDraft,
    /// No position fix yet
    NoFix,
}

impl From<NmeaError> for DeviceError {
    fn from(e: NmeaError) -> Self {
        match e {
            NmeaError::Checksum(c) => DeviceError::ChecksumError(c),
            NmeaError::UnknownSentence => DeviceError::UnknownSentence,
            NmeaError::FieldParse { field } => DeviceError::FieldParseError { field },
            // A non-ASCII byte cannot be attributed to a field
            NmeaError::NotAscii => DeviceError::FieldParseError { field: 0 },
        }
    }
}

impl From<PacketError> for DeviceError {
    fn from(e: PacketError) -> Self {
        match e {
            PacketError::UnknownType(tag) => DeviceError::UnknownPacketType(tag),
            PacketError::Incomplete { needed } => DeviceError::TruncatedFrame { needed },
            other => DeviceError::Packet(other),
        }
    }
}
