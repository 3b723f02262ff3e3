//! Packet encoding and decoding
//!
//! Packet format (little-endian, packed):
//! - DESTINATION (4 bytes): receiver id, 0 for broadcast
//! - SOURCE (4 bytes): sender id
//! - NAME (20 bytes): sender name, UTF-8, NUL padded
//! - TYPE (1 byte): payload type tag
//! - PAYLOAD (0-255 bytes): size fixed by TYPE

use heapless::{String, Vec};

use crate::payload::{Payload, PayloadType, MAX_PAYLOAD_SIZE};
use crate::wire::{WireReader, WireWriter};

/// Destination id addressing every listening device
pub const BROADCAST_ID: u32 = 0;

/// Maximum sender name length in bytes
pub const MAX_NAME_LEN: usize = 20;

/// Encoded header size
pub const HEADER_SIZE: usize = 4 + 4 + MAX_NAME_LEN + 1;

/// Largest encoded packet
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE;

/// Sender name, at most [`MAX_NAME_LEN`] bytes of UTF-8
pub type DeviceName = String<MAX_NAME_LEN>;

/// One encoded packet
pub type PacketBuf = Vec<u8, MAX_PACKET_SIZE>;

/// Errors that can occur during packet encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// More bytes are needed to finish the packet
    Incomplete { needed: usize },
    /// Type tag is not a known payload type
    UnknownType(u8),
    /// Header tag and payload disagree, or payload has the wrong size
    PayloadMismatch,
    /// Name or message text is not valid UTF-8
    InvalidText,
    /// Position payload carries bad hemisphere bytes or out-of-range values
    InvalidPosition,
    /// Sender name exceeds [`MAX_NAME_LEN`]
    NameTooLong,
    /// Message text exceeds the message payload size
    TextTooLong,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Build a device name, rejecting names over [`MAX_NAME_LEN`] bytes
pub fn device_name(name: &str) -> Result<DeviceName, PacketError> {
    let mut s = DeviceName::new();
    s.push_str(name).map_err(|_| PacketError::NameTooLong)?;
    Ok(s)
}

/// Packet header
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header {
    pub destination: u32,
    pub source: u32,
    pub name: DeviceName,
    pub payload_type: PayloadType,
}

impl Header {
    /// True if a device with `id` should accept this packet
    pub fn is_addressed_to(&self, id: u32) -> bool {
        self.destination == BROADCAST_ID || self.destination == id
    }

    pub fn is_broadcast(&self) -> bool {
        self.destination == BROADCAST_ID
    }

    fn write(&self, w: &mut WireWriter<'_>) -> Result<(), PacketError> {
        w.put_u32(self.destination)?;
        w.put_u32(self.source)?;
        w.put_padded(self.name.as_bytes(), MAX_NAME_LEN)?;
        w.put_u8(self.payload_type.tag())
    }

    /// Decode a header from the start of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < HEADER_SIZE {
            return Err(PacketError::Incomplete {
                needed: HEADER_SIZE - bytes.len(),
            });
        }

        let mut r = WireReader::new(bytes);
        let destination = r.u32()?;
        let source = r.u32()?;
        let name = r.padded_str::<MAX_NAME_LEN>(MAX_NAME_LEN)?;
        let tag = r.u8()?;
        let payload_type = PayloadType::from_tag(tag).ok_or(PacketError::UnknownType(tag))?;

        Ok(Self {
            destination,
            source,
            name,
            payload_type,
        })
    }

    /// Encoded size of the whole packet this header announces
    pub fn packet_len(&self) -> usize {
        HEADER_SIZE + self.payload_type.size()
    }
}

/// A header plus exactly one payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    pub header: Header,
    pub payload: Payload,
}

impl Packet {
    /// Create a packet; the header tag is taken from the payload
    pub fn new(
        destination: u32,
        source: u32,
        name: &str,
        payload: Payload,
    ) -> Result<Self, PacketError> {
        Ok(Self {
            header: Header {
                destination,
                source,
                name: device_name(name)?,
                payload_type: payload.payload_type(),
            },
            payload,
        })
    }

    /// Encoded size of this packet
    pub fn encoded_len(&self) -> usize {
        self.header.packet_len()
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        if self.header.payload_type != self.payload.payload_type() {
            return Err(PacketError::PayloadMismatch);
        }
        if buffer.len() < self.encoded_len() {
            return Err(PacketError::BufferTooSmall);
        }

        let mut w = WireWriter::new(buffer);
        self.header.write(&mut w)?;
        self.payload.write(&mut w)?;
        Ok(w.written())
    }

    /// Encode this packet into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<PacketBuf, PacketError> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| PacketError::BufferTooSmall)?;
        Ok(vec)
    }

    /// Decode one packet from the start of `bytes`
    ///
    /// Returns the packet and the number of bytes it occupied. Never
    /// yields a partial payload: a short buffer is `Incomplete`.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), PacketError> {
        let header = Header::decode(bytes)?;

        let total = header.packet_len();
        if bytes.len() < total {
            return Err(PacketError::Incomplete {
                needed: total - bytes.len(),
            });
        }

        let payload = Payload::decode(header.payload_type, &bytes[HEADER_SIZE..total])?;
        Ok((Self { header, payload }, total))
    }
}
