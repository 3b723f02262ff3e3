//! Payload types carried after the packet header
//!
//! The header's type tag fixes the payload size; there is no length
//! field on the wire.
//!
//! ```text
//! tag 0  Position      utc f64 | lat f64 | N/S u8 | lon f64 | E/W u8   26 B
//! tag 1  Message       text, NUL padded                                255 B
//! tag 2  ProbeRequest  (empty)                                          0 B
//! ```

use heapless::String;
use pinpoint_nmea::{Coordinate, Hemisphere, UtcTime};

use crate::packet::PacketError;
use crate::wire::{WireReader, WireWriter};

/// Encoded size of a position payload
pub const POSITION_SIZE: usize = 8 + 8 + 1 + 8 + 1;

/// Maximum message text length in bytes (also its encoded size)
pub const MAX_TEXT_LEN: usize = 255;

/// Largest payload of any type
pub const MAX_PAYLOAD_SIZE: usize = MAX_TEXT_LEN;

/// Message text, at most [`MAX_TEXT_LEN`] bytes of UTF-8
pub type MessageText = String<MAX_TEXT_LEN>;

/// Payload type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadType {
    Position,
    Message,
    ProbeRequest,
}

impl PayloadType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PayloadType::Position),
            1 => Some(PayloadType::Message),
            2 => Some(PayloadType::ProbeRequest),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            PayloadType::Position => 0,
            PayloadType::Message => 1,
            PayloadType::ProbeRequest => 2,
        }
    }

    /// Encoded payload size for this type
    pub fn size(self) -> usize {
        match self {
            PayloadType::Position => POSITION_SIZE,
            PayloadType::Message => MAX_TEXT_LEN,
            PayloadType::ProbeRequest => 0,
        }
    }
}

/// Position report sent by the periodic broadcaster
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionReport {
    pub utc: UtcTime,
    /// `None` when the sender has no fix (hemisphere bytes are 0)
    pub coordinate: Option<Coordinate>,
}

/// Packet payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Payload {
    Position(PositionReport),
    Message(MessageText),
    /// Ask peers to broadcast their position now
    ProbeRequest,
}

impl Payload {
    /// Build a message payload, rejecting text over [`MAX_TEXT_LEN`]
    pub fn message(text: &str) -> Result<Self, PacketError> {
        let mut s = MessageText::new();
        s.push_str(text).map_err(|_| PacketError::TextTooLong)?;
        Ok(Payload::Message(s))
    }

    pub fn payload_type(&self) -> PayloadType {
        match self {
            Payload::Position(_) => PayloadType::Position,
            Payload::Message(_) => PayloadType::Message,
            Payload::ProbeRequest => PayloadType::ProbeRequest,
        }
    }

    pub(crate) fn write(&self, w: &mut WireWriter<'_>) -> Result<(), PacketError> {
        match self {
            Payload::Position(report) => {
                w.put_f64(report.utc.raw())?;
                match report.coordinate {
                    Some(c) => {
                        w.put_f64(c.latitude_magnitude())?;
                        w.put_u8(c.latitude_hemisphere().to_byte())?;
                        w.put_f64(c.longitude_magnitude())?;
                        w.put_u8(c.longitude_hemisphere().to_byte())?;
                    }
                    None => {
                        w.put_f64(0.0)?;
                        w.put_u8(0)?;
                        w.put_f64(0.0)?;
                        w.put_u8(0)?;
                    }
                }
            }
            Payload::Message(text) => w.put_padded(text.as_bytes(), MAX_TEXT_LEN)?,
            Payload::ProbeRequest => {}
        }
        Ok(())
    }

    /// Decode a raw payload of the given type
    ///
    /// `bytes` must be exactly `ty.size()` long.
    pub fn decode(ty: PayloadType, bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() != ty.size() {
            return Err(PacketError::PayloadMismatch);
        }
        let mut r = WireReader::new(bytes);
        Self::read(ty, &mut r)
    }

    fn read(ty: PayloadType, r: &mut WireReader<'_>) -> Result<Self, PacketError> {
        match ty {
            PayloadType::Position => {
                let utc = UtcTime(r.f64()?);
                let latitude = r.f64()?;
                let lat_byte = r.u8()?;
                let longitude = r.f64()?;
                let lon_byte = r.u8()?;

                // Both bytes 0 means no fix; a single 0 is a bad hemisphere
                let coordinate = if lat_byte == 0 && lon_byte == 0 {
                    None
                } else {
                    let hemispheres =
                        Hemisphere::from_byte(lat_byte).zip(Hemisphere::from_byte(lon_byte));
                    let (lat_h, lon_h) = hemispheres.ok_or(PacketError::InvalidPosition)?;
                    let c = Coordinate::from_magnitudes(latitude, lat_h, longitude, lon_h)
                        .ok_or(PacketError::InvalidPosition)?;
                    Some(c)
                };

                Ok(Payload::Position(PositionReport { utc, coordinate }))
            }
            PayloadType::Message => {
                let text = r.padded_str::<MAX_TEXT_LEN>(MAX_TEXT_LEN)?;
                Ok(Payload::Message(text))
            }
            PayloadType::ProbeRequest => Ok(Payload::ProbeRequest),
        }
    }
}
