//! Byte-at-a-time packet assembly
//!
//! The radio has no start byte and no length field. The assembler reads
//! a full header, learns the payload size from the type tag and then
//! collects exactly that many payload bytes.
//!
//! Because there is nothing to resynchronise on, a lost byte would
//! misalign every later packet. A partial packet is therefore dropped
//! once the line has been idle for the configured timeout.

use heapless::Vec;

use crate::packet::{PacketBuf, PacketError, HEADER_SIZE};
use crate::payload::PayloadType;

/// Default idle time after which a partial packet is dropped
pub const DEFAULT_PARTIAL_TIMEOUT_MS: u32 = 250;

/// State machine turning a radio byte stream into raw packets
#[derive(Debug, Clone)]
pub struct PacketAssembler {
    buffer: PacketBuf,
    /// Total packet length once the header is known
    expected_len: Option<usize>,
    /// Idle time since the last byte of a partial packet (ms)
    idle_ms: u32,
    /// 0 disables the timeout
    timeout_ms: u32,
}

impl Default for PacketAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_PARTIAL_TIMEOUT_MS)
    }
}

impl PacketAssembler {
    /// Create an assembler; `timeout_ms == 0` waits forever
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            buffer: Vec::new(),
            expected_len: None,
            idle_ms: 0,
            timeout_ms,
        }
    }

    /// Drop any partial packet
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.expected_len = None;
        self.idle_ms = 0;
    }

    /// True while a packet is partially received
    pub fn is_partial(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(packet))` when a whole packet has arrived,
    /// `Ok(None)` when more bytes are needed, or `Err` if the header
    /// announced an unknown payload type (the header is dropped).
    pub fn feed(&mut self, byte: u8) -> Result<Option<PacketBuf>, PacketError> {
        self.idle_ms = 0;

        // Capacity covers the largest packet and expected_len never exceeds it
        let _ = self.buffer.push(byte);

        if self.expected_len.is_none() && self.buffer.len() == HEADER_SIZE {
            let tag = self.buffer[HEADER_SIZE - 1];
            match PayloadType::from_tag(tag) {
                Some(ty) => self.expected_len = Some(HEADER_SIZE + ty.size()),
                None => {
                    self.reset();
                    return Err(PacketError::UnknownType(tag));
                }
            }
        }

        match self.expected_len {
            Some(len) if self.buffer.len() == len => {
                let packet = core::mem::take(&mut self.buffer);
                self.reset();
                Ok(Some(packet))
            }
            _ => Ok(None),
        }
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete packet found. Bytes after it are not
    /// consumed; the second value is the number of bytes used.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (Result<Option<PacketBuf>, PacketError>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                other => return (other, i + 1),
            }
        }
        (Ok(None), bytes.len())
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    ///
    /// Returns true if a partial packet was dropped.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if self.timeout_ms == 0 || !self.is_partial() {
            return false;
        }

        self.idle_ms = self.idle_ms.saturating_add(delta_ms);
        if self.idle_ms >= self.timeout_ms {
            self.reset();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{Packet, BROADCAST_ID};
    use crate::payload::{Payload, PositionReport};
    use pinpoint_nmea::{Coordinate, UtcTime};

    fn encoded_position() -> PacketBuf {
        Packet::new(
            BROADCAST_ID,
            42069,
            "Alice",
            Payload::Position(PositionReport {
                utc: UtcTime(123519.0),
                coordinate: Coordinate::new(48.1173, 11.5167),
            }),
        )
        .unwrap()
        .encode_to_vec()
        .unwrap()
    }

    #[test]
    fn test_assembles_position() {
        let encoded = encoded_position();
        let mut asm = PacketAssembler::default();

        let (result, used) = asm.feed_bytes(&encoded);
        assert_eq!(result.unwrap().unwrap(), encoded);
        assert_eq!(used, encoded.len());
        assert!(!asm.is_partial());
    }

    #[test]
    fn test_back_to_back_packets() {
        let probe = Packet::new(BROADCAST_ID, 9, "Bob", Payload::ProbeRequest)
            .unwrap()
            .encode_to_vec()
            .unwrap();
        let mut data = std::vec::Vec::from(probe.as_slice());
        data.extend_from_slice(&encoded_position());

        let mut asm = PacketAssembler::default();
        let (first, used) = asm.feed_bytes(&data);
        assert_eq!(first.unwrap().unwrap(), probe);
        assert_eq!(used, HEADER_SIZE);

        let (second, _) = asm.feed_bytes(&data[used..]);
        assert_eq!(second.unwrap().unwrap(), encoded_position());
    }

    #[test]
    fn test_unknown_type_drops_header() {
        let mut encoded = encoded_position();
        encoded[HEADER_SIZE - 1] = 7;

        let mut asm = PacketAssembler::default();
        let (result, used) = asm.feed_bytes(&encoded);
        assert_eq!(result, Err(PacketError::UnknownType(7)));
        assert_eq!(used, HEADER_SIZE);
        assert!(!asm.is_partial());
    }

    #[test]
    fn test_timeout_drops_partial() {
        let encoded = encoded_position();
        let mut asm = PacketAssembler::new(100);

        let _ = asm.feed_bytes(&encoded[..10]);
        assert!(asm.is_partial());
        assert!(!asm.tick(60));
        assert!(asm.tick(60));
        assert!(!asm.is_partial());

        // Fresh packet after the drop assembles normally
        let (result, _) = asm.feed_bytes(&encoded);
        assert_eq!(result.unwrap().unwrap(), encoded);
    }

    #[test]
    fn test_byte_resets_idle_time() {
        let encoded = encoded_position();
        let mut asm = PacketAssembler::new(100);

        let _ = asm.feed_bytes(&encoded[..10]);
        assert!(!asm.tick(90));
        let _ = asm.feed(encoded[10]);
        assert!(!asm.tick(90));
        assert!(asm.is_partial());
    }

    #[test]
    fn test_zero_timeout_waits_forever() {
        let encoded = encoded_position();
        let mut asm = PacketAssembler::new(0);

        let _ = asm.feed_bytes(&encoded[..10]);
        assert!(!asm.tick(u32::MAX));
        assert!(asm.is_partial());
    }

    #[test]
    fn test_idle_tick_without_partial() {
        let mut asm = PacketAssembler::new(10);
        assert!(!asm.tick(1000));
    }
}
