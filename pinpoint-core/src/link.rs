//! Frame hand-off between byte readers and the consumer loop
//!
//! Each serial line has a producer that owns its assembler and pushes
//! complete frames into a bounded channel. The channel is the only state
//! shared with the consumer; parsing happens on the consumer side once
//! the frame has been copied out.
//!
//! ```text
//! GPS UART   -> pump_gps   -> [gps channel]   \
//!                                              > Device::poll
//! radio UART -> pump_radio -> [radio channel] /
//! ```
//!
//! A full channel drops the new frame and logs it.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embedded_io_async::Read;

use pinpoint_nmea::{SentenceAssembler, SentenceBuf};
use pinpoint_protocol::{PacketAssembler, PacketBuf};

/// Channel capacity for GPS sentences
pub const GPS_QUEUE_DEPTH: usize = 8;

/// Channel capacity for radio packets
pub const RADIO_QUEUE_DEPTH: usize = 4;

/// Buffer size for one serial read
const READ_CHUNK: usize = 64;

/// Bounded channels carrying complete frames to the consumer
pub struct FrameQueues<M: RawMutex> {
    pub gps: Channel<M, SentenceBuf, GPS_QUEUE_DEPTH>,
    pub radio: Channel<M, PacketBuf, RADIO_QUEUE_DEPTH>,
}

impl<M: RawMutex> FrameQueues<M> {
    pub const fn new() -> Self {
        Self {
            gps: Channel::new(),
            radio: Channel::new(),
        }
    }
}

impl<M: RawMutex> Default for FrameQueues<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read once from the GPS line and queue every completed sentence
///
/// Returns the number of bytes read; 0 means the reader is exhausted.
pub async fn pump_gps<R: Read, M: RawMutex>(
    reader: &mut R,
    assembler: &mut SentenceAssembler,
    queues: &FrameQueues<M>,
) -> Result<usize, R::Error> {
    let mut buf = [0u8; READ_CHUNK];
    let n = reader.read(&mut buf).await?;
    trace!("GPS RX: {} bytes", n);

    for &byte in &buf[..n] {
        match assembler.feed(byte) {
            Ok(Some(sentence)) => {
                if queues.gps.try_send(sentence).is_err() {
                    warn!("GPS queue full, dropping sentence");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("GPS sentence dropped: {:?}", e),
        }
    }

    Ok(n)
}

/// Read once from the radio line and queue every completed packet
///
/// Returns the number of bytes read; 0 means the reader is exhausted.
/// The caller drives [`PacketAssembler::tick`] between reads so that a
/// stalled partial packet is eventually dropped.
pub async fn pump_radio<R: Read, M: RawMutex>(
    reader: &mut R,
    assembler: &mut PacketAssembler,
    queues: &FrameQueues<M>,
) -> Result<usize, R::Error> {
    let mut buf = [0u8; READ_CHUNK];
    let n = reader.read(&mut buf).await?;
    trace!("Radio RX: {} bytes", n);

    for &byte in &buf[..n] {
        match assembler.feed(byte) {
            Ok(Some(packet)) => {
                if queues.radio.try_send(packet).is_err() {
                    warn!("Radio queue full, dropping packet");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Radio packet dropped: {:?}", e),
        }
    }

    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use pinpoint_protocol::{Packet, Payload, BROADCAST_ID};

    const RMC: &[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

    /// Drain a reader completely
    fn pump_all_gps(data: &[u8], queues: &FrameQueues<NoopRawMutex>) {
        let mut reader = data;
        let mut asm = SentenceAssembler::new();
        while block_on(pump_gps(&mut reader, &mut asm, queues)).unwrap() > 0 {}
    }

    #[test]
    fn test_gps_sentence_queued() {
        let queues = FrameQueues::<NoopRawMutex>::new();
        pump_all_gps(RMC, &queues);

        let sentence = queues.gps.try_receive().unwrap();
        assert_eq!(sentence.as_slice(), &RMC[..RMC.len() - 2]);
        assert!(queues.gps.try_receive().is_err());
    }

    #[test]
    fn test_sentence_split_across_reads() {
        let queues = FrameQueues::<NoopRawMutex>::new();
        let mut asm = SentenceAssembler::new();

        let (head, tail) = RMC.split_at(30);
        let mut first = head;
        let mut second = tail;
        block_on(pump_gps(&mut first, &mut asm, &queues)).unwrap();
        assert!(queues.gps.try_receive().is_err());
        block_on(pump_gps(&mut second, &mut asm, &queues)).unwrap();
        assert!(queues.gps.try_receive().is_ok());
    }

    #[test]
    fn test_full_queue_drops_newest() {
        let queues = FrameQueues::<NoopRawMutex>::new();
        let data: std::vec::Vec<u8> = RMC.repeat(GPS_QUEUE_DEPTH + 2);
        pump_all_gps(&data, &queues);

        let mut received = 0;
        while queues.gps.try_receive().is_ok() {
            received += 1;
        }
        assert_eq!(received, GPS_QUEUE_DEPTH);
    }

    #[test]
    fn test_radio_packet_queued() {
        let queues = FrameQueues::<NoopRawMutex>::new();
        let encoded = Packet::new(BROADCAST_ID, 5, "Eve", Payload::ProbeRequest)
            .unwrap()
            .encode_to_vec()
            .unwrap();

        let mut reader: &[u8] = &encoded;
        let mut asm = PacketAssembler::default();
        while block_on(pump_radio(&mut reader, &mut asm, &queues)).unwrap() > 0 {}

        assert_eq!(queues.radio.try_receive().unwrap(), encoded);
    }
}
