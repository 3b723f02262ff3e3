//! Device context
//!
//! Owns everything the consumer loop mutates: own fix, the peer registry
//! with its conversations, and the broadcast schedule. Frames come in
//! through `feed_*` (or [`Device::poll`]); outgoing packets are returned
//! to the caller, which owns the radio.

use alloc::vec::Vec;

use embassy_sync::blocking_mutex::raw::RawMutex;
use pinpoint_nmea::{LocalTime, SentenceKind};
use pinpoint_protocol::{Header, Packet, Payload, BROADCAST_ID, HEADER_SIZE};

use crate::broadcast::BroadcastSchedule;
use crate::config::{DeviceConfig, DisplayConfig};
use crate::error::DeviceError;
use crate::fix::SelfState;
use crate::geo::{displacement, Displacement, MapScale};
use crate::link::FrameQueues;
use crate::peers::{Direction, DraftEdit, Message, PeerRegistry, PeerUpdate};
use crate::traits::DeviceListener;

/// Why a well-formed packet was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// Addressed to another device
    NotForUs,
    /// Our own transmission heard back
    OwnPacket,
}

/// What a radio frame did to device state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioEvent {
    Ignored(IgnoreReason),
    /// Peer identity and position replaced
    PeerUpdated(u32),
    /// Message appended to the peer's conversation
    MessageReceived(u32),
    /// Peer asked for our position; a broadcast is now pending
    ProbeReceived(u32),
}

/// The device context
pub struct Device<L: DeviceListener> {
    me: SelfState,
    peers: PeerRegistry,
    schedule: BroadcastSchedule,
    display: DisplayConfig,
    listener: L,
}

impl<L: DeviceListener> Device<L> {
    pub fn new(config: &DeviceConfig, listener: L) -> Self {
        info!("Device {} starting", config.device.id);
        Self {
            me: SelfState::new(config.device.id, config.device.name.clone()),
            peers: PeerRegistry::new(config.device.id),
            schedule: BroadcastSchedule::new(config.radio.broadcast_interval_ms),
            display: config.display,
            listener,
        }
    }

    pub fn me(&self) -> &SelfState {
        &self.me
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Parse one complete GPS sentence and commit it to own state
    ///
    /// On error nothing is committed and the listener is not called.
    pub fn feed_gps_frame(&mut self, frame: &[u8]) -> Result<SentenceKind, DeviceError> {
        let sentence = pinpoint_nmea::parse(frame)?;
        let kind = self.me.commit(sentence);
        trace!("Committed {:?}", kind);
        self.listener.on_fix_updated(kind);
        Ok(kind)
    }

    /// Decode one radio packet and apply it
    ///
    /// Bytes after the first packet are ignored. The destination is
    /// checked once the whole packet is present but before its payload is
    /// decoded, so a packet for another device never touches the registry
    /// and never fails on its payload.
    pub fn feed_radio_frame(&mut self, frame: &[u8]) -> Result<RadioEvent, DeviceError> {
        let header = Header::decode(frame)?;
        let total = header.packet_len();
        if frame.len() < total {
            return Err(DeviceError::TruncatedFrame {
                needed: total - frame.len(),
            });
        }
        if frame.len() > total {
            trace!("Ignoring {} bytes after packet", frame.len() - total);
        }

        if !header.is_addressed_to(self.me.id) {
            trace!("Packet for {} ignored", header.destination);
            return Ok(RadioEvent::Ignored(IgnoreReason::NotForUs));
        }
        if header.source == self.me.id {
            return Ok(RadioEvent::Ignored(IgnoreReason::OwnPacket));
        }

        let payload = Payload::decode(header.payload_type, &frame[HEADER_SIZE..total])?;
        let id = header.source;
        match payload {
            Payload::Position(report) => {
                self.peers
                    .upsert(&PeerUpdate::position(id, header.name, report));
                self.listener.on_peer_updated(id);
                Ok(RadioEvent::PeerUpdated(id))
            }
            Payload::Message(text) => {
                self.peers.upsert(&PeerUpdate::identity(id, header.name));
                self.peers.append_message(id, text, Direction::Received)?;
                debug!("Message from {}", id);
                self.listener.on_peer_updated(id);
                self.listener.on_message_received(id);
                Ok(RadioEvent::MessageReceived(id))
            }
            Payload::ProbeRequest => {
                self.peers.upsert(&PeerUpdate::identity(id, header.name));
                self.schedule.request_now();
                debug!("Probe from {}", id);
                self.listener.on_peer_updated(id);
                Ok(RadioEvent::ProbeReceived(id))
            }
        }
    }

    /// Drain both frame queues; returns the number of frames handled
    ///
    /// Rejected frames are logged and counted.
    pub fn poll<M: RawMutex>(&mut self, queues: &FrameQueues<M>) -> usize {
        let mut handled = 0;

        while let Ok(frame) = queues.gps.try_receive() {
            if let Err(e) = self.feed_gps_frame(&frame) {
                warn!("GPS frame rejected: {:?}", e);
            }
            handled += 1;
        }

        while let Ok(frame) = queues.radio.try_receive() {
            if let Err(e) = self.feed_radio_frame(&frame) {
                warn!("Radio frame rejected: {:?}", e);
            }
            handled += 1;
        }

        handled
    }

    /// Edit the draft held for a peer
    pub fn draft_message_update(
        &mut self,
        peer_id: u32,
        edit: DraftEdit<'_>,
    ) -> Result<(), DeviceError> {
        self.peers
            .find_mut(peer_id)
            .ok_or(DeviceError::PeerNotFound(peer_id))?
            .draft
            .apply(edit)
    }

    /// Move a peer's draft into its conversation and build the packet
    pub fn send_draft(&mut self, peer_id: u32) -> Result<Packet, DeviceError> {
        let peer = self
            .peers
            .find_mut(peer_id)
            .ok_or(DeviceError::PeerNotFound(peer_id))?;
        if peer.draft.is_empty() {
            return Err(DeviceError::EmptyDraft);
        }

        let text = peer.draft.take();
        peer.conversation.append(text.clone(), Direction::Sent);
        Ok(self.packet(peer_id, Payload::Message(text)))
    }

    /// Broadcast of own time and position; reports "no fix" when there is none
    pub fn position_packet(&self) -> Packet {
        self.packet(BROADCAST_ID, Payload::Position(self.me.position_report()))
    }

    /// Broadcast asking every peer for its position
    pub fn probe_packet(&self) -> Packet {
        self.packet(BROADCAST_ID, Payload::ProbeRequest)
    }

    /// Advance the broadcast schedule; returns the packet to send when due
    pub fn tick(&mut self, delta_ms: u32) -> Option<Packet> {
        if !self.schedule.tick(delta_ms) {
            return None;
        }
        trace!("Position broadcast due");
        Some(self.position_packet())
    }

    /// Own UTC on the configured local clock
    pub fn local_time(&self) -> Option<LocalTime> {
        self.me
            .utc()
            .map(|utc| utc.to_local(self.display.utc_offset_hours))
    }

    /// Tail of a peer's conversation that fits the configured window
    pub fn conversation_window(&self, peer_id: u32) -> Result<&[Message], DeviceError> {
        let peer = self
            .peers
            .find(peer_id)
            .ok_or(DeviceError::PeerNotFound(peer_id))?;
        Ok(peer.conversation.render_window(
            self.display.window_lines as usize,
            self.display.chars_per_line as usize,
        ))
    }

    /// North/east offset from us to a peer
    ///
    /// `NoFix` when either side has no position.
    pub fn displacement_to(&self, peer_id: u32) -> Result<Displacement, DeviceError> {
        let origin = self.me.position().ok_or(DeviceError::NoFix)?;
        let peer = self
            .peers
            .find(peer_id)
            .ok_or(DeviceError::PeerNotFound(peer_id))?;
        let target = peer.position.ok_or(DeviceError::NoFix)?;
        Ok(displacement(&origin, &target, self.display.distance_unit))
    }

    pub fn distance_to(&self, peer_id: u32) -> Result<f64, DeviceError> {
        Ok(self.displacement_to(peer_id)?.magnitude())
    }

    /// `(id, distance)` for every located peer, in registry order
    pub fn proximity(&self) -> Result<Vec<(u32, f64)>, DeviceError> {
        let origin = self.me.position().ok_or(DeviceError::NoFix)?;
        Ok(self.peers.proximity(&origin, self.display.distance_unit))
    }

    /// Map scale that keeps every located peer in view
    pub fn map_scale(&self) -> Result<MapScale, DeviceError> {
        let origin = self.me.position().ok_or(DeviceError::NoFix)?;
        Ok(self.peers.map_range(&origin, self.display.distance_unit))
    }

    fn packet(&self, destination: u32, payload: Payload) -> Packet {
        Packet {
            header: Header {
                destination,
                source: self.me.id,
                name: self.me.name.clone(),
                payload_type: payload.payload_type(),
            },
            payload,
        }
    }
}
