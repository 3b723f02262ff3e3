//! Change notifications for the user interface

use pinpoint_nmea::SentenceKind;

/// Receives notifications after device state has changed
///
/// Called from the consumer loop after the mutation is complete, so an
/// implementation may read the device state it is told about. Every
/// method defaults to doing nothing.
pub trait DeviceListener {
    /// A peer's identity or position changed (or the peer is new)
    fn on_peer_updated(&mut self, _peer_id: u32) {}

    /// A message from this peer was appended to its conversation
    fn on_message_received(&mut self, _peer_id: u32) {}

    /// A new record of this kind was committed to own state
    fn on_fix_updated(&mut self, _kind: SentenceKind) {}
}

/// Listener that ignores everything
impl DeviceListener for () {}
