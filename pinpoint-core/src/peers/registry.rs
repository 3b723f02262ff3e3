//! Registry of known peers
//!
//! Peers are kept in the order they were first heard from. Lookups are
//! linear scans; a handful of radios in range does not justify an index.
//! Entries are never removed.

use alloc::vec::Vec;

use pinpoint_nmea::{Coordinate, UtcTime};
use pinpoint_protocol::{DeviceName, MessageText, PositionReport};

use super::conversation::{Conversation, Direction, Draft};
use crate::error::DeviceError;
use crate::geo::{distance, DistanceUnit, MapScale};

/// Everything known about one peer
#[derive(Debug, Clone, PartialEq)]
pub struct Peer {
    pub id: u32,
    pub name: DeviceName,
    /// UTC of the last position report
    pub utc: Option<UtcTime>,
    /// `None` until a report with a fix arrives
    pub position: Option<Coordinate>,
    pub speed_knots: Option<f32>,
    pub course_deg: Option<f32>,
    pub pdop: Option<f32>,
    pub conversation: Conversation,
    pub draft: Draft,
}

impl Peer {
    fn new(id: u32) -> Self {
        Self {
            id,
            name: DeviceName::new(),
            utc: None,
            position: None,
            speed_knots: None,
            course_deg: None,
            pdop: None,
            conversation: Conversation::new(),
            draft: Draft::new(),
        }
    }

    fn apply(&mut self, update: &PeerUpdate) {
        self.name = update.name.clone();
        if let Some(report) = update.report {
            self.utc = Some(report.utc);
            self.position = report.coordinate;
        }
        if update.speed_knots.is_some() {
            self.speed_knots = update.speed_knots;
        }
        if update.course_deg.is_some() {
            self.course_deg = update.course_deg;
        }
        if update.pdop.is_some() {
            self.pdop = update.pdop;
        }
    }
}

/// Fields to overwrite on a peer
#[derive(Debug, Clone, PartialEq)]
pub struct PeerUpdate {
    pub id: u32,
    pub name: DeviceName,
    /// Replaces time and position when present
    pub report: Option<PositionReport>,
    pub speed_knots: Option<f32>,
    pub course_deg: Option<f32>,
    pub pdop: Option<f32>,
}

impl PeerUpdate {
    /// Identity only, as learnt from any packet header
    pub fn identity(id: u32, name: DeviceName) -> Self {
        Self {
            id,
            name,
            report: None,
            speed_knots: None,
            course_deg: None,
            pdop: None,
        }
    }

    /// Identity plus a position report
    pub fn position(id: u32, name: DeviceName, report: PositionReport) -> Self {
        Self {
            report: Some(report),
            ..Self::identity(id, name)
        }
    }
}

/// Result of [`PeerRegistry::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Upserted {
    /// Position in iteration order
    pub position: usize,
    /// True if the peer was not known before
    pub created: bool,
}

/// Known peers, in the order they were first heard from
#[derive(Debug, Clone)]
pub struct PeerRegistry {
    own_id: u32,
    peers: Vec<Peer>,
}

impl PeerRegistry {
    /// Create an empty registry for the device with `own_id`
    pub fn new(own_id: u32) -> Self {
        Self {
            own_id,
            peers: Vec::new(),
        }
    }

    /// Insert or update a peer
    ///
    /// Returns `None` for the device's own id, which is never registered.
    pub fn upsert(&mut self, update: &PeerUpdate) -> Option<Upserted> {
        if update.id == self.own_id {
            return None;
        }

        let (position, created) = match self.position_of(update.id) {
            Some(position) => (position, false),
            None => {
                self.peers.push(Peer::new(update.id));
                (self.peers.len() - 1, true)
            }
        };

        self.peers[position].apply(update);
        Some(Upserted { position, created })
    }

    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.peers.iter().position(|p| p.id == id)
    }

    pub fn find(&self, id: u32) -> Option<&Peer> {
        self.peers.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut Peer> {
        self.peers.iter_mut().find(|p| p.id == id)
    }

    pub fn find_at_position(&self, position: usize) -> Option<&Peer> {
        self.peers.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Append a message to a peer's conversation; returns its position
    pub fn append_message(
        &mut self,
        id: u32,
        text: MessageText,
        direction: Direction,
    ) -> Result<usize, DeviceError> {
        let peer = self.find_mut(id).ok_or(DeviceError::PeerNotFound(id))?;
        Ok(peer.conversation.append(text, direction))
    }

    /// `(id, distance)` for every peer with a known position
    pub fn proximity(&self, origin: &Coordinate, unit: DistanceUnit) -> Vec<(u32, f64)> {
        self.peers
            .iter()
            .filter_map(|p| Some((p.id, distance(origin, p.position.as_ref()?, unit))))
            .collect()
    }

    /// Map scale that keeps every located peer inside the view
    pub fn map_range(&self, origin: &Coordinate, unit: DistanceUnit) -> MapScale {
        let farthest = self
            .proximity(origin, unit)
            .into_iter()
            .map(|(_, d)| d)
            .fold(0.0, f64::max);
        MapScale::fit(farthest, unit)
    }
}
