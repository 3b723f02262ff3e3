//! The device's own identity and latest GPS records
//!
//! Records are only ever replaced whole, by a sentence that parsed
//! cleanly. A bad sentence never touches what is stored here.

use pinpoint_nmea::{
    Coordinate, Gga, Gsa, Rmc, SatelliteTable, Sentence, SentenceKind, UtcTime, Vtg,
};
use pinpoint_protocol::{DeviceName, PositionReport};

/// Own identity plus the most recent record of each sentence kind
#[derive(Debug, Clone)]
pub struct SelfState {
    pub id: u32,
    pub name: DeviceName,
    pub gga: Option<Gga>,
    pub gsa: Option<Gsa>,
    pub satellites: SatelliteTable,
    pub rmc: Option<Rmc>,
    pub vtg: Option<Vtg>,
}

impl SelfState {
    pub fn new(id: u32, name: DeviceName) -> Self {
        Self {
            id,
            name,
            gga: None,
            gsa: None,
            satellites: SatelliteTable::new(),
            rmc: None,
            vtg: None,
        }
    }

    /// Store a parsed sentence as the latest of its kind
    pub fn commit(&mut self, sentence: Sentence) -> SentenceKind {
        let kind = sentence.kind();
        match sentence {
            Sentence::PositionFix(gga) => self.gga = Some(gga),
            Sentence::SatelliteStatus(gsa) => self.gsa = Some(gsa),
            Sentence::SatelliteView(gsv) => self.satellites.apply(&gsv),
            Sentence::CourseFix(rmc) => self.rmc = Some(rmc),
            Sentence::VelocityFix(vtg) => self.vtg = Some(vtg),
        }
        kind
    }

    /// Current position: an active RMC fix, else a GGA fix
    pub fn position(&self) -> Option<Coordinate> {
        if let Some(rmc) = self.rmc.as_ref().filter(|r| r.is_active()) {
            if rmc.position.is_some() {
                return rmc.position;
            }
        }
        self.gga.as_ref().filter(|g| g.has_fix()).and_then(|g| g.position)
    }

    /// Time of the latest RMC or GGA record
    pub fn utc(&self) -> Option<UtcTime> {
        self.rmc.map(|r| r.utc).or(self.gga.map(|g| g.utc))
    }

    pub fn has_fix(&self) -> bool {
        self.position().is_some()
    }

    /// What the broadcaster sends: last time and position, if any
    pub fn position_report(&self) -> PositionReport {
        PositionReport {
            utc: self.utc().unwrap_or_default(),
            coordinate: self.position(),
        }
    }

    /// Speed over ground from VTG, else RMC
    pub fn speed_knots(&self) -> Option<f32> {
        self.vtg
            .map(|v| v.speed_knots)
            .or(self.rmc.map(|r| r.speed_knots))
    }

    /// Course over ground from VTG, else RMC
    pub fn course_deg(&self) -> Option<f32> {
        self.vtg
            .map(|v| v.course_true)
            .or(self.rmc.map(|r| r.course_deg))
    }

    pub fn pdop(&self) -> Option<f32> {
        self.gsa.map(|g| g.pdop)
    }
}
