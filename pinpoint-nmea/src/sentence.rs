//! Sentence records and the sentence parser
//!
//! [`parse`] turns one complete sentence into exactly one [`Sentence`].
//! The checksum is verified first; fields are then read into a fresh
//! record, and the record is only returned if every field was good.

use heapless::Vec;

use crate::checksum::{self, ChecksumError};
use crate::coord::{Coordinate, Hemisphere};
use crate::field::FieldReader;
use crate::time::UtcTime;

/// Satellite slots kept from GSV reassembly
pub const SATELLITE_SLOTS: usize = 12;

/// Satellites carried by a single GSV sentence
pub const SATELLITES_PER_GSV: usize = 4;

/// Errors returned by the sentence parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NmeaError {
    /// Checksum check failed; no field was read
    Checksum(ChecksumError),
    /// Sentence contains non-ASCII bytes
    NotAscii,
    /// Tag is not one of GGA, GSA, GSV, RMC, VTG
    UnknownSentence,
    /// A field failed to parse (1-based index after the tag)
    FieldParse { field: u8 },
}

impl From<ChecksumError> for NmeaError {
    fn from(e: ChecksumError) -> Self {
        NmeaError::Checksum(e)
    }
}

/// Sentence kinds understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    /// GGA
    PositionFix,
    /// GSA
    SatelliteStatus,
    /// GSV
    SatelliteView,
    /// RMC
    CourseFix,
    /// VTG
    VelocityFix,
}

impl SentenceKind {
    /// Look up a kind from a 5-character tag such as `GPRMC`
    ///
    /// The talker prefix (`GP`, `GN`, `GL`, ...) is not checked.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.len() != 5 {
            return None;
        }
        match &tag[2..] {
            "GGA" => Some(SentenceKind::PositionFix),
            "GSA" => Some(SentenceKind::SatelliteStatus),
            "GSV" => Some(SentenceKind::SatelliteView),
            "RMC" => Some(SentenceKind::CourseFix),
            "VTG" => Some(SentenceKind::VelocityFix),
            _ => None,
        }
    }

    /// Three-letter sentence code
    pub fn code(self) -> &'static str {
        match self {
            SentenceKind::PositionFix => "GGA",
            SentenceKind::SatelliteStatus => "GSA",
            SentenceKind::SatelliteView => "GSV",
            SentenceKind::CourseFix => "RMC",
            SentenceKind::VelocityFix => "VTG",
        }
    }
}

/// RMC receiver status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixStatus {
    /// `A` - data valid
    Active,
    /// `V` - receiver warning
    Void,
}

impl FixStatus {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(FixStatus::Active),
            'V' => Some(FixStatus::Void),
            _ => None,
        }
    }
}

/// Positioning mode indicator (NMEA 2.3+)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixMode {
    Autonomous,
    Differential,
    Estimated,
    Manual,
    Simulated,
    NotValid,
}

impl FixMode {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(FixMode::Autonomous),
            'D' => Some(FixMode::Differential),
            'E' => Some(FixMode::Estimated),
            'M' => Some(FixMode::Manual),
            'S' => Some(FixMode::Simulated),
            'N' => Some(FixMode::NotValid),
            _ => None,
        }
    }
}

/// GGA - position fix
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gga {
    pub utc: UtcTime,
    /// `None` when the receiver has no position yet
    pub position: Option<Coordinate>,
    /// 0 = no fix, 1 = GPS, 2 = DGPS, ...
    pub fix_quality: u8,
    pub satellites_used: u8,
    pub hdop: f32,
    pub altitude: f64,
    pub altitude_unit: Option<char>,
    pub geoid_separation: f32,
    pub geoid_unit: Option<char>,
    /// Age of differential corrections (seconds)
    pub correction_age: f32,
    pub station_id: Option<u16>,
}

impl Gga {
    fn read(r: &mut FieldReader<'_>) -> Self {
        let utc = UtcTime(r.number());
        let position = read_coordinate(r);
        let fix_quality = r.number();
        let satellites_used = r.number();
        let hdop = r.number();
        let altitude = r.number();
        let altitude_unit = r.letter();
        let geoid_separation = r.number();
        let geoid_unit = r.letter();
        let correction_age = r.number();
        let station_id = if r.has_more() {
            r.optional_number()
        } else {
            None
        };

        Self {
            utc,
            position,
            fix_quality,
            satellites_used,
            hdop,
            altitude,
            altitude_unit,
            geoid_separation,
            geoid_unit,
            correction_age,
            station_id,
        }
    }

    pub fn has_fix(&self) -> bool {
        self.fix_quality > 0 && self.position.is_some()
    }
}

/// GSA - DOP and active satellites
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gsa {
    /// `M` manual, `A` automatic 2D/3D
    pub selection: Option<char>,
    /// 1 = no fix, 2 = 2D, 3 = 3D
    pub fix_mode: u8,
    /// Satellite id per receiver channel, 0 when unused
    pub satellites: [u16; SATELLITE_SLOTS],
    pub pdop: f32,
    pub hdop: f32,
    pub vdop: f32,
}

impl Gsa {
    fn read(r: &mut FieldReader<'_>) -> Self {
        let selection = r.letter();
        let fix_mode = r.number();
        let mut satellites = [0u16; SATELLITE_SLOTS];
        for slot in satellites.iter_mut() {
            *slot = r.number();
        }
        let pdop = r.number();
        let hdop = r.number();
        let vdop = r.number();

        Self {
            selection,
            fix_mode,
            satellites,
            pdop,
            hdop,
            vdop,
        }
    }

    /// Ids of the satellites used in the solution
    pub fn satellites_used(&self) -> impl Iterator<Item = u16> + '_ {
        self.satellites.iter().copied().filter(|&id| id != 0)
    }
}

/// One satellite as reported by GSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SatelliteInfo {
    pub id: u16,
    /// Degrees above the horizon
    pub elevation: u16,
    /// Degrees from true north
    pub azimuth: u16,
    /// 0-99 dB-Hz, 0 when not tracked
    pub snr: u16,
}

/// GSV - one part of the satellites-in-view report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GsvMessage {
    pub total_messages: u8,
    /// 1-based
    pub index: u8,
    pub total_satellites: u16,
    pub satellites: Vec<SatelliteInfo, SATELLITES_PER_GSV>,
}

impl GsvMessage {
    fn read(r: &mut FieldReader<'_>) -> Self {
        let total_messages: u8 = r.number();
        let index: u8 = r.number();
        if index == 0 || index > total_messages {
            r.invalidate();
        }
        let total_satellites: u16 = r.number();

        // Groups this message should carry; anything after them (the
        // NMEA 4.1 signal id) is not a satellite
        let start = SATELLITES_PER_GSV * (index.max(1) as usize - 1);
        let groups = (total_satellites as usize)
            .saturating_sub(start)
            .min(SATELLITES_PER_GSV);

        let mut satellites = Vec::new();
        while satellites.len() < groups && r.has_more() {
            let info = SatelliteInfo {
                id: r.number(),
                elevation: r.number(),
                azimuth: r.number(),
                snr: r.number(),
            };
            // Cannot fail, length checked by the loop condition
            let _ = satellites.push(info);
        }

        Self {
            total_messages,
            index,
            total_satellites,
            satellites,
        }
    }

    pub fn is_last(&self) -> bool {
        self.index == self.total_messages
    }
}

/// Satellites in view, reassembled from a sequence of GSV sentences
///
/// Message `k` fills slots `4(k-1)..` and clears every slot after the
/// last one it wrote. Messages must therefore arrive in index order; a
/// message applied out of order wipes the satellites of later ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SatelliteTable {
    pub in_view: u16,
    pub slots: [SatelliteInfo; SATELLITE_SLOTS],
}

impl SatelliteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one GSV message
    pub fn apply(&mut self, message: &GsvMessage) {
        self.in_view = message.total_satellites;

        let start = SATELLITES_PER_GSV * (message.index.max(1) as usize - 1);
        let expected = (message.total_satellites as usize)
            .saturating_sub(start)
            .min(SATELLITES_PER_GSV);

        let mut slot = start;
        for n in 0..expected {
            if slot >= SATELLITE_SLOTS {
                break;
            }
            self.slots[slot] = message.satellites.get(n).copied().unwrap_or_default();
            slot += 1;
        }

        for cleared in self.slots.iter_mut().skip(slot) {
            *cleared = SatelliteInfo::default();
        }
    }

    /// Satellites currently held in the table
    pub fn visible(&self) -> impl Iterator<Item = &SatelliteInfo> {
        let count = (self.in_view as usize).min(SATELLITE_SLOTS);
        self.slots.iter().take(count)
    }

    /// Number of satellites with a signal
    pub fn tracked(&self) -> usize {
        self.visible().filter(|s| s.snr > 0).count()
    }
}

/// RMC - recommended minimum navigation data
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rmc {
    pub utc: UtcTime,
    pub status: Option<FixStatus>,
    pub position: Option<Coordinate>,
    pub speed_knots: f32,
    /// Course over ground, degrees true
    pub course_deg: f32,
    /// `ddmmyy`
    pub date: u32,
    pub magnetic_variation: f32,
    pub variation_direction: Option<Hemisphere>,
    pub mode: Option<FixMode>,
}

impl Rmc {
    fn read(r: &mut FieldReader<'_>) -> Self {
        let utc = UtcTime(r.number());
        let status = r.letter_with(FixStatus::from_letter);
        let position = read_coordinate(r);
        let speed_knots = r.number();
        let course_deg = r.number();
        let date = r.number();
        let magnetic_variation = r.number();
        let variation_direction = r.letter_with(Hemisphere::from_longitude_letter);
        let mode = r.trailing_letter_with(FixMode::from_letter);

        Self {
            utc,
            status,
            position,
            speed_knots,
            course_deg,
            date,
            magnetic_variation,
            variation_direction,
            mode,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(FixStatus::Active)
    }

    /// `(day, month, two-digit year)`
    pub fn date_parts(&self) -> (u8, u8, u8) {
        let day = (self.date / 10_000) as u8;
        let month = (self.date / 100 % 100) as u8;
        let year = (self.date % 100) as u8;
        (day, month, year)
    }
}

/// VTG - track made good and ground speed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vtg {
    pub course_true: f32,
    pub course_magnetic: f32,
    pub speed_knots: f32,
    pub speed_kmh: f32,
    pub mode: Option<FixMode>,
}

impl Vtg {
    fn read(r: &mut FieldReader<'_>) -> Self {
        let course_true = r.number();
        r.marker('T');
        let course_magnetic = r.number();
        r.marker('M');
        let speed_knots = r.number();
        r.marker('N');
        let speed_kmh = r.number();
        r.marker('K');
        let mode = r.trailing_letter_with(FixMode::from_letter);

        Self {
            course_true,
            course_magnetic,
            speed_knots,
            speed_kmh,
            mode,
        }
    }
}

/// A parsed sentence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sentence {
    PositionFix(Gga),
    SatelliteStatus(Gsa),
    SatelliteView(GsvMessage),
    CourseFix(Rmc),
    VelocityFix(Vtg),
}

impl Sentence {
    pub fn kind(&self) -> SentenceKind {
        match self {
            Sentence::PositionFix(_) => SentenceKind::PositionFix,
            Sentence::SatelliteStatus(_) => SentenceKind::SatelliteStatus,
            Sentence::SatelliteView(_) => SentenceKind::SatelliteView,
            Sentence::CourseFix(_) => SentenceKind::CourseFix,
            Sentence::VelocityFix(_) => SentenceKind::VelocityFix,
        }
    }
}

/// Parse one complete sentence, `$` through checksum
pub fn parse(line: &[u8]) -> Result<Sentence, NmeaError> {
    let body = checksum::validate(line)?;
    if !body.is_ascii() {
        return Err(NmeaError::NotAscii);
    }
    let body = core::str::from_utf8(body).map_err(|_| NmeaError::NotAscii)?;

    let (tag, fields) = body.split_once(',').unwrap_or((body, ""));
    let kind = SentenceKind::from_tag(tag).ok_or(NmeaError::UnknownSentence)?;

    let mut reader = FieldReader::new(fields);
    let sentence = match kind {
        SentenceKind::PositionFix => Sentence::PositionFix(Gga::read(&mut reader)),
        SentenceKind::SatelliteStatus => Sentence::SatelliteStatus(Gsa::read(&mut reader)),
        SentenceKind::SatelliteView => Sentence::SatelliteView(GsvMessage::read(&mut reader)),
        SentenceKind::CourseFix => Sentence::CourseFix(Rmc::read(&mut reader)),
        SentenceKind::VelocityFix => Sentence::VelocityFix(Vtg::read(&mut reader)),
    };

    reader
        .finish()
        .map_err(|field| NmeaError::FieldParse { field })?;

    Ok(sentence)
}

/// Read `lat,N/S,lon,E/W` and convert to decimal degrees
///
/// Four empty fields mean "no position". Anything partially filled, a
/// wrong hemisphere letter or an out-of-range value is a field error.
fn read_coordinate(r: &mut FieldReader<'_>) -> Option<Coordinate> {
    let lat = r.optional_number::<f64>();
    let lat_hemisphere = r.letter_with(Hemisphere::from_latitude_letter);
    let lon = r.optional_number::<f64>();
    let lon_hemisphere = r.letter_with(Hemisphere::from_longitude_letter);

    match (lat, lat_hemisphere, lon, lon_hemisphere) {
        (Some(lat), Some(lat_h), Some(lon), Some(lon_h)) => {
            let coordinate = Coordinate::from_ddmm(lat, lat_h, lon, lon_h);
            if coordinate.is_none() {
                r.invalidate();
            }
            coordinate
        }
        (None, None, None, None) => None,
        _ => {
            r.invalidate();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RMC: &[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,47.0,M,,*4F";
    const GSA: &[u8] = b"$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39";
    const VTG: &[u8] = b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48";

    const GSV_1: &[u8] =
        b"$GPGSV,3,1,10,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*7D";
    const GSV_2: &[u8] = b"$GPGSV,3,2,10,15,51,120,44,17,33,045,,19,12,300,38,22,63,170,47*7E";
    const GSV_3: &[u8] = b"$GPGSV,3,3,10,24,05,010,,30,71,210,49*71";

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_parse_rmc_literal() {
        let Sentence::CourseFix(rmc) = parse(RMC).unwrap() else {
            panic!("expected RMC");
        };

        assert_eq!(rmc.status, Some(FixStatus::Active));
        assert!(rmc.is_active());
        let position = rmc.position.unwrap();
        assert!(close(position.latitude, 48.1173));
        assert!(close(position.longitude, 11.5167));
        assert!((rmc.speed_knots - 22.4).abs() < 1e-4);
        assert!((rmc.course_deg - 84.4).abs() < 1e-4);
        assert_eq!(rmc.date, 230394);
        assert_eq!(rmc.date_parts(), (23, 3, 94));
        assert!((rmc.magnetic_variation - 3.1).abs() < 1e-4);
        assert_eq!(rmc.variation_direction, Some(Hemisphere::West));
        assert_eq!(rmc.mode, None);
        assert_eq!(rmc.utc, UtcTime(123519.0));
    }

    #[test]
    fn test_parse_rmc_with_mode() {
        let line = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,D*02";
        let Sentence::CourseFix(rmc) = parse(line).unwrap() else {
            panic!("expected RMC");
        };
        assert_eq!(rmc.mode, Some(FixMode::Differential));
    }

    #[test]
    fn test_parse_rmc_southern_western() {
        let line = b"$GPRMC,235959,A,3351.000,S,15112.000,W,000.0,000.0,010120,,*13";
        let Sentence::CourseFix(rmc) = parse(line).unwrap() else {
            panic!("expected RMC");
        };
        let position = rmc.position.unwrap();
        assert!(close(position.latitude, -33.85));
        assert!(close(position.longitude, -151.2));
        assert_eq!(rmc.variation_direction, None);
    }

    #[test]
    fn test_parse_rmc_no_fix() {
        let line = b"$GPRMC,123519,V,,,,,,,230394,,*33";
        let Sentence::CourseFix(rmc) = parse(line).unwrap() else {
            panic!("expected RMC");
        };
        assert_eq!(rmc.status, Some(FixStatus::Void));
        assert!(rmc.position.is_none());
    }

    #[test]
    fn test_parse_rmc_bad_hemisphere() {
        let line = b"$GPRMC,123519,A,4807.038,X,01131.000,E,022.4,084.4,230394,003.1,W*7C";
        assert_eq!(parse(line), Err(NmeaError::FieldParse { field: 4 }));
    }

    #[test]
    fn test_other_talker_accepted() {
        let line = b"$GNRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*74";
        assert_eq!(parse(line).unwrap().kind(), SentenceKind::CourseFix);
    }

    #[test]
    fn test_parse_gga() {
        let Sentence::PositionFix(gga) = parse(GGA).unwrap() else {
            panic!("expected GGA");
        };
        assert_eq!(gga.fix_quality, 1);
        assert_eq!(gga.satellites_used, 8);
        assert!((gga.hdop - 0.9).abs() < 1e-4);
        assert!(close(gga.altitude, 545.4));
        assert_eq!(gga.altitude_unit, Some('M'));
        assert_eq!(gga.geoid_unit, Some('M'));
        assert_eq!(gga.correction_age, 0.0);
        assert_eq!(gga.station_id, None);
        assert!(gga.has_fix());
    }

    #[test]
    fn test_parse_gga_corrupt_field() {
        // Letter O in place of a zero; checksum is correct for the text
        let line = b"$GPGGA,123519,48O7.038,N,01131.000,E,1,08,0.9,545.4,M,47.0,M,,*30";
        assert_eq!(parse(line), Err(NmeaError::FieldParse { field: 2 }));
    }

    #[test]
    fn test_parse_gga_truncated() {
        let line = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08*77";
        assert!(matches!(parse(line), Err(NmeaError::FieldParse { .. })));
    }

    #[test]
    fn test_parse_gsa() {
        let Sentence::SatelliteStatus(gsa) = parse(GSA).unwrap() else {
            panic!("expected GSA");
        };
        assert_eq!(gsa.selection, Some('A'));
        assert_eq!(gsa.fix_mode, 3);
        let used: std::vec::Vec<u16> = gsa.satellites_used().collect();
        assert_eq!(used, [4, 5, 9, 12, 24]);
        assert!((gsa.pdop - 2.5).abs() < 1e-4);
        assert!((gsa.hdop - 1.3).abs() < 1e-4);
        assert!((gsa.vdop - 2.1).abs() < 1e-4);
    }

    #[test]
    fn test_parse_vtg() {
        let Sentence::VelocityFix(vtg) = parse(VTG).unwrap() else {
            panic!("expected VTG");
        };
        assert!((vtg.course_true - 54.7).abs() < 1e-4);
        assert!((vtg.course_magnetic - 34.4).abs() < 1e-4);
        assert!((vtg.speed_knots - 5.5).abs() < 1e-4);
        assert!((vtg.speed_kmh - 10.2).abs() < 1e-4);
        assert_eq!(vtg.mode, None);
    }

    #[test]
    fn test_parse_vtg_with_mode() {
        let line = b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25";
        let Sentence::VelocityFix(vtg) = parse(line).unwrap() else {
            panic!("expected VTG");
        };
        assert_eq!(vtg.mode, Some(FixMode::Autonomous));
    }

    #[test]
    fn test_checksum_runs_first() {
        let line = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6B";
        assert!(matches!(parse(line), Err(NmeaError::Checksum(_))));
    }

    #[test]
    fn test_unknown_sentence() {
        let line = b"$GPZDA,201530.00,04,07,2002,00,00*60";
        assert_eq!(parse(line), Err(NmeaError::UnknownSentence));
    }

    #[test]
    fn test_gsv_reassembly_in_order() {
        let mut table = SatelliteTable::new();
        for line in [GSV_1, GSV_2, GSV_3] {
            let Sentence::SatelliteView(msg) = parse(line).unwrap() else {
                panic!("expected GSV");
            };
            table.apply(&msg);
        }

        assert_eq!(table.in_view, 10);
        let ids: std::vec::Vec<u16> = table.slots.iter().map(|s| s.id).collect();
        assert_eq!(ids, [1, 2, 12, 14, 15, 17, 19, 22, 24, 30, 0, 0]);
        assert_eq!(table.slots[9].snr, 49);
        assert_eq!(table.slots[10], SatelliteInfo::default());
        assert_eq!(table.slots[11], SatelliteInfo::default());
        assert_eq!(table.visible().count(), 10);
        // 17 and 24 have no SNR
        assert_eq!(table.tracked(), 8);
    }

    #[test]
    fn test_gsv_first_message_clears_tail() {
        let mut table = SatelliteTable::new();
        table.slots[8].id = 99;

        let Sentence::SatelliteView(msg) = parse(GSV_1).unwrap() else {
            panic!("expected GSV");
        };
        table.apply(&msg);

        assert_eq!(table.slots[3].id, 14);
        assert!(table.slots[4..].iter().all(|s| *s == SatelliteInfo::default()));
    }

    #[test]
    fn test_gsv_short_message() {
        // Second of three messages carrying only one satellite group
        let line = b"$GPGSV,3,2,10,15,51,120,44*4A";
        let Sentence::SatelliteView(msg) = parse(line).unwrap() else {
            panic!("expected GSV");
        };
        assert_eq!(msg.satellites.len(), 1);
        assert!(!msg.is_last());

        let mut table = SatelliteTable::new();
        table.apply(&msg);
        assert_eq!(table.slots[4].id, 15);
        assert_eq!(table.slots[5], SatelliteInfo::default());
    }

    #[test]
    fn test_gsv_signal_id_ignored() {
        let line = b"$GPGSV,3,3,10,24,05,010,,30,71,210,49,1*6C";
        let Sentence::SatelliteView(msg) = parse(line).unwrap() else {
            panic!("expected GSV");
        };
        assert_eq!(msg.satellites.len(), 2);
        assert_eq!(msg.satellites[1].id, 30);
        assert_eq!(msg.satellites[1].snr, 49);

        let line = b"$GPGSV,1,1,02,24,05,010,,30,71,210,49,1*6F";
        let Sentence::SatelliteView(msg) = parse(line).unwrap() else {
            panic!("expected GSV");
        };
        assert_eq!(msg.satellites.len(), 2);
        assert!(msg.is_last());
    }

    #[test]
    fn test_gsv_index_zero_rejected() {
        let mut r = FieldReader::new("3,0,10");
        let _ = GsvMessage::read(&mut r);
        assert_eq!(r.finish(), Err(2));
    }
}
