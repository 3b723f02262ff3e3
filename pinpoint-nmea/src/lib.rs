//! NMEA 0183 sentence handling for Pinpoint
//!
//! Turns the raw text stream from the GPS module into typed, validated
//! records. Five sentence kinds are understood:
//!
//! ```text
//! $GPGGA  position fix            -> Sentence::PositionFix
//! $GPGSA  satellite status (DOP)  -> Sentence::SatelliteStatus
//! $GPGSV  satellites in view      -> Sentence::SatelliteView
//! $GPRMC  recommended minimum     -> Sentence::CourseFix
//! $GPVTG  velocity made good      -> Sentence::VelocityFix
//! ```
//!
//! Every sentence passes the checksum check before a single field is
//! read. Parsing builds a fresh record; nothing is written into
//! previously committed state, so a corrupt sentence can only ever be
//! dropped as a whole.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod assembler;
pub mod checksum;
pub mod coord;
pub mod field;
pub mod sentence;
pub mod time;

pub use assembler::{AssembleError, SentenceAssembler, SentenceBuf, MAX_SENTENCE_LEN};
pub use checksum::ChecksumError;
pub use coord::{decimal_degrees, Coordinate, Hemisphere};
pub use sentence::{
    parse, FixMode, FixStatus, Gga, Gsa, GsvMessage, NmeaError, Rmc, SatelliteInfo,
    SatelliteTable, Sentence, SentenceKind, Vtg, SATELLITES_PER_GSV, SATELLITE_SLOTS,
};
pub use time::{LocalTime, Meridiem, UtcTime};
