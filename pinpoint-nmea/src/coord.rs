//! Coordinate conversion
//!
//! GPS modules report positions as degrees and decimal minutes
//! (`4807.038,N` = 48° 07.038' north). Everything past the parser works
//! in signed decimal degrees.

use libm::{fabs, floor};

/// Hemisphere letter attached to a latitude or longitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse a latitude hemisphere letter (`N` or `S`)
    pub fn from_latitude_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            _ => None,
        }
    }

    /// Parse a longitude hemisphere letter (`E` or `W`)
    pub fn from_longitude_letter(letter: char) -> Option<Self> {
        match letter {
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Parse any hemisphere from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'N' => Some(Hemisphere::North),
            b'S' => Some(Hemisphere::South),
            b'E' => Some(Hemisphere::East),
            b'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Wire byte for this hemisphere
    pub fn to_byte(self) -> u8 {
        match self {
            Hemisphere::North => b'N',
            Hemisphere::South => b'S',
            Hemisphere::East => b'E',
            Hemisphere::West => b'W',
        }
    }

    /// South and West carry a negative sign
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    pub fn is_latitude(self) -> bool {
        matches!(self, Hemisphere::North | Hemisphere::South)
    }
}

/// Convert degrees-decimal-minutes to signed decimal degrees
///
/// `ddmm = 4807.038` becomes `48 + 7.038 / 60`.
pub fn decimal_degrees(ddmm: f64, hemisphere: Hemisphere) -> f64 {
    let degrees = floor(ddmm / 100.0);
    let value = degrees + (ddmm - 100.0 * degrees) / 60.0;
    if hemisphere.is_negative() {
        -value
    } else {
        value
    }
}

/// Minutes part must be below 60 for a well-formed ddmm value
fn is_valid_ddmm(ddmm: f64) -> bool {
    ddmm.is_finite() && ddmm >= 0.0 && ddmm - 100.0 * floor(ddmm / 100.0) < 60.0
}

/// Signed decimal-degree position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    /// Latitude, positive north (-90 to +90)
    pub latitude: f64,
    /// Longitude, positive east (-180 to +180)
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        in_range.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Build from raw ddmm values and hemisphere letters as found in
    /// GGA and RMC sentences
    pub fn from_ddmm(
        lat_ddmm: f64,
        lat_hemisphere: Hemisphere,
        lon_ddmm: f64,
        lon_hemisphere: Hemisphere,
    ) -> Option<Self> {
        if !lat_hemisphere.is_latitude() || lon_hemisphere.is_latitude() {
            return None;
        }
        if !is_valid_ddmm(lat_ddmm) || !is_valid_ddmm(lon_ddmm) {
            return None;
        }

        Self::new(
            decimal_degrees(lat_ddmm, lat_hemisphere),
            decimal_degrees(lon_ddmm, lon_hemisphere),
        )
    }

    /// Build from unsigned decimal-degree magnitudes plus hemispheres
    /// (the radio wire representation)
    pub fn from_magnitudes(
        latitude: f64,
        lat_hemisphere: Hemisphere,
        longitude: f64,
        lon_hemisphere: Hemisphere,
    ) -> Option<Self> {
        if !lat_hemisphere.is_latitude() || lon_hemisphere.is_latitude() {
            return None;
        }

        let signed = |magnitude: f64, hemisphere: Hemisphere| {
            if hemisphere.is_negative() {
                -fabs(magnitude)
            } else {
                fabs(magnitude)
            }
        };

        Self::new(
            signed(latitude, lat_hemisphere),
            signed(longitude, lon_hemisphere),
        )
    }

    /// Unsigned latitude, paired with [`Self::latitude_hemisphere`]
    pub fn latitude_magnitude(&self) -> f64 {
        fabs(self.latitude)
    }

    /// Unsigned longitude, paired with [`Self::longitude_hemisphere`]
    pub fn longitude_magnitude(&self) -> f64 {
        fabs(self.longitude)
    }

    pub fn latitude_hemisphere(&self) -> Hemisphere {
        if self.latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    pub fn longitude_hemisphere(&self) -> Hemisphere {
        if self.longitude < 0.0 {
            Hemisphere::West
        } else {
            Hemisphere::East
        }
    }
}
