//! Distance between positions
//!
//! Flat-earth (equirectangular) approximation: good to well under a
//! percent over the few miles a handheld radio covers, and it needs only
//! one `cos` per pair.
//!
//! ```text
//! north = R * (pi/180) * (lat2 - lat1)
//! east  = R * (pi/180) * (lon2 - lon1) * cos(pi/180 * (lat1 + lat2) / 2)
//! distance = sqrt(north^2 + east^2)
//! ```

use core::f64::consts::PI;

use libm::{cos, sqrt};
use pinpoint_nmea::Coordinate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest map range before the margin is applied
pub const MIN_MAP_RANGE: f64 = 1.5;

/// Headroom so the farthest peer is not drawn on the edge
pub const MAP_MARGIN: f64 = 4.0 / 3.0;

/// Unit for reported distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
    NauticalMiles,
}

impl DistanceUnit {
    /// Mean earth radius in this unit
    pub fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Miles => 3959.0,
            DistanceUnit::Kilometers => 6371.0,
            DistanceUnit::NauticalMiles => 3440.065,
        }
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::NauticalMiles => "nm",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "mi" | "miles" => Some(DistanceUnit::Miles),
            "km" | "kilometers" => Some(DistanceUnit::Kilometers),
            "nm" | "nautical_miles" => Some(DistanceUnit::NauticalMiles),
            _ => None,
        }
    }
}

/// Offset from one position to another
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Displacement {
    /// Positive when the target is north of the origin
    pub north: f64,
    /// Positive when the target is east of the origin
    pub east: f64,
}

impl Displacement {
    pub fn magnitude(&self) -> f64 {
        sqrt(self.north * self.north + self.east * self.east)
    }
}

/// Offset from `from` to `to`
pub fn displacement(from: &Coordinate, to: &Coordinate, unit: DistanceUnit) -> Displacement {
    let k = unit.earth_radius() * PI / 180.0;
    let mean_lat = (from.latitude + to.latitude) / 2.0;

    Displacement {
        north: k * (to.latitude - from.latitude),
        east: k * (to.longitude - from.longitude) * cos(PI / 180.0 * mean_lat),
    }
}

/// Distance between two positions
pub fn distance(a: &Coordinate, b: &Coordinate, unit: DistanceUnit) -> f64 {
    displacement(a, b, unit).magnitude()
}

/// Map scale fitted around the farthest peer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MapScale {
    /// Distance shown at the edge of the map
    pub range: f64,
    pub unit: DistanceUnit,
}

impl MapScale {
    /// Fit the map to the farthest distance, never below
    /// [`MIN_MAP_RANGE`] before the margin (2.0 with no peers)
    pub fn fit(farthest: f64, unit: DistanceUnit) -> Self {
        Self {
            range: farthest.max(MIN_MAP_RANGE) * MAP_MARGIN,
            unit,
        }
    }

    /// Distances of the three range rings, innermost first
    pub fn rings(&self) -> [f64; 3] {
        [self.range / 3.0, self.range * 2.0 / 3.0, self.range]
    }

    /// Place an offset on a map of `radius` pixels: `(x, y)` with x east
    /// and y north of the centre
    pub fn project(&self, offset: &Displacement, radius: i32) -> (i32, i32) {
        let scale = radius as f64 / self.range;
        ((offset.east * scale) as i32, (offset.north * scale) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = distance(&at(0.0, 0.0), &at(1.0, 0.0), DistanceUnit::Miles);
        assert!((d - 69.1).abs() < 0.05, "got {}", d);
    }

    #[test]
    fn test_units_scale() {
        let a = at(48.0, 11.0);
        let b = at(48.1, 11.2);
        let mi = distance(&a, &b, DistanceUnit::Miles);
        let km = distance(&a, &b, DistanceUnit::Kilometers);
        assert!((km / mi - 6371.0 / 3959.0).abs() < 1e-9);
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let equator = distance(&at(0.0, 0.0), &at(0.0, 1.0), DistanceUnit::Miles);
        let north = distance(&at(60.0, 0.0), &at(60.0, 1.0), DistanceUnit::Miles);
        assert!((north / equator - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_displacement_direction() {
        let d = displacement(&at(10.0, 10.0), &at(10.1, 9.9), DistanceUnit::Miles);
        assert!(d.north > 0.0);
        assert!(d.east < 0.0);
    }

    #[test]
    fn test_default_map_range() {
        let scale = MapScale::fit(0.0, DistanceUnit::Miles);
        assert!((scale.range - 2.0).abs() < 1e-9);
        let rings = scale.rings();
        assert!((rings[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!((rings[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_map_range_follows_farthest() {
        let scale = MapScale::fit(3.0, DistanceUnit::Miles);
        assert!((scale.range - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_project() {
        let scale = MapScale::fit(3.0, DistanceUnit::Miles);
        let offset = Displacement {
            north: 2.0,
            east: -4.0,
        };
        assert_eq!(scale.project(&offset, 240), (-240, 120));
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric(
            lat1 in -80.0f64..80.0, lon1 in -179.0f64..179.0,
            lat2 in -80.0f64..80.0, lon2 in -179.0f64..179.0,
        ) {
            let a = at(lat1, lon1);
            let b = at(lat2, lon2);
            let ab = distance(&a, &b, DistanceUnit::Miles);
            let ba = distance(&b, &a, DistanceUnit::Miles);
            prop_assert!((ab - ba).abs() < 1e-6);
            prop_assert!(ab >= 0.0);
        }
    }
}
