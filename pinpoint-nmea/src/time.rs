//! UTC time of day as reported by the GPS module

use core::fmt;

/// UTC time in the sentence encoding `hhmmss.sss`
///
/// The raw value is kept as-is (it is also what goes out over the
/// radio), with accessors for the individual parts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcTime(pub f64);

impl UtcTime {
    pub fn raw(self) -> f64 {
        self.0
    }

    pub fn hours(self) -> u8 {
        (self.0 / 10_000.0) as u8
    }

    pub fn minutes(self) -> u8 {
        ((self.0 as u32 % 10_000) / 100) as u8
    }

    pub fn seconds(self) -> f64 {
        self.0 - (self.0 as u32 / 100 * 100) as f64
    }

    /// Fractional seconds since midnight UTC
    pub fn seconds_of_day(self) -> f64 {
        self.hours() as f64 * 3600.0 + self.minutes() as f64 * 60.0 + self.seconds()
    }

    /// Convert to a 12-hour wall clock at a fixed offset from UTC
    pub fn to_local(self, offset_hours: i8) -> LocalTime {
        let hour24 = (self.hours() as i16 + offset_hours as i16).rem_euclid(24) as u8;

        let meridiem = if hour24 >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        let hour = match hour24 % 12 {
            0 => 12,
            h => h,
        };

        LocalTime {
            hour,
            minute: self.minutes(),
            meridiem,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    Am,
    Pm,
}

/// 12-hour local clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    /// 1-12
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Meridiem,
}

impl fmt::Display for LocalTime {
    /// Renders as ` 9:05 pm`; the hour is right-aligned so the
    /// width never changes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.meridiem {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        };
        write!(f, "{:>2}:{:02} {}", self.hour, self.minute, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let t = UtcTime(123519.25);
        assert_eq!(t.hours(), 12);
        assert_eq!(t.minutes(), 35);
        assert!((t.seconds() - 19.25).abs() < 1e-9);
        assert!((t.seconds_of_day() - 45319.25).abs() < 1e-9);
    }

    #[test]
    fn test_local_time_negative_offset() {
        // 12:35 UTC at UTC-7 is 5:35 am
        let local = UtcTime(123519.0).to_local(-7);
        assert_eq!(local.hour, 5);
        assert_eq!(local.minute, 35);
        assert_eq!(local.meridiem, Meridiem::Am);
        assert_eq!(std::format!("{}", local), " 5:35 am");
    }

    #[test]
    fn test_local_time_wraps_midnight() {
        let local = UtcTime(3000.0).to_local(-7);
        assert_eq!(local.hour, 5);
        assert_eq!(local.minute, 30);
        assert_eq!(local.meridiem, Meridiem::Pm);
    }

    #[test]
    fn test_noon_and_midnight_are_twelve() {
        assert_eq!(UtcTime(120000.0).to_local(0).hour, 12);
        assert_eq!(UtcTime(120000.0).to_local(0).meridiem, Meridiem::Pm);
        assert_eq!(UtcTime(0.0).to_local(0).hour, 12);
        assert_eq!(UtcTime(0.0).to_local(0).meridiem, Meridiem::Am);
    }

    #[test]
    fn test_display_two_digit_hour() {
        let local = UtcTime(225900.0).to_local(0);
        assert_eq!(std::format!("{}", local), "10:59 pm");
    }
}
