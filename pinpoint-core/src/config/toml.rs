//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Pinpoint configuration. It does NOT support full TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [device], [radio] and [display] section headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//!
//! ```toml
//! [device]
//! id = 42069
//! name = "Alice"
//!
//! [radio]
//! broadcast_interval_ms = 5000
//! partial_frame_timeout_ms = 250   # 0 waits forever
//!
//! [display]
//! utc_offset_hours = -7
//! distance_unit = "mi"
//! window_lines = 10
//! chars_per_line = 30
//! ```

use pinpoint_protocol::{device_name, BROADCAST_ID};

use super::types::DeviceConfig;
use crate::geo::DistanceUnit;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key outside of any section
    KeyOutsideSection,
    /// Invalid value type
    InvalidValue,
    /// Device name exceeds the header field
    NameTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Device,
    Radio,
    Display,
}

/// Parse TOML configuration into DeviceConfig
///
/// Anything not mentioned keeps its default. Unknown keys are ignored.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "device" => Ok(Section::Device),
        "radio" => Ok(Section::Radio),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    let value = strip_comment(rest).trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Cut a trailing `# comment`, ignoring `#` inside a quoted string
fn strip_comment(value: &str) -> &str {
    let mut quoted = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &value[..i],
            _ => {}
        }
    }
    value
}

/// String value: quoted, or a bare word for simple values
fn parse_string(value: &str) -> Result<&str, ParseError> {
    match value.strip_prefix('"') {
        Some(rest) => {
            let inner = rest.strip_suffix('"').ok_or(ParseError::InvalidValue)?;
            if inner.contains('"') {
                return Err(ParseError::InvalidValue);
            }
            Ok(inner)
        }
        None if value.contains('"') => Err(ParseError::InvalidValue),
        None => Ok(value),
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::KeyOutsideSection),
        Section::Device => match key {
            "id" => {
                let id: u32 = parse_int(value)?;
                if id == BROADCAST_ID {
                    return Err(ParseError::InvalidValue);
                }
                config.device.id = id;
            }
            "name" => {
                config.device.name =
                    device_name(parse_string(value)?).map_err(|_| ParseError::NameTooLong)?;
            }
            _ => {} // Ignore unknown keys
        },
        Section::Radio => match key {
            "broadcast_interval_ms" => config.radio.broadcast_interval_ms = parse_int(value)?,
            "partial_frame_timeout_ms" => {
                config.radio.partial_frame_timeout_ms = parse_int(value)?
            }
            _ => {}
        },
        Section::Display => match key {
            "utc_offset_hours" => {
                let offset: i8 = parse_int(value)?;
                if !(-12..=14).contains(&offset) {
                    return Err(ParseError::InvalidValue);
                }
                config.display.utc_offset_hours = offset;
            }
            "distance_unit" => {
                config.display.distance_unit = DistanceUnit::from_label(parse_string(value)?)
                    .ok_or(ParseError::InvalidValue)?;
            }
            "window_lines" => config.display.window_lines = parse_int(value)?,
            "chars_per_line" => config.display.chars_per_line = parse_int(value)?,
            _ => {}
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
# Pinpoint handheld
[device]
id = 42069
name = "Alice"   # shown to peers

[radio]
broadcast_interval_ms = 2000
partial_frame_timeout_ms = 0

[display]
utc_offset_hours = 1
distance_unit = "km"
window_lines = 8
chars_per_line = 24
"#;

    #[test]
    fn test_parse_full() {
        let config = parse_config(FULL).unwrap();
        assert_eq!(config.device.id, 42069);
        assert_eq!(config.device.name.as_str(), "Alice");
        assert_eq!(config.radio.broadcast_interval_ms, 2000);
        assert_eq!(config.radio.partial_frame_timeout_ms, 0);
        assert_eq!(config.display.utc_offset_hours, 1);
        assert_eq!(config.display.distance_unit, DistanceUnit::Kilometers);
        assert_eq!(config.display.window_lines, 8);
        assert_eq!(config.display.chars_per_line, 24);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[device]\nname = \"Bob\"\n").unwrap();
        let defaults = DeviceConfig::default();
        assert_eq!(config.device.name.as_str(), "Bob");
        assert_eq!(config.device.id, defaults.device.id);
        assert_eq!(config.radio, defaults.radio);
        assert_eq!(config.display, defaults.display);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), DeviceConfig::default());
    }

    #[test]
    fn test_unknown_key_ignored() {
        assert!(parse_config("[radio]\nchannel = 12\n").is_ok());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[gps]\nbaud = 9600\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_key_outside_section() {
        assert_eq!(
            parse_config("id = 3\n"),
            Err(ParseError::KeyOutsideSection)
        );
    }

    #[test]
    fn test_broadcast_id_rejected() {
        assert_eq!(
            parse_config("[device]\nid = 0\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[radio]\nbroadcast_interval_ms = soon\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\ndistance_unit = \"furlongs\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nutc_offset_hours = 20\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_name_too_long() {
        assert_eq!(
            parse_config("[device]\nname = \"abcdefghijklmnopqrstuvwxyz\"\n"),
            Err(ParseError::NameTooLong)
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            parse_config("[device]\nname = \"Alice\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\ndistance_unit = km\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[device]\nname = \"Al\"ice\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_bare_string_value() {
        let config = parse_config("[display]\ndistance_unit = nm # nautical\n").unwrap();
        assert_eq!(config.display.distance_unit, DistanceUnit::NauticalMiles);
    }

    #[test]
    fn test_hash_inside_string_kept() {
        let config = parse_config("[device]\nname = \"Team #1\"\n").unwrap();
        assert_eq!(config.device.name.as_str(), "Team #1");
    }
}
