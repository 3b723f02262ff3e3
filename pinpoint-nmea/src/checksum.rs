//! Sentence checksum validation
//!
//! Sentence format:
//! ```text
//! $GPRMC,123519,A,...,W*6A\r\n
//!  ^^^^^^^^^^^^^^^^^^^^^      XOR of these bytes == 0x6A
//! ```

/// Reasons a sentence fails the checksum check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumError {
    /// Sentence does not start with `$`
    MissingStart,
    /// No `*` before the checksum digits
    MissingDelimiter,
    /// More than one `*` in the sentence
    MultipleDelimiters,
    /// Checksum is not exactly two hex digits
    BadChecksumDigits,
    /// Transmitted and computed checksums differ
    Mismatch { expected: u8, computed: u8 },
}

/// Running XOR over a sentence body
pub fn compute(body: &[u8]) -> u8 {
    body.iter().fold(0, |acc, &byte| acc ^ byte)
}

/// Validate a sentence and return its body
///
/// The body is everything strictly between `$` and `*`. A trailing
/// `\r` and/or `\n` after the checksum digits is ignored.
pub fn validate(sentence: &[u8]) -> Result<&[u8], ChecksumError> {
    let sentence = trim_line_end(sentence);

    let rest = match sentence.split_first() {
        Some((b'$', rest)) => rest,
        _ => return Err(ChecksumError::MissingStart),
    };

    let star = rest
        .iter()
        .position(|&b| b == b'*')
        .ok_or(ChecksumError::MissingDelimiter)?;
    let (body, tail) = rest.split_at(star);
    let digits = &tail[1..];

    if digits.contains(&b'*') {
        return Err(ChecksumError::MultipleDelimiters);
    }

    let expected = parse_hex_byte(digits).ok_or(ChecksumError::BadChecksumDigits)?;
    let computed = compute(body);

    if expected != computed {
        return Err(ChecksumError::Mismatch { expected, computed });
    }

    Ok(body)
}

/// Returns true if the sentence carries a correct checksum
pub fn is_valid(sentence: &[u8]) -> bool {
    validate(sentence).is_ok()
}

fn parse_hex_byte(digits: &[u8]) -> Option<u8> {
    match digits {
        [hi, lo] => Some(hex_value(*hi)? << 4 | hex_value(*lo)?),
        _ => None,
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn trim_line_end(mut sentence: &[u8]) -> &[u8] {
    while let Some((&last, rest)) = sentence.split_last() {
        if last == b'\r' || last == b'\n' {
            sentence = rest;
        } else {
            break;
        }
    }
    sentence
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RMC: &[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

    #[test]
    fn test_valid_sentence() {
        let body = validate(RMC).unwrap();
        assert!(body.starts_with(b"GPRMC,"));
        assert!(body.ends_with(b",W"));
    }

    #[test]
    fn test_line_ending_ignored() {
        let mut line = std::vec::Vec::from(RMC);
        line.extend_from_slice(b"\r\n");
        assert!(is_valid(&line));
    }

    #[test]
    fn test_lowercase_digits() {
        assert!(is_valid(
            b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6a"
        ));
    }

    #[test]
    fn test_missing_start() {
        assert_eq!(
            validate(b"GPRMC,123519*6A"),
            Err(ChecksumError::MissingStart)
        );
    }

    #[test]
    fn test_missing_delimiter() {
        assert_eq!(
            validate(b"$GPRMC,123519,A"),
            Err(ChecksumError::MissingDelimiter)
        );
    }

    #[test]
    fn test_multiple_delimiters() {
        assert_eq!(
            validate(b"$GPRMC,1*23*6A"),
            Err(ChecksumError::MultipleDelimiters)
        );
    }

    #[test]
    fn test_bad_digits() {
        assert_eq!(validate(b"$GPRMC,1*6"), Err(ChecksumError::BadChecksumDigits));
        assert_eq!(validate(b"$GPRMC,1*G0"), Err(ChecksumError::BadChecksumDigits));
        assert_eq!(validate(b"$GPRMC,1*"), Err(ChecksumError::BadChecksumDigits));
    }

    #[test]
    fn test_mismatch_reports_both_values() {
        let result = validate(
            b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6B",
        );
        assert_eq!(
            result,
            Err(ChecksumError::Mismatch {
                expected: 0x6B,
                computed: 0x6A
            })
        );
    }

    fn body_strategy() -> impl Strategy<Value = std::vec::Vec<u8>> {
        proptest::collection::vec(
            (0x20u8..0x7f).prop_filter("no delimiters", |b| *b != b'$' && *b != b'*'),
            1..80,
        )
    }

    proptest! {
        #[test]
        fn prop_single_byte_flip_detected(
            body in body_strategy(),
            index in any::<prop::sample::Index>(),
            mask in 1u8..=255,
        ) {
            let sentence = std::format!(
                "${}*{:02X}",
                std::str::from_utf8(&body).unwrap(),
                compute(&body)
            );
            let mut bytes = sentence.into_bytes();
            prop_assert!(is_valid(&bytes));

            // Body starts right after `$`
            let i = 1 + index.index(body.len());
            let before = compute(&bytes[1..1 + body.len()]);
            bytes[i] ^= mask;
            let after = compute(&bytes[1..1 + body.len()]);

            prop_assert_ne!(before, after);
            prop_assert!(!is_valid(&bytes));
        }
    }
}
