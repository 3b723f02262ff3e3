//! Typed reader over the comma-separated fields of a sentence body
//!
//! Rules:
//! - an empty field (`,,`) reads as the zero value and is not an error
//! - a field that fails to parse reads as the zero value and marks the
//!   reader invalid, but reading continues so later fields stay aligned
//! - a missing required field (sentence ended early) marks the reader
//!   invalid
//!
//! The verdict is only taken in [`FieldReader::finish`], after the
//! caller has walked the whole record.

use core::str::{FromStr, Split};

/// Cursor over sentence fields
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    fields: Split<'a, char>,
    /// Number of fields consumed so far
    position: u8,
    /// 1-based index of the first field that failed
    first_error: Option<u8>,
}

impl<'a> FieldReader<'a> {
    /// Create a reader over the fields following the sentence tag
    pub fn new(fields: &'a str) -> Self {
        Self {
            fields: fields.split(','),
            position: 0,
            first_error: None,
        }
    }

    fn take(&mut self) -> Option<&'a str> {
        let field = self.fields.next();
        self.position = self.position.saturating_add(1);
        field
    }

    /// Mark the most recently read field as invalid
    pub fn invalidate(&mut self) {
        if self.first_error.is_none() {
            self.first_error = Some(self.position);
        }
    }

    /// True if at least one more field is available
    pub fn has_more(&self) -> bool {
        self.fields.clone().next().is_some()
    }

    /// Read a numeric field; empty reads as zero
    pub fn number<T: FromStr + Default>(&mut self) -> T {
        self.optional_number::<T>().unwrap_or_default()
    }

    /// Read a numeric field; empty reads as `None`
    pub fn optional_number<T: FromStr>(&mut self) -> Option<T> {
        match self.take() {
            None => {
                self.invalidate();
                None
            }
            Some("") => None,
            Some(raw) if is_numeric(raw) => match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    self.invalidate();
                    None
                }
            },
            Some(_) => {
                self.invalidate();
                None
            }
        }
    }

    /// Read a single-character field; empty reads as `None`
    pub fn letter(&mut self) -> Option<char> {
        match self.take() {
            None => {
                self.invalidate();
                None
            }
            Some(raw) => self.single_char(raw),
        }
    }

    /// Read a single-character field and map it; a character the
    /// mapping rejects marks the reader invalid
    pub fn letter_with<T>(&mut self, map: impl FnOnce(char) -> Option<T>) -> Option<T> {
        let letter = self.letter()?;
        let mapped = map(letter);
        if mapped.is_none() {
            self.invalidate();
        }
        mapped
    }

    /// Read a unit marker such as the `T` in `054.7,T`; empty is accepted
    pub fn marker(&mut self, expected: char) {
        if let Some(letter) = self.letter() {
            if letter != expected {
                self.invalidate();
            }
        }
    }

    /// Read a trailing single-character field that older modules omit
    /// entirely; absence is not an error
    pub fn trailing_letter_with<T>(&mut self, map: impl FnOnce(char) -> Option<T>) -> Option<T> {
        if !self.has_more() {
            return None;
        }
        self.letter_with(map)
    }

    fn single_char(&mut self, raw: &str) -> Option<char> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(c),
            (Some(_), Some(_)) => {
                self.invalidate();
                None
            }
        }
    }

    /// Take the verdict: `Err(field)` names the first failing field
    pub fn finish(self) -> Result<(), u8> {
        match self.first_error {
            None => Ok(()),
            Some(field) => Err(field),
        }
    }
}

/// `str::parse` also accepts `inf` and `NaN`; sentences never carry those
fn is_numeric(raw: &str) -> bool {
    raw.bytes()
        .all(|b| b.is_ascii_digit() || b == b'.' || b == b'-')
}
