//! Byte-at-a-time sentence assembly
//!
//! The UART delivers one byte at a time. The assembler collects bytes
//! from a `$` up to the line feed and hands back the complete sentence;
//! the checksum is left to the parser.
//!
//! - `$` always starts a new sentence, discarding anything partial
//! - bytes outside a sentence are dropped
//! - `\r` and `\n` are not stored

use heapless::Vec;

/// NMEA 0183 allows 82 characters; some modules run longer
pub const MAX_SENTENCE_LEN: usize = 96;

/// One complete sentence, `$` through the checksum digits
pub type SentenceBuf = Vec<u8, MAX_SENTENCE_LEN>;

/// Errors returned when a sentence cannot be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssembleError {
    /// Sentence exceeded [`MAX_SENTENCE_LEN`] and was discarded
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssembleState {
    /// Waiting for `$`
    Idle,
    /// Collecting sentence bytes
    Collecting,
    /// Too long; dropping bytes until the line ends
    Overflowed,
}

/// State machine turning a byte stream into sentences
#[derive(Debug, Clone)]
pub struct SentenceAssembler {
    state: AssembleState,
    buffer: SentenceBuf,
}

impl Default for SentenceAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceAssembler {
    pub fn new() -> Self {
        Self {
            state: AssembleState::Idle,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial sentence
    pub fn reset(&mut self) {
        self.state = AssembleState::Idle;
        self.buffer.clear();
    }

    /// True while a sentence is partially received
    pub fn is_partial(&self) -> bool {
        self.state != AssembleState::Idle
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(sentence))` at the end of a line, `Ok(None)` when
    /// more bytes are needed, or `Err` if the finished line was too long.
    pub fn feed(&mut self, byte: u8) -> Result<Option<SentenceBuf>, AssembleError> {
        if byte == b'$' {
            self.buffer.clear();
            // Buffer was just cleared
            let _ = self.buffer.push(byte);
            self.state = AssembleState::Collecting;
            return Ok(None);
        }

        match self.state {
            AssembleState::Idle => Ok(None),
            AssembleState::Collecting => match byte {
                b'\n' => {
                    let sentence = core::mem::take(&mut self.buffer);
                    self.state = AssembleState::Idle;
                    Ok(Some(sentence))
                }
                b'\r' => Ok(None),
                _ => {
                    if self.buffer.push(byte).is_err() {
                        self.buffer.clear();
                        self.state = AssembleState::Overflowed;
                    }
                    Ok(None)
                }
            },
            AssembleState::Overflowed => {
                if byte == b'\n' {
                    self.state = AssembleState::Idle;
                    return Err(AssembleError::Overflow);
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete sentence found. Bytes after it are not
    /// consumed; the second value is the number of bytes used.
    pub fn feed_bytes(
        &mut self,
        bytes: &[u8],
    ) -> (Result<Option<SentenceBuf>, AssembleError>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                other => return (other, i + 1),
            }
        }
        (Ok(None), bytes.len())
    }
}
