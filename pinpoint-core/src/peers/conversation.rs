//! Per-peer message history and draft

use alloc::vec::Vec;

use pinpoint_protocol::{MessageText, MAX_TEXT_LEN};

use crate::error::DeviceError;

/// Which side wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Sent,
    Received,
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    pub text: MessageText,
    pub direction: Direction,
}

impl Message {
    /// Lines this message takes when wrapped at `chars_per_line`
    ///
    /// An empty message still takes one line.
    pub fn line_count(&self, chars_per_line: usize) -> usize {
        let chars = self.text.chars().count();
        chars.div_ceil(chars_per_line.max(1)).max(1)
    }
}

/// Ordered message history with one peer, oldest first
///
/// Grows without bound; nothing is ever evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the tail; returns its position
    pub fn append(&mut self, text: MessageText, direction: Direction) -> usize {
        self.messages.push(Message { text, direction });
        self.messages.len() - 1
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Message> {
        self.messages.get(position)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent messages that fit in `max_lines` wrapped lines
    ///
    /// Walks back from the newest message and stops before the first one
    /// that would overflow the window. The result is oldest first. If the
    /// newest message alone is taller than the window, nothing fits.
    pub fn render_window(&self, max_lines: usize, chars_per_line: usize) -> &[Message] {
        let mut start = self.messages.len();
        let mut lines = 0;

        for (i, message) in self.messages.iter().enumerate().rev() {
            let needed = message.line_count(chars_per_line);
            if lines + needed > max_lines {
                break;
            }
            lines += needed;
            start = i;
        }

        &self.messages[start..]
    }
}

/// One change to a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DraftEdit<'a> {
    Push(char),
    /// Appended whole or not at all
    PushStr(&'a str),
    Backspace,
    Clear,
}

/// Unsent message being composed for a peer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    text: MessageText,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Bytes left before the draft is full
    pub fn remaining(&self) -> usize {
        MAX_TEXT_LEN - self.text.len()
    }

    /// Apply an edit; a full draft is left unchanged
    pub fn apply(&mut self, edit: DraftEdit<'_>) -> Result<(), DeviceError> {
        match edit {
            DraftEdit::Push(c) => self.text.push(c).map_err(|_| DeviceError::DraftFull),
            DraftEdit::PushStr(s) => self.text.push_str(s).map_err(|_| DeviceError::DraftFull),
            DraftEdit::Backspace => {
                self.text.pop();
                Ok(())
            }
            DraftEdit::Clear => {
                self.text.clear();
                Ok(())
            }
        }
    }

    /// Take the text out, leaving the draft empty
    pub fn take(&mut self) -> MessageText {
        core::mem::take(&mut self.text)
    }
}
