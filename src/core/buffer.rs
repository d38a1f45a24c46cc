//! Buffer: bounded, ordered collection of owned text lines
//!
//! Lines are 1-based at the API boundary and stored 0-based in a `Vec`.
//! Capacity and line length are checked here so callers never observe a
//! buffer with more than `capacity` lines or a line longer than
//! `max_line_len` characters.

use std::fmt;
use std::ops::Deref;

use log::{debug, warn};

use crate::core::error::EditError;
use crate::core::text::{self, Substitution};

/// Default maximum number of lines a buffer may hold
pub const DEFAULT_CAPACITY: usize = 1200;

/// Default maximum line length, in characters, excluding the terminator
pub const DEFAULT_MAX_LINE_LEN: usize = 255;

/// A single owned line of text, never containing its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(String);

impl Line {
    /// Build a line from `text`, truncating at a character boundary once
    /// `max_len` characters have been taken.
    pub fn new(text: &str, max_len: usize) -> Result<Self, EditError> {
        let text = match text.char_indices().nth(max_len) {
            Some((cut, _)) => {
                warn!(
                    "Line truncated to {} characters (was {})",
                    max_len,
                    text.chars().count()
                );
                &text[..cut]
            }
            None => text,
        };

        let mut owned = String::new();
        owned
            .try_reserve_exact(text.len())
            .map_err(|_| EditError::AllocFailure)?;
        owned.push_str(text);
        Ok(Self(owned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Line {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bounded line store
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<Line>,
    capacity: usize,
    max_line_len: usize,
}

impl LineBuffer {
    /// Create an empty buffer with the default limits
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CAPACITY, DEFAULT_MAX_LINE_LEN)
    }

    /// Create an empty buffer holding at most `capacity` lines of at most
    /// `max_line_len` characters each
    pub fn with_limits(capacity: usize, max_line_len: usize) -> Self {
        Self {
            lines: Vec::new(),
            capacity,
            max_line_len,
        }
    }

    // ==================== Content Access ====================

    /// Number of active lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Line at 1-based `idx`, or `None` outside `1..=len`
    pub fn get(&self, idx: usize) -> Option<&str> {
        idx.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(Line::as_str)
    }

    /// Iterate lines in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(Line::as_str)
    }

    /// Copy of the content as plain strings
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    // ==================== Editing Operations ====================

    /// Drop every line
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    /// Insert `text` so that it becomes line `pos` (1-based), shifting the
    /// lines at and after `pos` down by one.
    pub fn insert_at(&mut self, pos: usize, text: &str) -> Result<(), EditError> {
        let len = self.lines.len();
        if pos == 0 || pos > len + 1 {
            return Err(EditError::BadIndex { index: pos, len });
        }
        if self.is_full() {
            debug!("Insert at {} rejected: buffer full", pos);
            return Err(EditError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let line = Line::new(text, self.max_line_len)?;
        self.lines
            .try_reserve(1)
            .map_err(|_| EditError::AllocFailure)?;
        self.lines.insert(pos - 1, line);
        Ok(())
    }

    /// Append `text` after the last line
    pub fn push(&mut self, text: &str) -> Result<(), EditError> {
        self.insert_at(self.lines.len() + 1, text)
    }

    /// Delete lines `a..=b` (1-based, clamped to the buffer) and close the
    /// gap. Returns the number of lines removed.
    pub fn delete_range(&mut self, a: usize, b: usize) -> usize {
        let len = self.lines.len();
        if len == 0 {
            return 0;
        }
        let a = a.clamp(1, len);
        let b = b.clamp(1, len);
        if a > b {
            return 0;
        }
        self.lines.drain(a - 1..b);
        b - a + 1
    }

    /// Replace line `idx` with `text`, dropping the previous content
    pub fn replace_line(&mut self, idx: usize, text: &str) -> Result<(), EditError> {
        let len = self.lines.len();
        let line = Line::new(text, self.max_line_len)?;
        let slot = idx
            .checked_sub(1)
            .and_then(|i| self.lines.get_mut(i))
            .ok_or(EditError::BadIndex { index: idx, len })?;
        *slot = line;
        Ok(())
    }

    /// Apply `sub` to line `idx`, honoring the line length limit.
    /// Returns the number of replacements made; out-of-range lines make none.
    pub fn substitute(&mut self, idx: usize, sub: &Substitution, limit: usize) -> usize {
        let max_len = self.max_line_len;
        match idx.checked_sub(1).and_then(|i| self.lines.get_mut(i)) {
            Some(Line(content)) => text::replace_in_line(content, sub, max_len, limit),
            None => 0,
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
