//! The matching engine collaborator.
//!
//! A match session drives an [`Engine`] through a small set of primitives. The engine owns the
//! compiled program, its own view of the bound target text, and the match cursor. Every
//! primitive reports its outcome as a `Result`, buffer filling primitives report an
//! undersized destination with [`Fill::Overflow`] instead of failing.

use crate::{RegexFlags, Result};

/// Module that maps between UTF-8 and UTF-16 offsets
mod offsets;
pub(crate) use offsets::OffsetMap;

/// The engine built on the `regex` crate
mod regex_engine;
pub use regex_engine::RegexEngine;

#[cfg(test)]
mod faulty;
#[cfg(test)]
pub(crate) use faulty::FaultyEngine;

/// Outcome of a primitive that writes code units into a caller supplied buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// The output fit, the value is the number of units written.
    Complete(usize),
    /// The output did not fit. The buffer holds a truncated prefix.
    Overflow {
        /// The number of units the complete output needs.
        required: usize,
    },
}

/// The primitives a matching engine provides to a match session.
///
/// All offsets are UTF-16 code unit offsets into the bound target text.
pub trait Engine: Sized {
    /// Compiles a pattern.
    fn open(pattern: &str, flags: RegexFlags) -> Result<Self>;

    /// Creates an independent instance of the compiled pattern without a bound text.
    fn try_clone(&self) -> Result<Self>;

    /// The pattern source as retained by the engine.
    fn pattern(&self) -> &str;

    /// The flags the pattern was compiled with.
    fn flags(&self) -> RegexFlags;

    /// Binds a target text and resets the match cursor to the start of the text.
    fn set_text(&mut self, text: &[u16]) -> Result<()>;

    /// A copy of the bound target text.
    fn text(&self) -> Result<Vec<u16>>;

    /// Checks whether the whole text from `start` on matches the pattern.
    fn matches(&mut self, start: usize) -> Result<bool>;

    /// Searches for the first match at or after `start`.
    fn find(&mut self, start: usize) -> Result<bool>;

    /// Searches for the next match after the current one.
    fn find_next(&mut self) -> Result<bool>;

    /// The number of capture groups, excluding group 0.
    fn group_count(&self) -> Result<usize>;

    /// The bounds of a group of the current match, `None` if the group did not participate.
    fn bounds(&self, group: usize) -> Result<Option<(usize, usize)>>;

    /// Writes the text of a group of the current match into `dest`.
    fn group(&self, group: usize, dest: &mut [u16]) -> Result<Fill>;

    /// Discards the current match, the next search starts at `index`.
    fn reset(&mut self, index: usize) -> Result<()>;

    /// Writes the text with its first match replaced by `replacement` into `dest`.
    fn replace_first(&mut self, replacement: &[u16], dest: &mut [u16]) -> Result<Fill>;

    /// Writes the text with all matches replaced by `replacement` into `dest`.
    fn replace_all(&mut self, replacement: &[u16], dest: &mut [u16]) -> Result<Fill>;
}

/// Collects code units into a fixed buffer and keeps counting once the buffer is full.
#[derive(Debug)]
pub(crate) struct UnitSink<'a> {
    dest: &'a mut [u16],
    len: usize,
}

impl<'a> UnitSink<'a> {
    pub(crate) fn new(dest: &'a mut [u16]) -> Self {
        UnitSink { dest, len: 0 }
    }

    pub(crate) fn push(&mut self, unit: u16) {
        if let Some(slot) = self.dest.get_mut(self.len) {
            *slot = unit;
        }
        self.len += 1;
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        for unit in text.encode_utf16() {
            self.push(unit);
        }
    }

    pub(crate) fn push_units(&mut self, units: &[u16]) {
        for &unit in units {
            self.push(unit);
        }
    }

    pub(crate) fn finish(self) -> Fill {
        if self.len <= self.dest.len() {
            Fill::Complete(self.len)
        } else {
            Fill::Overflow { required: self.len }
        }
    }
}
