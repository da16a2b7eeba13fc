//! Splitting a target at the boundaries of the matches of a pattern.

use log::trace;

use crate::{engine_error, Engine, HostString, MatchSession, Result};

impl<'t, E: Engine> MatchSession<'t, E> {
    /// Binds `text` and splits it at every match of the pattern.
    ///
    /// The text between two consecutive matches becomes a segment, even if it is empty. The
    /// text after the last match becomes a final segment only if it is not empty. An empty
    /// target yields no segments, unless the pattern matches the empty string.
    /// # Errors
    /// Besides the binding errors an `EngineError` is returned if the engine reports bounds
    /// that are not ordered or exceed the target. No partial result is returned.
    pub fn split<S: HostString + ?Sized>(&mut self, text: &'t S) -> Result<Vec<String>> {
        let length = self.set_text(text)?;
        let mut ranges = Vec::new();
        let mut previous_end = 0;
        while let Some((start, end)) = self.next_match_bounds()? {
            if end < start || start < previous_end || end > length {
                return Err(engine_error!(
                    "invalid match bounds {}..{} after {} in text of length {}",
                    start,
                    end,
                    previous_end,
                    length
                ));
            }
            ranges.push(previous_end..start);
            previous_end = end;
        }
        if previous_end < length {
            ranges.push(previous_end..length);
        }
        trace!("Split {} code units into {} segments", length, ranges.len());

        let target = self
            .target()
            .ok_or_else(|| engine_error!("target vanished during split"))?;
        ranges
            .into_iter()
            .map(|range| target.substring(range))
            .collect()
    }
}
