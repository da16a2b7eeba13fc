//! Literal replacement of matches with buffer growth.

use log::{debug, trace};

use crate::{
    bridge::{decode_units, unit_buffer},
    engine::Fill,
    engine_error, Engine, HostString, MatchSession, Result, SessionError, SessionErrorKind,
    Utf16Text,
};

impl<'t, E: Engine> MatchSession<'t, E> {
    /// Binds `text` and replaces its first match with `replacement`.
    ///
    /// The replacement is inserted verbatim, `$` and `\` have no special meaning. Without a
    /// match the text is returned unchanged. Afterwards the session is at the start of `text`.
    /// # Errors
    /// * `ZeroLengthTarget` if `text` is empty.
    /// * `EngineError` if the engine reports that the output does not fit.
    pub fn replace_first<S, R>(&mut self, text: &'t S, replacement: &R) -> Result<String>
    where
        S: HostString + ?Sized,
        R: HostString + ?Sized,
    {
        let (replacement, capacity) = self.prepare_replace(text, replacement)?;
        let mut buffer = unit_buffer(capacity)?;
        let fill = self
            .engine_mut()
            .replace_first(replacement.as_units(), &mut buffer)?;
        let output = match fill {
            Fill::Complete(len) => output_text(&buffer, len)?,
            Fill::Overflow { required } => {
                return Err(engine_error!(
                    "single replacement needs {} code units but {} were provided",
                    required,
                    capacity
                ));
            }
        };
        self.reset(0)?;
        Ok(output)
    }

    /// Binds `text` and replaces all its matches with `replacement`.
    ///
    /// Matches are found the same way [`MatchSession::find_next`] finds them. If the output
    /// does not fit, the buffer is grown to the size the engine reported and the replacement
    /// is run again from the start of the text.
    /// # Errors
    /// * `ZeroLengthTarget` if `text` is empty.
    /// * `EngineError` if the engine requests a buffer that is not larger than the last one.
    pub fn replace_all<S, R>(&mut self, text: &'t S, replacement: &R) -> Result<String>
    where
        S: HostString + ?Sized,
        R: HostString + ?Sized,
    {
        let (replacement, mut capacity) = self.prepare_replace(text, replacement)?;
        loop {
            let mut buffer = unit_buffer(capacity)?;
            let fill = self
                .engine_mut()
                .replace_all(replacement.as_units(), &mut buffer)?;
            // The partial output is discarded and the next attempt starts from the beginning.
            self.reset(0)?;
            match fill {
                Fill::Complete(len) => return output_text(&buffer, len),
                Fill::Overflow { required } => {
                    let grown = required.checked_add(1).ok_or_else(capacity_overflow)?;
                    if grown <= capacity {
                        return Err(engine_error!(
                            "replacement buffer cannot grow: {} code units required, {} provided",
                            required,
                            capacity
                        ));
                    }
                    debug!(
                        "Growing replacement buffer from {} to {} code units",
                        capacity, grown
                    );
                    capacity = grown;
                }
            }
        }
    }

    /// Binds the target and bridges the replacement.
    /// Returns the replacement and the initial output capacity.
    fn prepare_replace<'r, S, R>(
        &mut self,
        text: &'t S,
        replacement: &'r R,
    ) -> Result<(Utf16Text<'r>, usize)>
    where
        S: HostString + ?Sized,
        R: HostString + ?Sized,
    {
        let length = self.set_text(text)?;
        if length == 0 {
            return Err(SessionError::new(SessionErrorKind::ZeroLengthTarget));
        }
        let replacement = Utf16Text::bridge(replacement)?;
        let capacity = length
            .checked_add(replacement.len())
            .ok_or_else(capacity_overflow)?;
        trace!(
            "Replacing in {} code units with {} code units, initial capacity {}",
            length,
            replacement.len(),
            capacity
        );
        Ok((replacement, capacity))
    }
}

fn output_text(buffer: &[u16], len: usize) -> Result<String> {
    let units = buffer
        .get(..len)
        .ok_or_else(|| engine_error!("engine wrote {} code units into {}", len, buffer.len()))?;
    decode_units(units)
}

fn capacity_overflow() -> SessionError {
    SessionError::new(SessionErrorKind::AllocationError(
        "replacement buffer size overflows".to_string(),
    ))
}
