use log::{debug, trace};

use crate::{
    bridge::decode_units, engine_error, extract::extract_groups, Captures, Engine, FindMatches,
    HostString, Pattern, RegexEngine, Result, SessionError, SessionErrorKind, Utf16Text,
};

/// The position state of a [`MatchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No target text is bound.
    Unbound,
    /// A target text is bound and no search has been performed since binding or resetting.
    AtStart,
    /// At least one search has been performed, the next search continues after its match.
    Positioned,
}

/// A pattern bound to at most one target text.
///
/// The session owns its pattern and the bound target. A target that was bridged without copying
/// is borrowed for `'t`, so it outlives the binding. All offsets are UTF-16 code units.
///
/// Matching operations return `Ok(None)` when no (further) match exists. This is the regular
/// end of a search and not an error.
#[derive(Debug)]
pub struct MatchSession<'t, E: Engine = RegexEngine> {
    pattern: Pattern<E>,
    target: Option<Utf16Text<'t>>,
    state: SessionState,
}

impl<'t, E: Engine> MatchSession<'t, E> {
    /// Creates an unbound session for the pattern.
    pub fn new(pattern: Pattern<E>) -> Self {
        MatchSession {
            pattern,
            target: None,
            state: SessionState::Unbound,
        }
    }

    /// The pattern of the session.
    pub fn pattern(&self) -> &Pattern<E> {
        &self.pattern
    }

    /// Releases the bound target and returns the pattern.
    pub fn into_pattern(self) -> Pattern<E> {
        self.pattern
    }

    /// The current position state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The bound target text.
    pub fn target(&self) -> Option<&Utf16Text<'t>> {
        self.target.as_ref()
    }

    /// Binds a host string as the new target text.
    ///
    /// The text is borrowed if the host string exposes its UTF-16 code units, otherwise it is
    /// copied. Any previous target is released and the position is reset to the start.
    /// # Returns
    /// The length of the target in code units.
    /// # Errors
    /// On failure the session is left unbound.
    /// * `BindError` if the engine cannot take the text, e.g. for unpaired surrogates.
    /// * `AllocationError` if the copy cannot be allocated.
    pub fn set_text<S: HostString + ?Sized>(&mut self, text: &'t S) -> Result<usize> {
        self.unbind();
        let target = Utf16Text::bridge(text)?;
        self.bind(target)
    }

    /// Binds an already converted text as the new target text.
    pub fn bind(&mut self, target: Utf16Text<'t>) -> Result<usize> {
        self.unbind();
        self.pattern.engine_mut().set_text(target.as_units())?;
        let length = target.len();
        debug!(
            "Bound target of {} code units ({})",
            length,
            if target.is_borrowed() {
                "borrowed"
            } else {
                "owned"
            }
        );
        self.target = Some(target);
        self.state = SessionState::AtStart;
        Ok(length)
    }

    /// Releases the bound target, the session becomes [`SessionState::Unbound`].
    pub fn clear_text(&mut self) -> Result<()> {
        self.unbind();
        // The engine keeps its own copy of the text until it is replaced.
        self.pattern.engine_mut().set_text(&[])
    }

    fn unbind(&mut self) {
        self.target = None;
        self.state = SessionState::Unbound;
    }

    fn require_target(&self) -> Result<&Utf16Text<'t>> {
        self.target
            .as_ref()
            .ok_or_else(|| SessionError::new(SessionErrorKind::NoTargetBound))
    }

    /// Checks that `index` is a position inside the bound target or its end.
    fn check_position(&self, index: usize) -> Result<()> {
        let length = self.require_target()?.len();
        if index > length {
            return Err(SessionError::new(SessionErrorKind::IndexOutOfRange {
                index,
                length,
            }));
        }
        Ok(())
    }

    /// The target text as retained by the engine.
    pub fn target_text(&self) -> Result<String> {
        self.require_target()?;
        decode_units(&self.pattern.engine().text()?)
    }

    /// Searches for the first match at or after `start`.
    /// # Errors
    /// * `NoTargetBound` if no target is bound.
    /// * `IndexOutOfRange` if `start` exceeds the length of the target.
    pub fn find(&mut self, start: usize) -> Result<Option<Captures>> {
        self.check_position(start)?;
        let found = self.pattern.engine_mut().find(start)?;
        self.state = SessionState::Positioned;
        trace!("find({}) -> {}", start, found);
        self.captures_if(found)
    }

    /// Searches for the next match after the previous one.
    ///
    /// Right after binding or resetting this searches from the reset position. After a
    /// zero-width match the search resumes one character further, so repeated calls always
    /// make progress. Once the target is exhausted every call returns `Ok(None)`.
    pub fn find_next(&mut self) -> Result<Option<Captures>> {
        self.require_target()?;
        let found = self.pattern.engine_mut().find_next()?;
        self.state = SessionState::Positioned;
        trace!("find_next() -> {}", found);
        self.captures_if(found)
    }

    /// Checks whether the whole target from `start` to its end matches the pattern.
    /// On success the match becomes the current match, see [`MatchSession::groups`].
    pub fn matches(&mut self, start: usize) -> Result<bool> {
        self.check_position(start)?;
        let matched = self.pattern.engine_mut().matches(start)?;
        self.state = SessionState::Positioned;
        Ok(matched)
    }

    /// Moves the session back to the start state, the next search begins at `index`.
    pub fn reset(&mut self, index: usize) -> Result<()> {
        self.check_position(index)?;
        self.pattern.engine_mut().reset(index)?;
        self.state = SessionState::AtStart;
        Ok(())
    }

    /// The number of capture groups, excluding group 0.
    pub fn capture_group_count(&self) -> Result<usize> {
        self.pattern.capture_group_count()
    }

    /// The groups of the current match.
    ///
    /// Only valid directly after a successful search. The groups have to be read before the
    /// session is advanced, reset or rebound.
    pub fn groups(&self) -> Result<Captures> {
        self.require_target()?;
        if self.state != SessionState::Positioned {
            return Err(engine_error!("no search was performed since the last reset"));
        }
        extract_groups(self.pattern.engine())
    }

    /// Returns an iterator over the remaining matches.
    pub fn find_iter(&mut self) -> FindMatches<'_, 't, E> {
        FindMatches::new(self)
    }

    /// Collects all matches of the bound target, starting from its beginning.
    pub fn find_all(&mut self) -> Result<Vec<Captures>> {
        self.reset(0)?;
        self.find_iter().collect()
    }

    fn captures_if(&self, found: bool) -> Result<Option<Captures>> {
        if found {
            extract_groups(self.pattern.engine()).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Advances like [`MatchSession::find_next`] but only reports the bounds of group 0.
    pub(crate) fn next_match_bounds(&mut self) -> Result<Option<(usize, usize)>> {
        self.require_target()?;
        let found = self.pattern.engine_mut().find_next()?;
        self.state = SessionState::Positioned;
        if !found {
            return Ok(None);
        }
        self.pattern
            .engine()
            .bounds(0)?
            .map(Some)
            .ok_or_else(|| engine_error!("match without bounds for group 0"))
    }

    pub(crate) fn engine_mut(&mut self) -> &mut E {
        self.pattern.engine_mut()
    }
}
