use std::iter::FusedIterator;

use crate::{Captures, Engine, MatchSession, Result};

/// An iterator over the remaining non-overlapping matches of a session.
///
/// The iterator yields the [`Captures`] of each match until no more matches could be found.
/// After an error it yields nothing more.
///
/// The lifetime parameters are as follows:
///
/// * `'s` represents the lifetime of the borrow of the `MatchSession` that produced this iterator.
/// * `'t` represents the lifetime of the target text bound to the session.
///
/// This iterator can be created with the [`MatchSession::find_iter`] method.
#[derive(Debug)]
pub struct FindMatches<'s, 't, E: Engine> {
    session: &'s mut MatchSession<'t, E>,
    done: bool,
}

impl<'s, 't, E: Engine> FindMatches<'s, 't, E> {
    pub(crate) fn new(session: &'s mut MatchSession<'t, E>) -> Self {
        FindMatches {
            session,
            done: false,
        }
    }

    /// Returns the next match of the target.
    ///
    /// If no match is found, `Ok(None)` is returned.
    #[inline]
    pub fn next_match(&mut self) -> Result<Option<Captures>> {
        if self.done {
            return Ok(None);
        }
        let result = self.session.find_next();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result
    }
}

impl<E: Engine> Iterator for FindMatches<'_, '_, E> {
    type Item = Result<Captures>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_match().transpose()
    }
}

impl<E: Engine> FusedIterator for FindMatches<'_, '_, E> {}
