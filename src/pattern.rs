use std::str::FromStr;

use log::trace;

use crate::{Engine, RegexEngine, RegexFlags, Result, SessionError};

/// A compiled pattern.
///
/// The pattern exclusively owns its engine instance. A pattern can be bound to a target text
/// by moving it into a [`MatchSession`](crate::MatchSession). Use [`Pattern::try_clone`] to
/// obtain an independent instance for another session.
#[derive(Debug)]
pub struct Pattern<E: Engine = RegexEngine> {
    engine: E,
}

impl Pattern {
    /// Compiles a pattern with default flags.
    pub fn new(source: &str) -> Result<Self> {
        Self::compile(source, RegexFlags::empty())
    }

    /// Compiles a pattern with the given flags.
    pub fn with_flags(source: &str, flags: RegexFlags) -> Result<Self> {
        Self::compile(source, flags)
    }
}

impl<E: Engine> Pattern<E> {
    /// Compiles a pattern with the engine `E`.
    /// # Errors
    /// * `PatternSyntax` if the source is rejected, the error carries a
    ///   [`ParseError`](crate::ParseError) with line, offset and context.
    /// * `AllocationError` if the compiled pattern exceeds the engine's limits.
    /// * `EngineError` if the engine does not support the flags.
    pub fn compile(source: &str, flags: RegexFlags) -> Result<Self> {
        let engine = E::open(source, flags)?;
        trace!("Compiled pattern {:?} with flags {:?}", source, flags);
        Ok(Pattern { engine })
    }

    /// Creates an independent instance of this pattern.
    /// The clone is not bound to any text, regardless of the state of this pattern.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Pattern {
            engine: self.engine.try_clone()?,
        })
    }

    /// The pattern source as retained by the engine.
    pub fn as_str(&self) -> &str {
        self.engine.pattern()
    }

    /// The flags the pattern was compiled with.
    pub fn flags(&self) -> RegexFlags {
        self.engine.flags()
    }

    /// The number of capture groups, excluding group 0.
    pub fn capture_group_count(&self) -> Result<usize> {
        self.engine.group_count()
    }

    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl FromStr for Pattern {
    type Err = SessionError;

    fn from_str(source: &str) -> Result<Self> {
        Pattern::new(source)
    }
}

impl<E: Engine> std::fmt::Display for Pattern<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
