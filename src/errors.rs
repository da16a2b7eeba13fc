use std::collections::TryReserveError;

use thiserror::Error;

use crate::ParseError;

/// The result type for the `regex-session` crate.
pub type Result<T> = std::result::Result<T, SessionError>;

/// A macro that constructs a new SessionError::EngineError variant from a format string.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {
        $crate::SessionError::new($crate::SessionErrorKind::EngineError(format!($($arg)*)))
    };
}

/// The error type for the `regex-session` crate.
#[derive(Error, Debug)]
pub struct SessionError {
    /// The source of the error.
    pub source: Box<SessionErrorKind>,
}

impl SessionError {
    /// Create a new `SessionError`.
    pub fn new(kind: SessionErrorKind) -> Self {
        SessionError {
            source: Box::new(kind),
        }
    }

    /// The kind of the error.
    pub fn kind(&self) -> &SessionErrorKind {
        &self.source
    }

    /// The parse error details if this is a pattern syntax error.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match *self.source {
            SessionErrorKind::PatternSyntax { ref detail, .. } => Some(detail),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum SessionErrorKind {
    /// The pattern source was rejected by the regex compiler.
    #[error("Pattern syntax error: {message} ({detail})")]
    PatternSyntax {
        /// The compiler's description of the problem.
        message: String,
        /// Position and context of the problem in the pattern source.
        detail: ParseError,
    },

    /// The target text could not be attached to a match session.
    #[error("Unable to bind target text: {0}")]
    BindError(String),

    /// An internal inconsistency or failure inside the matching engine.
    #[error("Matching engine error: {0}")]
    EngineError(String),

    /// Memory for a buffer or an internal structure could not be obtained.
    #[error("Allocation failed: {0}")]
    AllocationError(String),

    /// A caller supplied index lies outside of the valid range.
    #[error("Index {index} is out of range (length {length})")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The length the index was checked against.
        length: usize,
    },

    /// The operation requires a target text but none is bound.
    #[error("No target text is bound to the match session")]
    NoTargetBound,

    /// The bound target text has a length of zero.
    #[error("The target text is empty")]
    ZeroLengthTarget,
}

impl From<SessionErrorKind> for SessionError {
    fn from(kind: SessionErrorKind) -> Self {
        SessionError::new(kind)
    }
}

impl From<TryReserveError> for SessionError {
    fn from(error: TryReserveError) -> Self {
        SessionError::new(SessionErrorKind::AllocationError(error.to_string()))
    }
}
