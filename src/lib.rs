#![forbid(missing_docs)]
//! The `regex-session` crate provides stateful regex match sessions over UTF-16 text.
//! A compiled [`Pattern`] is bound to a target text in a [`MatchSession`] that supports
//! repositionable and resumable searching, capture extraction, splitting and literal
//! replacement. All offsets are UTF-16 code units.
//!
//! ```
//! use regex_session::{MatchSession, Pattern, Span};
//!
//! let mut session = MatchSession::new(Pattern::new(r"(\w+)@(\w+)").unwrap());
//! session.set_text("mail: user@host").unwrap();
//! let captures = session.find(0).unwrap().unwrap();
//! assert_eq!(captures[1].as_str(), "user");
//! assert_eq!(captures[2].span(), Some(Span::new(11, 15)));
//! assert!(session.find_next().unwrap().is_none());
//! ```

/// Module with error definitions
mod errors;
pub use errors::{Result, SessionError, SessionErrorKind};

/// Module with the compile flags
mod flags;
pub use flags::RegexFlags;

/// Module with the located description of pattern syntax errors
mod parse_error;
pub use parse_error::{ParseError, PARSE_CONTEXT_LEN};

/// The parser module validates pattern sources with the regex syntax parser.
mod parser;

/// Module with common types
mod common;
pub use common::{Captures, Group, Span};

/// The bridge between host strings and UTF-16 code unit buffers
mod bridge;
pub use bridge::{HostString, Utf16Text};

/// The matching engine contract and its implementation
mod engine;
pub use engine::{Engine, Fill, RegexEngine};

/// The compiled pattern
mod pattern;
pub use pattern::Pattern;

/// Extraction of capture groups from the engine
mod extract;

/// The match session state machine
mod session;
pub use session::{MatchSession, SessionState};

/// Iterator over the matches of a session
mod find_matches;
pub use find_matches::FindMatches;

/// Splitting a target at match boundaries
mod split;

/// Replacement of matches
mod replace;

/// One-shot helpers for host strings
pub mod strings;
pub use strings::{
    all_matches, first_match, is_match, is_match_pattern, replace_all, replace_first, split,
};
