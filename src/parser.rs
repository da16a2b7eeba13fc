//! This module contains the validating parser for pattern sources.
//! The pattern is parsed with the `regex_syntax` crate before it is handed to the matching
//! engine, so that a rejected pattern can be reported with its exact position.

use crate::{ParseError, RegexFlags, Result, SessionError, SessionErrorKind};
use log::trace;
use std::time::Instant;

use regex_syntax::{hir::Hir, ParserBuilder};

/// Parse the pattern source into a high-level intermediate representation (HIR).
/// # Arguments
/// * `input` - A string slice that holds the pattern source.
/// * `flags` - The compile flags that influence parsing.
/// # Returns
/// The `Hir` of the pattern.
/// # Errors
/// A `PatternSyntax` error carrying a [`ParseError`] is returned if the pattern is invalid.
pub(crate) fn parse_regex_syntax(input: &str, flags: RegexFlags) -> Result<Hir> {
    let now = Instant::now();
    let mut parser = ParserBuilder::new()
        .case_insensitive(flags.case_insensitive())
        .multi_line(flags.multi_line())
        .dot_matches_new_line(flags.dot_all())
        .ignore_whitespace(flags.comments())
        .crlf(true)
        .unicode(true)
        .build();
    match parser.parse(input) {
        Ok(hir) => {
            let elapsed_time = now.elapsed();
            trace!("Parsing took {} microseconds.", elapsed_time.as_micros());
            Ok(hir)
        }
        Err(e) => Err(syntax_error(input, &e)),
    }
}

/// Converts a `regex_syntax` error into a `PatternSyntax` error.
pub(crate) fn syntax_error(input: &str, error: &regex_syntax::Error) -> SessionError {
    let (message, detail) = match error {
        regex_syntax::Error::Parse(e) => {
            (e.kind().to_string(), ParseError::at(input, e.span().start))
        }
        regex_syntax::Error::Translate(e) => {
            (e.kind().to_string(), ParseError::at(input, e.span().start))
        }
        _ => (error.to_string(), ParseError::unlocated()),
    };
    trace!("Pattern {:?} rejected: {} ({})", input, message, detail);
    SessionError::new(SessionErrorKind::PatternSyntax { message, detail })
}
