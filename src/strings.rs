//! One-shot helpers that run a pattern against a host string.
//!
//! Each helper binds an independent clone of the pattern, so the pattern passed in is never
//! bound or repositioned and can be shared by the caller.

use crate::{Captures, Engine, HostString, MatchSession, Pattern, RegexFlags, Result};

fn session_for<'t, E, S>(text: &'t S, pattern: &Pattern<E>) -> Result<MatchSession<'t, E>>
where
    E: Engine,
    S: HostString + ?Sized,
{
    let mut session = MatchSession::new(pattern.try_clone()?);
    session.set_text(text)?;
    Ok(session)
}

/// Checks whether the whole `text` matches `pattern`.
pub fn is_match<E: Engine, S: HostString + ?Sized>(
    text: &S,
    pattern: &Pattern<E>,
) -> Result<bool> {
    session_for(text, pattern)?.matches(0)
}

/// Compiles `source` and checks whether the whole `text` matches it.
pub fn is_match_pattern<S: HostString + ?Sized>(
    text: &S,
    source: &str,
    flags: RegexFlags,
) -> Result<bool> {
    let pattern = Pattern::with_flags(source, flags)?;
    is_match(text, &pattern)
}

/// The first match of `pattern` in `text` at or after `start`.
pub fn first_match<E: Engine, S: HostString + ?Sized>(
    text: &S,
    pattern: &Pattern<E>,
    start: usize,
) -> Result<Option<Captures>> {
    session_for(text, pattern)?.find(start)
}

/// All non-overlapping matches of `pattern` in `text`.
pub fn all_matches<E: Engine, S: HostString + ?Sized>(
    text: &S,
    pattern: &Pattern<E>,
) -> Result<Vec<Captures>> {
    session_for(text, pattern)?.find_all()
}

/// Splits `text` at the matches of `pattern`, see [`MatchSession::split`].
pub fn split<E: Engine, S: HostString + ?Sized>(
    text: &S,
    pattern: &Pattern<E>,
) -> Result<Vec<String>> {
    MatchSession::new(pattern.try_clone()?).split(text)
}

/// Replaces the first match of `pattern` in `text`, see [`MatchSession::replace_first`].
pub fn replace_first<E, S, R>(text: &S, pattern: &Pattern<E>, replacement: &R) -> Result<String>
where
    E: Engine,
    S: HostString + ?Sized,
    R: HostString + ?Sized,
{
    MatchSession::new(pattern.try_clone()?).replace_first(text, replacement)
}

/// Replaces all matches of `pattern` in `text`, see [`MatchSession::replace_all`].
pub fn replace_all<E, S, R>(text: &S, pattern: &Pattern<E>, replacement: &R) -> Result<String>
where
    E: Engine,
    S: HostString + ?Sized,
    R: HostString + ?Sized,
{
    MatchSession::new(pattern.try_clone()?).replace_all(text, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SessionErrorKind, Span};

    #[test]
    fn test_is_match_whole_text() {
        let pattern = Pattern::new(r"\d+").unwrap();
        assert!(is_match("12345", &pattern).unwrap());
        assert!(!is_match("123a45", &pattern).unwrap());
        assert!(is_match_pattern("HeLLo", "hello", RegexFlags::CASE_INSENSITIVE).unwrap());
        assert!(!is_match_pattern("HeLLo", "hello", RegexFlags::empty()).unwrap());
    }

    #[test]
    fn test_is_match_pattern_reports_syntax_error() {
        let error = is_match_pattern("abc", "(abc", RegexFlags::empty()).unwrap_err();
        assert!(matches!(error.kind(), SessionErrorKind::PatternSyntax { .. }));
    }

    #[test]
    fn test_first_match_from_index() {
        let pattern = Pattern::new("aaa").unwrap();
        let captures = first_match("aaadbbbaaa", &pattern, 1).unwrap().unwrap();
        assert_eq!(captures.span(), Some(Span::new(7, 10)));
        assert!(first_match("aaadbbbaaa", &pattern, 8).unwrap().is_none());
        assert!(matches!(
            first_match("aaa", &pattern, 4).unwrap_err().kind(),
            SessionErrorKind::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn test_all_matches() {
        let pattern = Pattern::new("aaa").unwrap();
        let matches = all_matches("aaadbbbaaa", &pattern).unwrap();
        let spans: Vec<Option<Span>> = matches.iter().map(Captures::span).collect();
        assert_eq!(spans, vec![Some(Span::new(0, 3)), Some(Span::new(7, 10))]);
    }

    #[test]
    fn test_helpers_share_pattern() {
        let pattern = Pattern::new(",").unwrap();
        let units: Vec<u16> = "x,y".encode_utf16().collect();
        assert_eq!(split(&units, &pattern).unwrap(), vec!["x", "y"]);
        assert_eq!(split("1,2,3", &pattern).unwrap(), vec!["1", "2", "3"]);
        assert_eq!(replace_first("1,2,3", &pattern, ";").unwrap(), "1;2,3");
        assert_eq!(replace_all("1,2,3", &pattern, ";").unwrap(), "1;2;3");
        assert_eq!(pattern.as_str(), ",");
    }
}
