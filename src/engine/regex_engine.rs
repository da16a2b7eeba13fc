use log::trace;
use regex::{CaptureLocations, Regex, RegexBuilder};

use super::{Engine, Fill, OffsetMap, UnitSink};
use crate::{
    bridge::bind_error, engine_error, parser::parse_regex_syntax, ParseError, RegexFlags, Result,
    SessionError, SessionErrorKind,
};

/// Byte spans of all groups of a match, `None` for groups that did not participate.
type GroupSpans = Vec<Option<(usize, usize)>>;

/// The bound target text in the representation the `regex` crate searches.
#[derive(Debug)]
struct Haystack {
    text: String,
    offsets: OffsetMap,
}

/// An [`Engine`] built on the `regex` crate.
///
/// The target is kept as UTF-8 together with an [`OffsetMap`], all offsets crossing the engine
/// boundary are UTF-16 code unit offsets.
#[derive(Debug)]
pub struct RegexEngine {
    source: String,
    flags: RegexFlags,
    /// The pattern as written, used for searching.
    regex: Regex,
    /// The pattern anchored at the end of the text, used for whole text matches.
    whole: Regex,
    locs: CaptureLocations,
    whole_locs: CaptureLocations,
    haystack: Option<Haystack>,
    /// The groups of the current match.
    current: Option<GroupSpans>,
    /// The byte offset the next search starts at, `None` once the text is exhausted.
    next_start: Option<usize>,
}

impl RegexEngine {
    fn from_parts(source: String, flags: RegexFlags, regex: Regex, whole: Regex) -> Self {
        let locs = regex.capture_locations();
        let whole_locs = whole.capture_locations();
        RegexEngine {
            source,
            flags,
            regex,
            whole,
            locs,
            whole_locs,
            haystack: None,
            current: None,
            next_start: None,
        }
    }

    fn bound(&self) -> Result<&Haystack> {
        bound(&self.haystack)
    }

    /// Converts a code unit position into a byte offset, rejecting positions beyond the end.
    fn position(&self, index: usize) -> Result<usize> {
        let haystack = self.bound()?;
        let length = haystack.offsets.unit_len();
        if index > length {
            return Err(SessionError::new(SessionErrorKind::IndexOutOfRange {
                index,
                length,
            }));
        }
        Ok(haystack.offsets.to_byte(index))
    }

    /// Searches from the given byte offset and records the result as the current match.
    fn search_from(&mut self, start: usize) -> Result<bool> {
        let haystack = bound(&self.haystack)?;
        let found = search(&self.regex, &mut self.locs, &haystack.text, start);
        match found {
            Some(groups) => {
                self.record(groups)?;
                Ok(true)
            }
            None => {
                self.current = None;
                self.next_start = None;
                Ok(false)
            }
        }
    }

    /// Makes `groups` the current match and computes where the next search starts.
    /// A zero-width match moves the next start one character forward.
    fn record(&mut self, groups: GroupSpans) -> Result<()> {
        let (start, end) = groups
            .first()
            .copied()
            .flatten()
            .ok_or_else(|| engine_error!("match without bounds for group 0"))?;
        self.next_start = if start == end {
            self.bound()?.offsets.next_boundary(end)
        } else {
            Some(end)
        };
        trace!("Match at bytes {}..{}, next start {:?}", start, end, self.next_start);
        self.current = Some(groups);
        Ok(())
    }

    fn current_span(&self, group: usize) -> Result<Option<(usize, usize)>> {
        let groups = self
            .current
            .as_ref()
            .ok_or_else(|| engine_error!("no current match"))?;
        groups.get(group).copied().ok_or_else(|| {
            SessionError::new(SessionErrorKind::IndexOutOfRange {
                index: group,
                length: groups.len(),
            })
        })
    }

    fn whole_match_span(&self) -> Result<(usize, usize)> {
        self.current_span(0)?
            .ok_or_else(|| engine_error!("match without bounds for group 0"))
    }
}

fn bound(haystack: &Option<Haystack>) -> Result<&Haystack> {
    haystack
        .as_ref()
        .ok_or_else(|| SessionError::new(SessionErrorKind::NoTargetBound))
}

fn search(
    regex: &Regex,
    locs: &mut CaptureLocations,
    text: &str,
    start: usize,
) -> Option<GroupSpans> {
    regex.captures_read_at(locs, text, start)?;
    Some((0..locs.len()).map(|i| locs.get(i)).collect())
}

fn build(source: &str, flags: RegexFlags) -> Result<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(flags.case_insensitive())
        .multi_line(flags.multi_line())
        .dot_matches_new_line(flags.dot_all())
        .ignore_whitespace(flags.comments())
        .crlf(true)
        .unicode(true)
        .build()
        .map_err(|e| match e {
            regex::Error::CompiledTooBig(limit) => {
                SessionError::new(SessionErrorKind::AllocationError(format!(
                    "compiled pattern exceeds the size limit of {} bytes",
                    limit
                )))
            }
            regex::Error::Syntax(message) => SessionError::new(SessionErrorKind::PatternSyntax {
                message,
                detail: ParseError::unlocated(),
            }),
            other => engine_error!("{}", other),
        })
}

impl Engine for RegexEngine {
    fn open(pattern: &str, flags: RegexFlags) -> Result<Self> {
        if flags.canon_eq() {
            return Err(engine_error!("canonical equivalence is not implemented"));
        }
        let hir = parse_regex_syntax(pattern, flags)?;
        let regex = build(pattern, flags)?;
        // A trailing comment in verbose mode would swallow the closing parenthesis,
        // the newline terminates it.
        let whole = build(&format!("(?:{})\\z", pattern), flags)
            .or_else(|_| build(&format!("(?:{}\n)\\z", pattern), flags))?;
        trace!(
            "Compiled {:?} with {} capture groups",
            pattern,
            hir.properties().explicit_captures_len()
        );
        Ok(Self::from_parts(pattern.to_string(), flags, regex, whole))
    }

    fn try_clone(&self) -> Result<Self> {
        Ok(Self::from_parts(
            self.source.clone(),
            self.flags,
            self.regex.clone(),
            self.whole.clone(),
        ))
    }

    fn pattern(&self) -> &str {
        &self.source
    }

    fn flags(&self) -> RegexFlags {
        self.flags
    }

    fn set_text(&mut self, text: &[u16]) -> Result<()> {
        self.haystack = None;
        self.current = None;
        self.next_start = None;
        let text = String::from_utf16(text).map_err(bind_error)?;
        let offsets = OffsetMap::new(&text);
        self.haystack = Some(Haystack { text, offsets });
        self.next_start = Some(0);
        Ok(())
    }

    fn text(&self) -> Result<Vec<u16>> {
        Ok(self.bound()?.text.encode_utf16().collect())
    }

    fn matches(&mut self, start: usize) -> Result<bool> {
        let start = self.position(start)?;
        let haystack = bound(&self.haystack)?;
        let found = search(&self.whole, &mut self.whole_locs, &haystack.text, start)
            .filter(|groups| matches!(groups.first(), Some(Some((s, _))) if *s == start));
        match found {
            Some(groups) => {
                self.record(groups)?;
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn find(&mut self, start: usize) -> Result<bool> {
        let start = self.position(start)?;
        self.search_from(start)
    }

    fn find_next(&mut self) -> Result<bool> {
        self.bound()?;
        match self.next_start {
            Some(start) => self.search_from(start),
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn group_count(&self) -> Result<usize> {
        Ok(self.regex.captures_len().saturating_sub(1))
    }

    fn bounds(&self, group: usize) -> Result<Option<(usize, usize)>> {
        let Some((start, end)) = self.current_span(group)? else {
            return Ok(None);
        };
        let offsets = &self.bound()?.offsets;
        match (offsets.to_unit(start), offsets.to_unit(end)) {
            (Some(start), Some(end)) => Ok(Some((start, end))),
            _ => Err(engine_error!(
                "group {} bounds {}..{} are not character boundaries",
                group,
                start,
                end
            )),
        }
    }

    fn group(&self, group: usize, dest: &mut [u16]) -> Result<Fill> {
        let (start, end) = self
            .current_span(group)?
            .ok_or_else(|| engine_error!("group {} did not participate in the match", group))?;
        let text = self
            .bound()?
            .text
            .get(start..end)
            .ok_or_else(|| engine_error!("group {} bounds {}..{} are invalid", group, start, end))?;
        let mut sink = UnitSink::new(dest);
        sink.push_str(text);
        Ok(sink.finish())
    }

    fn reset(&mut self, index: usize) -> Result<()> {
        let start = self.position(index)?;
        self.current = None;
        self.next_start = Some(start);
        Ok(())
    }

    fn replace_first(&mut self, replacement: &[u16], dest: &mut [u16]) -> Result<Fill> {
        self.reset(0)?;
        let span = if self.find_next()? {
            Some(self.whole_match_span()?)
        } else {
            None
        };
        let fill = {
            let text = &self.bound()?.text;
            let mut sink = UnitSink::new(dest);
            match span {
                Some((start, end)) => {
                    sink.push_str(&text[..start]);
                    sink.push_units(replacement);
                    sink.push_str(&text[end..]);
                }
                None => sink.push_str(text),
            }
            sink.finish()
        };
        self.reset(0)?;
        Ok(fill)
    }

    fn replace_all(&mut self, replacement: &[u16], dest: &mut [u16]) -> Result<Fill> {
        self.reset(0)?;
        let mut spans = Vec::new();
        while self.find_next()? {
            spans.push(self.whole_match_span()?);
        }
        let fill = {
            let text = &self.bound()?.text;
            let mut sink = UnitSink::new(dest);
            let mut previous_end = 0;
            for (start, end) in spans {
                sink.push_str(&text[previous_end..start]);
                sink.push_units(replacement);
                previous_end = end;
            }
            sink.push_str(&text[previous_end..]);
            sink.finish()
        };
        self.reset(0)?;
        Ok(fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    fn engine_with_text(pattern: &str, text: &str) -> RegexEngine {
        let mut engine = RegexEngine::open(pattern, RegexFlags::empty()).unwrap();
        engine.set_text(&units(text)).unwrap();
        engine
    }

    fn all_spans(engine: &mut RegexEngine) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        while engine.find_next().unwrap() {
            spans.push(engine.bounds(0).unwrap().unwrap());
        }
        spans
    }

    #[test]
    fn test_open_rejects_invalid_pattern() {
        let error = RegexEngine::open("a+)", RegexFlags::empty()).unwrap_err();
        assert_eq!(error.parse_error().unwrap().offset, 2);
    }

    #[test]
    fn test_open_rejects_canonical_equivalence() {
        let error = RegexEngine::open("a", RegexFlags::CANON_EQ).unwrap_err();
        assert!(matches!(error.kind(), SessionErrorKind::EngineError(_)));
    }

    #[test]
    fn test_empty_matches_advance() {
        let mut engine = engine_with_text("a*", "baaab");
        assert_eq!(all_spans(&mut engine), vec![(0, 0), (1, 4), (4, 4), (5, 5)]);
        assert!(!engine.find_next().unwrap());
        assert!(!engine.find_next().unwrap());
    }

    #[test]
    fn test_offsets_are_utf16_units() {
        let mut engine = engine_with_text("(b)(x)?", "😀ab");
        assert!(engine.find(0).unwrap());
        assert_eq!(engine.bounds(0).unwrap(), Some((3, 4)));
        assert_eq!(engine.bounds(1).unwrap(), Some((3, 4)));
        assert_eq!(engine.bounds(2).unwrap(), None);
        let mut buffer = [0u16; 1];
        assert_eq!(engine.group(1, &mut buffer).unwrap(), Fill::Complete(1));
        assert_eq!(buffer[0], u16::from(b'b'));
        assert!(engine.group(2, &mut buffer).is_err());
        assert!(matches!(
            engine.bounds(3).unwrap_err().kind(),
            SessionErrorKind::IndexOutOfRange { index: 3, .. }
        ));
    }

    #[test]
    fn test_find_inside_surrogate_pair_moves_forward() {
        let mut engine = engine_with_text(".", "😀a");
        assert!(engine.find(1).unwrap());
        assert_eq!(engine.bounds(0).unwrap(), Some((2, 3)));
    }

    #[test]
    fn test_find_rejects_index_beyond_end() {
        let mut engine = engine_with_text("a", "abc");
        assert!(engine.find(3).is_ok());
        assert!(matches!(
            engine.find(4).unwrap_err().kind(),
            SessionErrorKind::IndexOutOfRange {
                index: 4,
                length: 3
            }
        ));
    }

    #[test]
    fn test_matches_whole_remainder() {
        let mut engine = engine_with_text("a|ab", "xab");
        assert!(!engine.matches(0).unwrap());
        assert!(engine.matches(1).unwrap());
        assert_eq!(engine.bounds(0).unwrap(), Some((1, 3)));
        assert!(!engine.matches(2).unwrap());
    }

    #[test]
    fn test_matches_with_trailing_comment() {
        let mut engine = RegexEngine::open("a b # letters", RegexFlags::COMMENTS).unwrap();
        engine.set_text(&units("ab")).unwrap();
        assert!(engine.matches(0).unwrap());
    }

    #[test]
    fn test_crlf_is_line_terminator() {
        let mut engine = RegexEngine::open("b$", RegexFlags::MULTILINE).unwrap();
        engine.set_text(&units("ab\r\nc")).unwrap();
        assert!(engine.find(0).unwrap());
        assert_eq!(engine.bounds(0).unwrap(), Some((1, 2)));

        let mut engine = engine_with_text("a.b", "a\rb");
        assert!(!engine.find(0).unwrap());
        let mut engine = RegexEngine::open("a.b", RegexFlags::DOT_ALL).unwrap();
        engine.set_text(&units("a\rb")).unwrap();
        assert!(engine.find(0).unwrap());
    }

    #[test]
    fn test_reset_restarts_search() {
        let mut engine = engine_with_text("a", "aaa");
        assert!(engine.find(2).unwrap());
        assert!(!engine.find_next().unwrap());
        engine.reset(1).unwrap();
        assert!(engine.bounds(0).is_err());
        assert_eq!(all_spans(&mut engine), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_set_text_rejects_unpaired_surrogate() {
        let mut engine = engine_with_text("a", "a");
        let error = engine.set_text(&[0x61, 0xD800]).unwrap_err();
        assert!(matches!(error.kind(), SessionErrorKind::BindError(_)));
        assert!(matches!(
            engine.find_next().unwrap_err().kind(),
            SessionErrorKind::NoTargetBound
        ));
    }

    #[test]
    fn test_replace_reports_overflow() {
        let mut engine = engine_with_text("a", "aaaa");
        let replacement = units("xyz");
        let mut small = [0u16; 7];
        assert_eq!(
            engine.replace_all(&replacement, &mut small).unwrap(),
            Fill::Overflow { required: 12 }
        );
        let mut large = [0u16; 12];
        assert_eq!(
            engine.replace_all(&replacement, &mut large).unwrap(),
            Fill::Complete(12)
        );
        assert_eq!(String::from_utf16(&large).unwrap(), "xyzxyzxyzxyz");
    }

    #[test]
    fn test_replace_first_without_match_copies_text() {
        let mut engine = engine_with_text("z", "abc");
        let mut buffer = [0u16; 4];
        assert_eq!(
            engine.replace_first(&units("-"), &mut buffer).unwrap(),
            Fill::Complete(3)
        );
        assert_eq!(String::from_utf16(&buffer[..3]).unwrap(), "abc");
    }

    #[test]
    fn test_replace_all_with_empty_matches() {
        let mut engine = engine_with_text("a*", "baaab");
        let mut buffer = [0u16; 16];
        let Fill::Complete(len) = engine.replace_all(&units("-"), &mut buffer).unwrap() else {
            panic!("buffer too small");
        };
        assert_eq!(String::from_utf16(&buffer[..len]).unwrap(), "-b--b-");
    }

    #[test]
    fn test_clone_has_no_text() {
        let engine = engine_with_text("(a)", "a");
        let clone = engine.try_clone().unwrap();
        assert_eq!(clone.pattern(), "(a)");
        assert_eq!(clone.group_count().unwrap(), 1);
        assert!(matches!(
            clone.text().unwrap_err().kind(),
            SessionErrorKind::NoTargetBound
        ));
        assert_eq!(engine.text().unwrap(), units("a"));
    }
}
