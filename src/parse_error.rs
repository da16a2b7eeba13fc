use regex_syntax::ast::Position;

/// Capacity of the context snippets of a [`ParseError`], terminator included.
/// A snippet holds at most `PARSE_CONTEXT_LEN - 1` UTF-16 code units.
pub const PARSE_CONTEXT_LEN: usize = 16;

/// Location and surrounding text of a pattern compilation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The 1-based line of the error, or a value <= 0 if the line is unknown.
    pub line: i32,
    /// The offset of the error in UTF-16 code units.
    /// Measured from the start of the line if `line >= 1`, otherwise from the start of the
    /// pattern. Negative if unknown.
    pub offset: i32,
    /// Text preceding the error.
    pub pre_context: String,
    /// The error itself and the text following it.
    pub post_context: String,
}

impl ParseError {
    /// A parse error without position information.
    pub fn unlocated() -> Self {
        ParseError {
            line: 0,
            offset: -1,
            pre_context: String::new(),
            post_context: String::new(),
        }
    }

    /// Builds the parse error for the given position in the pattern source.
    pub(crate) fn at(pattern: &str, position: Position) -> Self {
        let byte_offset = position.offset;
        if !pattern.is_char_boundary(byte_offset) {
            return Self::unlocated();
        }
        let (before, after) = pattern.split_at(byte_offset);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].encode_utf16().count();
        ParseError {
            line: clamp_i32(position.line),
            offset: clamp_i32(column),
            pre_context: context_tail(before),
            post_context: context_head(after),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line : {}, offset : {}, precontext : {}, postcontext : {}",
            self.line, self.offset, self.pre_context, self.post_context
        )
    }
}

fn clamp_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// Surrogate pairs are never split, so a snippet may end up one unit shorter than the limit.
fn context_head(text: &str) -> String {
    let mut units = 0;
    let mut end = 0;
    for (i, c) in text.char_indices() {
        units += c.len_utf16();
        if units >= PARSE_CONTEXT_LEN {
            break;
        }
        end = i + c.len_utf8();
    }
    text[..end].to_string()
}

fn context_tail(text: &str) -> String {
    let mut units = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        units += c.len_utf16();
        if units >= PARSE_CONTEXT_LEN {
            break;
        }
        start = i;
    }
    text[start..].to_string()
}
