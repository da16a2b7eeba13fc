//! Compile-time option flags for patterns

use bitflags::bitflags;

bitflags! {
    /// Option flags that control how a pattern is compiled.
    /// The bit values are stable and may be stored or exchanged as plain integers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RegexFlags: u32 {
        /// Case insensitive matching
        const CASE_INSENSITIVE = 2;
        /// Allow white space and `#` comments within patterns
        const COMMENTS = 4;
        /// `^` and `$` match at line terminators inside the text
        const MULTILINE = 8;
        /// `.` matches line terminators
        const DOT_ALL = 32;
        /// Canonical equivalence (not implemented by the shipped engine)
        const CANON_EQ = 128;
        /// Unicode word boundaries for `\b`
        const UNICODE_WORD = 256;
    }
}

impl RegexFlags {
    /// Check if case insensitive matching is enabled
    pub fn case_insensitive(self) -> bool {
        self.contains(Self::CASE_INSENSITIVE)
    }

    /// Check if white space and comments are allowed in the pattern
    pub fn comments(self) -> bool {
        self.contains(Self::COMMENTS)
    }

    /// Check if `^` and `$` recognize line terminators
    pub fn multi_line(self) -> bool {
        self.contains(Self::MULTILINE)
    }

    /// Check if `.` matches line terminators
    pub fn dot_all(self) -> bool {
        self.contains(Self::DOT_ALL)
    }

    /// Check if canonical equivalence was requested
    pub fn canon_eq(self) -> bool {
        self.contains(Self::CANON_EQ)
    }

    /// Check if Unicode word boundaries were requested
    pub fn unicode_word(self) -> bool {
        self.contains(Self::UNICODE_WORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bits() {
        assert_eq!(RegexFlags::default(), RegexFlags::empty());
        let flags = RegexFlags::CASE_INSENSITIVE | RegexFlags::MULTILINE;
        assert_eq!(flags.bits(), 10);
        assert!(flags.case_insensitive());
        assert!(flags.multi_line());
        assert!(!flags.dot_all());
        assert!(!flags.comments());
        assert_eq!(
            RegexFlags::from_bits(256 | 128),
            Some(RegexFlags::UNICODE_WORD | RegexFlags::CANON_EQ)
        );
        assert_eq!(RegexFlags::from_bits(1), None);
    }
}
