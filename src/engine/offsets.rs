/// A character whose UTF-8 and UTF-16 lengths differ from one.
#[derive(Debug, Clone, Copy)]
struct Wide {
    byte: usize,
    unit: usize,
    bytes: usize,
    units: usize,
}

impl Wide {
    fn byte_end(&self) -> usize {
        self.byte + self.bytes
    }

    fn unit_end(&self) -> usize {
        self.unit + self.units
    }
}

/// Maps between UTF-8 byte offsets and UTF-16 code unit offsets of one text.
///
/// Only non-ASCII characters are recorded. Between two of them every byte is one code unit, so
/// an ASCII text needs no entries at all. Both offset columns are strictly increasing and can
/// be binary searched.
#[derive(Debug, Clone, Default)]
pub(crate) struct OffsetMap {
    wide: Vec<Wide>,
    byte_len: usize,
    unit_len: usize,
}

impl OffsetMap {
    /// Builds the map for the given text.
    pub(crate) fn new(text: &str) -> Self {
        let mut wide = Vec::new();
        let mut unit = 0;
        for (byte, c) in text.char_indices() {
            let units = c.len_utf16();
            if !c.is_ascii() {
                wide.push(Wide {
                    byte,
                    unit,
                    bytes: c.len_utf8(),
                    units,
                });
            }
            unit += units;
        }
        OffsetMap {
            wide,
            byte_len: text.len(),
            unit_len: unit,
        }
    }

    /// The length of the text in code units.
    pub(crate) fn unit_len(&self) -> usize {
        self.unit_len
    }

    /// The last wide character starting at or before `byte`.
    fn wide_at_byte(&self, byte: usize) -> Option<&Wide> {
        let i = self.wide.partition_point(|w| w.byte <= byte);
        i.checked_sub(1).map(|i| &self.wide[i])
    }

    /// The code unit offset of a byte offset, `None` if it is not a character boundary.
    pub(crate) fn to_unit(&self, byte: usize) -> Option<usize> {
        if byte > self.byte_len {
            return None;
        }
        match self.wide_at_byte(byte) {
            None => Some(byte),
            Some(w) if byte == w.byte => Some(w.unit),
            Some(w) if byte < w.byte_end() => None,
            Some(w) => Some(w.unit_end() + (byte - w.byte_end())),
        }
    }

    /// The byte offset of a code unit offset.
    /// An offset inside a surrogate pair is moved forward to the next character boundary,
    /// an offset beyond the end is clamped to the end.
    pub(crate) fn to_byte(&self, unit: usize) -> usize {
        if unit >= self.unit_len {
            return self.byte_len;
        }
        let i = self.wide.partition_point(|w| w.unit <= unit);
        match i.checked_sub(1).map(|i| &self.wide[i]) {
            None => unit,
            Some(w) if unit == w.unit => w.byte,
            Some(w) if unit < w.unit_end() => w.byte_end(),
            Some(w) => w.byte_end() + (unit - w.unit_end()),
        }
    }

    /// The byte offset of the character boundary following `byte`, `None` at the end.
    pub(crate) fn next_boundary(&self, byte: usize) -> Option<usize> {
        if byte >= self.byte_len {
            return None;
        }
        match self.wide_at_byte(byte) {
            Some(w) if byte < w.byte_end() => Some(w.byte_end()),
            _ => Some(byte + 1),
        }
    }
}
