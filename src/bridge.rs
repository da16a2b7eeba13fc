//! Conversion between host strings and UTF-16 code unit buffers.
//!
//! A host string that can hand out a stable UTF-16 slice is borrowed without copying. Any other
//! host string is copied into an owned buffer. The choice is visible in [`Utf16Text`].

use log::trace;

use crate::{engine_error, Result, SessionError, SessionErrorKind};

/// The host string collaborator.
pub trait HostString {
    /// The length of the string in UTF-16 code units.
    fn utf16_len(&self) -> usize;

    /// The code unit at the given index, `None` if the index is out of range.
    fn utf16_unit_at(&self, index: usize) -> Option<u16>;

    /// A stable pointer to the code units of the string, if the string stores them directly.
    fn utf16_units(&self) -> Option<&[u16]> {
        None
    }

    /// Copies the code units of the string into `dest`.
    fn copy_utf16(&self, dest: &mut Vec<u16>) {
        dest.extend((0..self.utf16_len()).filter_map(|i| self.utf16_unit_at(i)));
    }
}

impl HostString for str {
    fn utf16_len(&self) -> usize {
        self.encode_utf16().count()
    }

    fn utf16_unit_at(&self, index: usize) -> Option<u16> {
        self.encode_utf16().nth(index)
    }

    fn copy_utf16(&self, dest: &mut Vec<u16>) {
        dest.extend(self.encode_utf16());
    }
}

impl HostString for String {
    fn utf16_len(&self) -> usize {
        self.as_str().utf16_len()
    }

    fn utf16_unit_at(&self, index: usize) -> Option<u16> {
        self.as_str().utf16_unit_at(index)
    }

    fn copy_utf16(&self, dest: &mut Vec<u16>) {
        self.as_str().copy_utf16(dest)
    }
}

impl HostString for [u16] {
    fn utf16_len(&self) -> usize {
        self.len()
    }

    fn utf16_unit_at(&self, index: usize) -> Option<u16> {
        self.get(index).copied()
    }

    fn utf16_units(&self) -> Option<&[u16]> {
        Some(self)
    }
}

impl HostString for Vec<u16> {
    fn utf16_len(&self) -> usize {
        self.len()
    }

    fn utf16_unit_at(&self, index: usize) -> Option<u16> {
        self.get(index).copied()
    }

    fn utf16_units(&self) -> Option<&[u16]> {
        Some(self)
    }
}

/// A UTF-16 text that is either borrowed from the host string or owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utf16Text<'a> {
    /// Zero-copy view of the host's code units. The host string is kept alive by the lifetime.
    Borrowed(&'a [u16]),
    /// Owned copy of the host string's code units.
    Owned(Vec<u16>),
}

impl<'a> Utf16Text<'a> {
    /// Converts a host string, borrowing its code units if it exposes them.
    /// # Errors
    /// An `AllocationError` is returned if the buffer for the copy cannot be allocated.
    pub fn bridge<S: HostString + ?Sized>(source: &'a S) -> Result<Self> {
        if let Some(units) = source.utf16_units() {
            trace!("Borrowing {} code units", units.len());
            return Ok(Utf16Text::Borrowed(units));
        }
        let len = source.utf16_len();
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(len)?;
        source.copy_utf16(&mut buffer);
        trace!("Copied {} code units", buffer.len());
        Ok(Utf16Text::Owned(buffer))
    }

    /// The code units of the text.
    pub fn as_units(&self) -> &[u16] {
        match self {
            Utf16Text::Borrowed(units) => units,
            Utf16Text::Owned(units) => units,
        }
    }

    /// The length of the text in code units.
    pub fn len(&self) -> usize {
        self.as_units().len()
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.as_units().is_empty()
    }

    /// Check if the text borrows the host's buffer.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Utf16Text::Borrowed(_))
    }

    /// Decodes the code units in `range` into a `String`.
    /// # Errors
    /// An `EngineError` is returned if the range is out of bounds or cuts a surrogate pair.
    pub fn substring(&self, range: std::ops::Range<usize>) -> Result<String> {
        let units = self.as_units().get(range.clone()).ok_or_else(|| {
            engine_error!("range {:?} exceeds text of length {}", range, self.len())
        })?;
        decode_units(units)
    }

    /// Decodes the whole text into a `String`.
    pub fn to_string_checked(&self) -> Result<String> {
        decode_units(self.as_units())
    }
}

impl From<Vec<u16>> for Utf16Text<'static> {
    fn from(units: Vec<u16>) -> Self {
        Utf16Text::Owned(units)
    }
}

impl From<&str> for Utf16Text<'static> {
    fn from(text: &str) -> Self {
        Utf16Text::Owned(text.encode_utf16().collect())
    }
}

impl<'a> From<&'a [u16]> for Utf16Text<'a> {
    fn from(units: &'a [u16]) -> Self {
        Utf16Text::Borrowed(units)
    }
}

/// Decodes UTF-16 code units, rejecting unpaired surrogates.
pub(crate) fn decode_units(units: &[u16]) -> Result<String> {
    String::from_utf16(units).map_err(|e| engine_error!("invalid UTF-16 text: {}", e))
}

/// Allocates a zeroed code unit buffer of exactly `len` units.
pub(crate) fn unit_buffer(len: usize) -> Result<Vec<u16>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Reports a conversion failure of a target text as a bind error.
pub(crate) fn bind_error(reason: impl std::fmt::Display) -> SessionError {
    SessionError::new(SessionErrorKind::BindError(reason.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_borrows_utf16_slices() {
        let units: Vec<u16> = "héllo".encode_utf16().collect();
        let text = Utf16Text::bridge(&units).unwrap();
        assert!(text.is_borrowed());
        assert_eq!(text.len(), 5);
        assert_eq!(text.as_units().as_ptr(), units.as_ptr());
    }

    #[test]
    fn test_bridge_copies_str() {
        let source = "a😀b";
        let text = Utf16Text::bridge(source).unwrap();
        assert!(!text.is_borrowed());
        assert_eq!(text.len(), 4);
        assert_eq!(text.to_string_checked().unwrap(), source);
        assert_eq!(text.substring(1..3).unwrap(), "😀");
    }

    #[test]
    fn test_substring_rejects_split_surrogate() {
        let text = Utf16Text::from("😀");
        assert!(text.substring(0..1).is_err());
        assert!(text.substring(0..3).is_err());
    }

    #[test]
    fn test_host_string_unit_access() {
        let source = String::from("ab😀");
        assert_eq!(source.utf16_len(), 4);
        assert_eq!(source.utf16_unit_at(1), Some(u16::from(b'b')));
        assert_eq!(source.utf16_unit_at(4), None);
        assert!(source.utf16_units().is_none());
    }

    #[test]
    fn test_copy_out_default() {
        struct Repeated(usize);
        impl HostString for Repeated {
            fn utf16_len(&self) -> usize {
                self.0
            }
            fn utf16_unit_at(&self, index: usize) -> Option<u16> {
                (index < self.0).then_some(u16::from(b'x'))
            }
        }
        let host = Repeated(3);
        let text = Utf16Text::bridge(&host).unwrap();
        assert_eq!(text.to_string_checked().unwrap(), "xxx");
    }
}
