use super::Span;

/// A single capture group of a match.
///
/// A group that did not participate in the match has no span and empty text. This is distinct
/// from a zero-width group, which has a span with `start == end` at a real offset.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Group {
    span: Option<Span>,
    text: String,
}

impl Group {
    /// Create a group that matched the given span with the given text.
    pub fn matched(span: Span, text: String) -> Self {
        Self {
            span: Some(span),
            text,
        }
    }

    /// Create a group that did not participate in the match.
    pub fn unmatched() -> Self {
        Self {
            span: None,
            text: String::new(),
        }
    }

    /// Check if the group participated in the match.
    pub fn is_matched(&self) -> bool {
        self.span.is_some()
    }

    /// Get the span of the group, `None` if it did not participate.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Get the start of the group.
    pub fn start(&self) -> Option<usize> {
        self.span.map(|s| s.start)
    }

    /// Get the end of the group.
    pub fn end(&self) -> Option<usize> {
        self.span.map(|s| s.end)
    }

    /// Get the matched text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the group and return the matched text.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// The groups of one match. Index 0 is the whole match, the following indices are the capture
/// groups in the order of their opening parentheses.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Captures {
    groups: Vec<Group>,
}

impl Captures {
    pub(crate) fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Get the group with the given index.
    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Get the span of the whole match.
    pub fn span(&self) -> Option<Span> {
        self.groups.first().and_then(Group::span)
    }

    /// Get the text of the whole match.
    pub fn as_str(&self) -> &str {
        self.groups.first().map_or("", Group::as_str)
    }

    /// Get number of groups (including group 0)
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups at all
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over all groups.
    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }
}

impl std::ops::Index<usize> for Captures {
    type Output = Group;

    fn index(&self, index: usize) -> &Self::Output {
        &self.groups[index]
    }
}

impl IntoIterator for Captures {
    type Item = Group;
    type IntoIter = std::vec::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a Captures {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
