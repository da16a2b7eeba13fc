/// Module that provides the Group and Captures types
mod captures;
pub use captures::{Captures, Group};

/// Module that provides a Span type
mod span;
pub use span::Span;
