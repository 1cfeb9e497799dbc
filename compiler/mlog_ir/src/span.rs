//! Source locations.
//!
//! Lines are 1-based and columns 0-based, matching the `loc` data the
//! parser attaches to every node.

use std::fmt;

/// A line/column position in the source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source location span of a node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span {
        start: Position::new(0, 0),
        end: Position::new(0, 0),
    };

    /// Create a new span.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Span starting and ending on a single line.
    #[inline]
    pub const fn on_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Span {
            start: Position::new(line, start_column),
            end: Position::new(line, end_column),
        }
    }

    /// Check if this is the dummy span.
    #[inline]
    pub fn is_dummy(&self) -> bool {
        *self == Self::DUMMY
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests;
