use std::fmt;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// What the parser stepped over while recovering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecoveryKind {
    /// A line that matched no known shape.
    MalformedLine,

    /// An `end` line with no open component.
    UnmatchedEnd,

    /// A component that was still open at end of input.
    UnterminatedSpan { name: String },

    /// A multi-line property value that never closed.
    UnterminatedProperty { key: String },

    /// A second component declaration reusing an earlier name.
    DuplicateComponent { name: String },

    /// A metadata row with fewer columns than its section requires.
    ShortRow {
        section: String,
        columns: usize,
        minimum: usize,
    },

    /// A metadata row appearing before any section header.
    RowOutsideSection,

    /// A bracketed section header that names no known section.
    UnknownSection { name: String },

    /// A metadata file matching neither known shape.
    UnrecognizedShape,
}

impl fmt::Display for RecoveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine => write!(f, "malformed line skipped"),
            Self::UnmatchedEnd => write!(f, "'end' without an open component"),
            Self::UnterminatedSpan { name } => {
                write!(f, "component '{name}' is never closed")
            }
            Self::UnterminatedProperty { key } => {
                write!(f, "property '{key}' value is never closed")
            }
            Self::DuplicateComponent { name } => {
                write!(f, "duplicate component '{name}' ignored")
            }
            Self::ShortRow {
                section,
                columns,
                minimum,
            } => write!(
                f,
                "[{section}] row has {columns} column(s), needs at least {minimum}"
            ),
            Self::RowOutsideSection => write!(f, "row outside any section"),
            Self::UnknownSection { name } => write!(f, "unknown section [{name}]"),
            Self::UnrecognizedShape => {
                write!(f, "metadata matches no known shape; treated as empty")
            }
        }
    }
}

/// A piece of input the parser skipped or repaired.
///
/// Recoveries are never fatal. Parsing always produces a result and
/// reports what it stepped over alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub kind: RecoveryKind,
    /// 1-based line number.
    pub line: usize,
    pub span: Span,
}

impl Recovery {
    pub fn new(kind: RecoveryKind, line: usize, span: Span) -> Self {
        Self { kind, line, span }
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}
