//! Source positions attached to descriptors and diagnostics.

use std::fmt;

use camino::Utf8PathBuf;
use serde::Serialize;

/// Byte range within one source file.
///
/// Spans order by file, then start, then end. Grouping relies on that order
/// to recover declaration order independently of extraction order.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceSpan {
    /// File containing the span.
    pub file: Utf8PathBuf,
    /// Inclusive start offset in bytes.
    pub start: usize,
    /// Exclusive end offset in bytes.
    pub end: usize,
}

impl SourceSpan {
    /// Create a span covering `start..end` in `file`.
    #[must_use]
    pub fn new(file: impl Into<Utf8PathBuf>, start: usize, end: usize) -> Self {
        Self {
            file: file.into(),
            start,
            end,
        }
    }

    /// Zero-width span at `offset` in the same file.
    #[must_use]
    pub fn point(&self, offset: usize) -> Self {
        Self {
            file: self.file.clone(),
            start: offset,
            end: offset,
        }
    }

    /// Number of bytes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for zero-width spans.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{}", self.file, self.start, self.end)
    }
}
