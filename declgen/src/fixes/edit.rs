//! Text edits and their application.

use std::sync::Arc;

use camino::Utf8Path;

use crate::model::SourceSpan;
use crate::{GenError, GenResult};

/// Replacement of one span of source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextEdit {
    /// Span replaced; zero-width spans insert.
    pub span: SourceSpan,
    /// Replacement text.
    pub replacement: String,
}

impl TextEdit {
    /// Insert `text` at the zero-width span `at`.
    #[must_use]
    pub fn insert(at: SourceSpan, text: impl Into<String>) -> Self {
        Self {
            span: at,
            replacement: text.into(),
        }
    }

    /// Replace `span` with `text`.
    #[must_use]
    pub fn replace(span: SourceSpan, text: impl Into<String>) -> Self {
        Self {
            span,
            replacement: text.into(),
        }
    }

    /// Delete `span`.
    #[must_use]
    pub fn delete(span: SourceSpan) -> Self {
        Self::replace(span, String::new())
    }
}

/// Apply the edits that target `file` to `source`.
///
/// Edits are applied in offset order; several insertions at the same point
/// keep their relative order.
///
/// # Errors
///
/// Returns [`GenError::InvalidEdit`] when an edit falls outside `source` or
/// splits a character, and [`GenError::OverlappingEdits`] when two edits
/// overlap.
pub fn apply_edits(edits: &[TextEdit], file: &Utf8Path, source: &str) -> GenResult<String> {
    let mut relevant: Vec<&TextEdit> = edits.iter().filter(|e| e.span.file.as_path() == file).collect();
    relevant.sort_by_key(|e| (e.span.start, e.span.end));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in relevant {
        let SourceSpan { start, end, .. } = edit.span;
        if start > end
            || end > source.len()
            || !source.is_char_boundary(start)
            || !source.is_char_boundary(end)
        {
            return Err(Arc::new(GenError::invalid_edit(file, start, end, source.len())));
        }
        if start < cursor {
            return Err(Arc::new(GenError::OverlappingEdits {
                file: file.to_path_buf(),
                offset: start,
            }));
        }
        out.push_str(source.get(cursor..start).unwrap_or_default());
        out.push_str(&edit.replacement);
        cursor = end;
    }
    out.push_str(source.get(cursor..).unwrap_or_default());
    Ok(out)
}
