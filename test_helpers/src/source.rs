//! Literal source text with span lookup.
//!
//! Fix tests describe a declaration as real text, point the host metadata at
//! offsets inside it, then apply the suggested edits and inspect the result.
//!
//! ```
//! use declgen_test_helpers::SourceFile;
//!
//! let file = SourceFile::new("Shape.cs", "public record Shape { }");
//! assert_eq!(file.offset_of("record")?, 7);
//! assert_eq!(file.span_of("Shape")?.end, 19);
//! # Ok::<_, anyhow::Error>(())
//! ```

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use declgen::model::SourceSpan;

/// One named source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    path: Utf8PathBuf,
    text: String,
}

impl SourceFile {
    /// Wrap `text` as the contents of `path`.
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// File path used in spans.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// File contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the first occurrence of `needle`.
    ///
    /// # Errors
    ///
    /// Fails when `needle` does not occur in the file.
    pub fn offset_of(&self, needle: &str) -> Result<usize> {
        self.text
            .find(needle)
            .ok_or_else(|| anyhow!("'{needle}' not found in {}", self.path))
    }

    /// Span covering the first occurrence of `needle`.
    ///
    /// # Errors
    ///
    /// Fails when `needle` does not occur in the file.
    pub fn span_of(&self, needle: &str) -> Result<SourceSpan> {
        let start = self.offset_of(needle)?;
        Ok(SourceSpan::new(self.path.clone(), start, start + needle.len()))
    }

    /// Span starting at the first `from` and ending after the first `to`
    /// that follows it.
    ///
    /// # Errors
    ///
    /// Fails when either marker is missing.
    pub fn span_between(&self, from: &str, to: &str) -> Result<SourceSpan> {
        let start = self.offset_of(from)?;
        let rest = self
            .text
            .get(start..)
            .ok_or_else(|| anyhow!("offset {start} is not a char boundary"))?;
        let relative = rest
            .find(to)
            .ok_or_else(|| anyhow!("'{to}' not found after '{from}' in {}", self.path))?;
        Ok(SourceSpan::new(
            self.path.clone(),
            start,
            start + relative + to.len(),
        ))
    }

    /// Offset of the last closing brace, i.e. the end of the outermost body.
    ///
    /// # Errors
    ///
    /// Fails when the file has no closing brace.
    pub fn last_brace(&self) -> Result<usize> {
        self.text
            .rfind('}')
            .ok_or_else(|| anyhow!("no closing brace in {}", self.path))
    }

    /// Replace the contents, keeping the path.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(self.path.clone(), text)
    }
}
