//! Primary error enum for generation runs.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

/// Errors that abort an entire generation pass.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// A naming pattern does not contain exactly one placeholder.
    #[error("naming pattern '{pattern}' must contain exactly one '{{0}}' placeholder, found {found}")]
    InvalidNamePattern {
        /// Pattern text as configured.
        pattern: String,
        /// Number of placeholders present in the pattern.
        found: usize,
    },

    /// A template failed to compile.
    #[error("template '{name}' is malformed: {source}")]
    Template {
        /// Registry name of the template.
        name: String,
        /// Underlying error reported by the template engine.
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A compiled template failed to render a model.
    #[error("failed to render template '{name}': {source}")]
    Render {
        /// Registry name of the template.
        name: String,
        /// Underlying error reported by the template engine.
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Render model serialisation failed.
    #[error("failed to serialise render model: {0}")]
    Model(#[from] serde_json::Error),

    /// Project-wide or generator configuration could not be extracted.
    #[error("failed to load generator configuration: {0}")]
    Config(#[from] Box<FigmentError>),

    /// A fix produced an edit that does not fit the source text.
    #[error("edit {start}..{end} does not fit '{file}' ({len} bytes)")]
    InvalidEdit {
        /// File the edit targets.
        file: Utf8PathBuf,
        /// Start offset of the edit.
        start: usize,
        /// End offset of the edit.
        end: usize,
        /// Length of the source text the edit was applied to.
        len: usize,
    },

    /// Two edits of one fix overlap.
    #[error("overlapping edits in '{file}' at offset {offset}")]
    OverlappingEdits {
        /// File the edits target.
        file: Utf8PathBuf,
        /// Offset where the overlap starts.
        offset: usize,
    },

    /// The run was cancelled before it completed.
    #[error("generation cancelled")]
    Cancelled,
}
