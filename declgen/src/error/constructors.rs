//! Convenience constructors for `GenError`.

use std::sync::Arc;

use camino::Utf8Path;

use super::GenError;

impl GenError {
    /// Wrap a template compilation failure for `name`.
    #[must_use]
    pub fn template(name: impl Into<String>, source: handlebars::TemplateError) -> Self {
        Self::Template {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a render failure for `name`.
    #[must_use]
    pub fn render(name: impl Into<String>, source: handlebars::RenderError) -> Self {
        Self::Render {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a configuration extraction failure.
    #[must_use]
    pub fn config(source: figment::Error) -> Self {
        Self::Config(Box::new(source))
    }

    /// Build an [`GenError::InvalidEdit`] for `file`.
    #[must_use]
    pub fn invalid_edit(file: &Utf8Path, start: usize, end: usize, len: usize) -> Self {
        Self::InvalidEdit {
            file: file.to_path_buf(),
            start,
            end,
            len,
        }
    }

    /// Shared handle to a cancellation error.
    #[must_use]
    pub fn cancelled() -> Arc<Self> {
        Arc::new(Self::Cancelled)
    }

    /// Returns `true` when the error signals cancellation rather than a defect.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<figment::Error> for GenError {
    fn from(source: figment::Error) -> Self {
        Self::config(source)
    }
}
