//! Validation rules and the diagnostics they raise.
//!
//! Rules run per descriptor after extraction and settings resolution. They
//! are independent of each other: one declaration may raise several
//! diagnostics, and a rule that applies at several locations raises one
//! diagnostic per location. A rule either leaves the descriptor out of
//! generation (errors) or downgrades the offending setting to a safe value
//! (warnings), so that validation never aborts the pass.

mod async_ext;
mod catalogue;
mod union;

pub use async_ext::{ValidatedMethod, duplicate_member, validate_method};
pub use catalogue::{DiagnosticId, Severity};
pub use union::{ValidatedUnion, validate_union};

use std::fmt;

use crate::host::Annotation;
use crate::model::{SourceSpan, TypeKind};

/// Source facts a fix needs to rewrite the offending declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FixData {
    /// A modifier keyword can be inserted at the given point.
    InsertModifier {
        /// Zero-width insertion point.
        at: SourceSpan,
        /// Keyword to insert.
        keyword: &'static str,
    },
    /// A variant declaration can be added before the union's closing brace.
    AddVariant {
        /// Zero-width insertion point.
        at: SourceSpan,
        /// Union name including generic parameters.
        union: String,
        /// Declaration kind of the union.
        kind: TypeKind,
    },
    /// An explicit constructor conflicts with the generated one.
    Constructor {
        /// Span of the whole constructor declaration.
        span: SourceSpan,
        /// Annotation that can switch constructor generation off.
        annotation: Annotation,
    },
    /// One or more annotation arguments can be set to a safe value.
    Settings {
        /// Annotation to edit.
        annotation: Annotation,
        /// Alternative values, each offered as its own fix.
        choices: Vec<SettingChoice>,
    },
    /// A declaration's visibility can be widened.
    Visibility {
        /// Span of the existing visibility keyword, if written.
        keyword: Option<SourceSpan>,
        /// Zero-width point where a keyword can be inserted.
        insert_at: SourceSpan,
        /// Keyword to write.
        replacement: &'static str,
    },
}

/// Value an annotation argument can be set to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SettingChoice {
    /// Argument name.
    pub key: &'static str,
    /// Source text of the value.
    pub value: String,
}

impl SettingChoice {
    /// Choice setting `key` to the source text `value`.
    #[must_use]
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// A problem found while validating one declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Stable identifier.
    pub id: DiagnosticId,
    /// Severity, fixed per identifier.
    pub severity: Severity,
    /// Arguments substituted into the message template.
    pub args: Vec<String>,
    /// Primary location.
    pub location: SourceSpan,
    /// Related locations, e.g. the member a duplicate collides with.
    pub additional_locations: Vec<SourceSpan>,
    /// Facts for the paired fixes, when the diagnostic has any.
    pub fix_data: Option<FixData>,
}

impl Diagnostic {
    /// Diagnostic `id` at `location` with message arguments `args`.
    #[must_use]
    pub fn new<I, A>(id: DiagnosticId, location: SourceSpan, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            id,
            severity: id.severity(),
            args: args.into_iter().map(Into::into).collect(),
            location,
            additional_locations: Vec::new(),
            fix_data: None,
        }
    }

    /// Attach fix data.
    #[must_use]
    pub fn with_fix(mut self, data: FixData) -> Self {
        self.fix_data = Some(data);
        self
    }

    /// Attach a related location.
    #[must_use]
    pub fn with_additional(mut self, location: SourceSpan) -> Self {
        self.additional_locations.push(location);
        self
    }

    /// Message with every `{n}` placeholder replaced by its argument.
    #[must_use]
    pub fn message(&self) -> String {
        self.args
            .iter()
            .enumerate()
            .fold(self.id.message_template().to_owned(), |text, (index, arg)| {
                text.replace(&format!("{{{index}}}"), arg)
            })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location,
            self.severity,
            self.id,
            self.message()
        )
    }
}
