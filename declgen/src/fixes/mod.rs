//! Automated fixes paired with diagnostics.
//!
//! A fix is a pure list of [`TextEdit`]s computed from a diagnostic's
//! [`FixData`]. Fixes never re-run validation; applying one simply rewrites
//! text, and the next generation pass re-validates the result.

mod edit;

pub use edit::{TextEdit, apply_edits};

use camino::Utf8Path;

use crate::GenResult;
use crate::diagnostics::{Diagnostic, DiagnosticId, FixData, SettingChoice};
use crate::host::Annotation;
use crate::model::TypeKind;
use crate::settings::union_args;

/// Name given to the variant inserted by the stub-variant fix.
pub const STUB_VARIANT: &str = "Variant";

/// One automated fix for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fix {
    /// Diagnostic the fix answers.
    pub diagnostic: DiagnosticId,
    /// Human-readable title.
    pub title: String,
    /// Edits making up the fix.
    pub edits: Vec<TextEdit>,
}

impl Fix {
    fn new(diagnostic: DiagnosticId, title: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        Self {
            diagnostic,
            title: title.into(),
            edits,
        }
    }

    /// Apply the fix to the text of `file`.
    ///
    /// # Errors
    ///
    /// Fails when an edit does not fit `source`; see [`apply_edits`].
    pub fn apply(&self, file: &Utf8Path, source: &str) -> GenResult<String> {
        apply_edits(&self.edits, file, source)
    }
}

/// Every fix offered for `diagnostic`, in preference order.
#[must_use]
pub fn suggest(diagnostic: &Diagnostic) -> Vec<Fix> {
    let id = diagnostic.id;
    let Some(data) = &diagnostic.fix_data else {
        return Vec::new();
    };
    match data {
        FixData::InsertModifier { at, keyword } => vec![Fix::new(
            id,
            format!("Add '{keyword}' modifier"),
            vec![TextEdit::insert(at.clone(), format!("{keyword} "))],
        )],
        FixData::AddVariant { at, union, kind } => vec![Fix::new(
            id,
            format!("Add a variant to '{union}'"),
            vec![TextEdit::insert(at.clone(), stub_variant(union, *kind))],
        )],
        FixData::Constructor { span, annotation } => vec![
            Fix::new(
                id,
                "Remove explicit constructor",
                vec![TextEdit::delete(span.clone())],
            ),
            Fix::new(
                id,
                "Disable generated constructor",
                vec![set_argument(
                    annotation,
                    &SettingChoice::new(union_args::GENERATE_CONSTRUCTOR, "false"),
                )],
            ),
        ],
        FixData::Settings {
            annotation,
            choices,
        } => choices
            .iter()
            .map(|choice| {
                Fix::new(
                    id,
                    format!("Set {} to {}", choice.key, choice.value),
                    vec![set_argument(annotation, choice)],
                )
            })
            .collect(),
        FixData::Visibility {
            keyword,
            insert_at,
            replacement,
        } => {
            let edit = match keyword {
                Some(span) => TextEdit::replace(span.clone(), *replacement),
                None => TextEdit::insert(insert_at.clone(), format!("{replacement} ")),
            };
            vec![Fix::new(id, format!("Make declaration {replacement}"), vec![edit])]
        }
    }
}

fn stub_variant(union: &str, kind: TypeKind) -> String {
    match kind {
        TypeKind::Record => format!("    public sealed record {STUB_VARIANT} : {union};\n"),
        TypeKind::Class => format!("    public sealed class {STUB_VARIANT} : {union} {{ }}\n"),
    }
}

/// Edit setting `choice.key` on `annotation`.
///
/// An existing argument has its value replaced. Otherwise the argument is
/// appended to the argument list, which is created when absent.
fn set_argument(annotation: &Annotation, choice: &SettingChoice) -> TextEdit {
    if let Some(existing) = annotation.argument(choice.key) {
        return TextEdit::replace(existing.value_span.clone(), choice.value.as_str());
    }
    let assignment = format!("{} = {}", choice.key, choice.value);
    match &annotation.arguments_span {
        Some(list) => {
            let at = list.point(list.end.saturating_sub(1));
            if annotation.arguments.is_empty() {
                TextEdit::insert(at, assignment)
            } else {
                TextEdit::insert(at, format!(", {assignment}"))
            }
        }
        None => TextEdit::insert(
            annotation.span.point(annotation.span.end),
            format!("({assignment})"),
        ),
    }
}
