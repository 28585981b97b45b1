//! Rules for methods selected for async-extension generation.

use super::{Diagnostic, DiagnosticId, FixData, SettingChoice, Severity};
use crate::GenResult;
use crate::grouping::DuplicateMember;
use crate::model::{Accessibility, MethodDescriptor};
use crate::naming::NamePattern;
use crate::settings::async_args as arg;
use crate::settings::{AsyncSettings, ResolvedAsyncSettings, resolve};

/// Outcome of validating one method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedMethod {
    /// Resolved settings after any downgrades.
    pub settings: ResolvedAsyncSettings,
    /// Parsed extension class pattern.
    pub class_pattern: NamePattern,
    /// Formatted wrapper method name.
    pub generated_name: String,
    /// Diagnostics raised, in rule order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether a wrapper is generated for the method.
    pub emit: bool,
}

/// Resolve and validate the settings of `method`.
///
/// # Errors
///
/// Returns [`crate::GenError::InvalidNamePattern`] when the resolved class or
/// method pattern is malformed.
pub fn validate_method(
    method: &MethodDescriptor,
    project: &AsyncSettings,
) -> GenResult<ValidatedMethod> {
    let mut settings = resolve([
        method.explicit.clone(),
        method.enclosing.clone(),
        project.clone(),
    ]);
    let class_pattern = NamePattern::parse(&settings.class_pattern)?;
    let generated_name = NamePattern::parse(&settings.method_pattern)?.format(&method.name);
    let mut diagnostics = Vec::new();

    for parameter in method
        .parameters
        .iter()
        .filter(|p| p.modifier.is_by_reference())
    {
        diagnostics.push(Diagnostic::new(
            DiagnosticId::ByReferenceParameter,
            method.location.clone(),
            [method.name.as_str(), parameter.name.as_str()],
        ));
    }

    if settings.accessibility > method.accessibility {
        let requested = settings.accessibility;
        tracing::warn!(
            method = %method.name,
            %requested,
            "requested accessibility exceeds member accessibility"
        );
        settings.accessibility = Accessibility::Internal;
        let mut diagnostic = Diagnostic::new(
            DiagnosticId::AccessibilityExceedsMember,
            method.location.clone(),
            [
                method.name.clone(),
                requested.to_string(),
                settings.accessibility.to_string(),
            ],
        );
        if let Some(annotation) = &method.annotation {
            diagnostic = diagnostic.with_fix(FixData::Settings {
                annotation: annotation.clone(),
                choices: vec![SettingChoice::new(
                    arg::ACCESSIBILITY,
                    "Accessibility.Internal",
                )],
            });
        }
        diagnostics.push(diagnostic);
    }

    let emit = diagnostics.iter().all(|d| d.severity != Severity::Error);
    Ok(ValidatedMethod {
        settings,
        class_pattern,
        generated_name,
        diagnostics,
        emit,
    })
}

/// Warning for a member dropped because an earlier one generates the same
/// wrapper.
#[must_use]
pub fn duplicate_member(duplicate: &DuplicateMember) -> Diagnostic {
    Diagnostic::new(
        DiagnosticId::DuplicateMember,
        duplicate.dropped.method.location.clone(),
        [
            duplicate.dropped.method.name.as_str(),
            duplicate.dropped.generated_name.as_str(),
            duplicate.unit.as_str(),
        ],
    )
    .with_additional(duplicate.kept.clone())
}
