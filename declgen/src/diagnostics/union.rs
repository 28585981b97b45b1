//! Rules for union declarations.

use super::{Diagnostic, DiagnosticId, FixData, SettingChoice, Severity};
use crate::host::SymbolModel;
use crate::matching::MatchStrategy;
use crate::model::{Accessibility, UnionDescriptor, VariantDescriptor};
use crate::pipeline::GeneratorConfig;
use crate::settings::union_args as arg;
use crate::settings::{ResolvedUnionSettings, UnionSettings, resolve};

/// Outcome of validating one union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedUnion {
    /// Resolved settings after any downgrades.
    pub settings: ResolvedUnionSettings,
    /// Diagnostics raised, in rule order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the union is emitted at all.
    pub emit: bool,
}

/// Resolve and validate the settings of `union`.
///
/// `project` is the project-wide tier. Errors stop the union from being
/// emitted; warnings downgrade the affected setting.
#[must_use]
pub fn validate_union<S>(
    union: &UnionDescriptor,
    project: &UnionSettings,
    config: &GeneratorConfig,
    symbols: &S,
) -> ValidatedUnion
where
    S: SymbolModel + ?Sized,
{
    let mut settings = resolve([
        union.explicit.clone(),
        union.enclosing.clone(),
        project.clone(),
    ]);
    let mut diagnostics = Vec::new();
    let name = union.display_name();

    for part in union.parts.iter().filter(|p| !p.is_partial) {
        diagnostics.push(
            Diagnostic::new(DiagnosticId::UnionNotPartial, part.span.clone(), [name.as_str()])
                .with_fix(FixData::InsertModifier {
                    at: part.span.point(part.modifier_offset),
                    keyword: "partial",
                }),
        );
    }

    if union.variants.is_empty() {
        let body_end = union
            .parts
            .first()
            .map_or(union.location.end, |p| p.body_end);
        diagnostics.push(
            Diagnostic::new(
                DiagnosticId::UnionHasNoVariants,
                union.location.clone(),
                [name.as_str()],
            )
            .with_fix(FixData::AddVariant {
                at: union.location.point(body_end),
                union: name.clone(),
                kind: union.kind,
            }),
        );
    }

    let annotation = union.annotation.clone().unwrap_or_default();
    let annotation_span = union
        .annotation
        .as_ref()
        .map_or_else(|| union.location.clone(), |a| a.span.clone());

    if settings.generate_constructor && !union.constructors.is_empty() {
        tracing::warn!(union = %name, "explicit constructor found; disabling generated constructor");
        settings.generate_constructor = false;
        for span in &union.constructors {
            diagnostics.push(
                Diagnostic::new(DiagnosticId::ConstructorConflict, span.clone(), [name.as_str()])
                    .with_fix(FixData::Constructor {
                        span: span.clone(),
                        annotation: annotation.clone(),
                    }),
            );
        }
    }

    if settings.serialization_tags && !symbols.has_type(&config.serialization_tag_type) {
        tracing::warn!(union = %name, "serialization tag type unavailable; disabling tags");
        settings.serialization_tags = false;
        diagnostics.push(
            Diagnostic::new(
                DiagnosticId::SerializationTagUnavailable,
                annotation_span.clone(),
                [name.as_str(), config.serialization_tag_type.as_str()],
            )
            .with_fix(FixData::Settings {
                annotation: annotation.clone(),
                choices: vec![SettingChoice::new(arg::SERIALIZATION_TAGS, "false")],
            }),
        );
    }

    let level = symbols.language_level();
    let strategy = settings.match_strategy;
    if let Some(required) = strategy.required_level().filter(|r| level < *r) {
        tracing::warn!(
            union = %name,
            strategy = strategy.name(),
            %level,
            "match strategy unsupported; disabling matching"
        );
        settings.match_strategy = MatchStrategy::None;
        let mut choices = vec![strategy_choice(MatchStrategy::None)];
        if strategy != MatchStrategy::ByType && MatchStrategy::ByType.is_supported_at(level) {
            choices.push(strategy_choice(MatchStrategy::ByType));
        }
        diagnostics.push(
            Diagnostic::new(
                DiagnosticId::StrategyUnsupported,
                annotation_span,
                [
                    strategy.name().to_owned(),
                    required.to_string(),
                    level.to_string(),
                ],
            )
            .with_fix(FixData::Settings {
                annotation,
                choices,
            }),
        );
    }

    for variant in &union.variants {
        if is_below(variant, union.accessibility) {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticId::VariantNotPublishable,
                    variant.location.clone(),
                    [variant.name.as_str(), name.as_str()],
                )
                .with_fix(FixData::Visibility {
                    keyword: variant.visibility_span.clone(),
                    insert_at: variant.location.point(variant.modifier_offset),
                    replacement: union.accessibility.keyword(),
                }),
            );
        }
        if !variant.is_sealed {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticId::VariantNotSealed,
                    variant.location.clone(),
                    [variant.name.as_str()],
                )
                .with_fix(FixData::InsertModifier {
                    at: variant.location.point(variant.modifier_offset),
                    keyword: "sealed",
                }),
            );
        }
    }

    let emit = !diagnostics
        .iter()
        .any(|d| d.severity == Severity::Error);
    tracing::trace!(union = %name, diagnostics = diagnostics.len(), emit, "validated union");
    ValidatedUnion {
        settings,
        diagnostics,
        emit,
    }
}

fn strategy_choice(strategy: MatchStrategy) -> SettingChoice {
    SettingChoice::new(
        arg::MATCH_STRATEGY,
        format!("MatchStrategy.{}", strategy.name()),
    )
}

fn is_below(variant: &VariantDescriptor, union: Accessibility) -> bool {
    variant.accessibility().is_none_or(|tier| tier < union)
}
