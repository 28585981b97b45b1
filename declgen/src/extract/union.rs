//! Union and variant extraction.

use super::{ExtractionContext, generic_params};
use crate::host::{DeclarationKind, RawDeclaration, Visibility};
use crate::model::{
    Accessibility, Component, DeclarationPart, TypeKind, UnionDescriptor, VariantDescriptor,
};
use crate::settings::UnionSettings;

/// Build a [`UnionDescriptor`] for an annotated class or record.
///
/// Returns `None` when the declaration is not annotated, is not a class or
/// record, has no publishable accessibility, or is nested in another type.
#[must_use]
pub fn extract_union(decl: &RawDeclaration, ctx: &ExtractionContext<'_>) -> Option<UnionDescriptor> {
    let annotation_name = ctx.config.union_annotation.as_str();
    let annotation = decl.annotation(annotation_name)?;
    let Some(kind) = type_kind(decl.kind) else {
        tracing::trace!(name = %decl.name, "union candidate is not a class or record");
        return None;
    };
    let Some(accessibility) = decl.visibility.and_then(Accessibility::from_visibility) else {
        tracing::trace!(name = %decl.name, "union candidate has no publishable accessibility");
        return None;
    };
    if decl.is_nested() {
        tracing::trace!(name = %decl.name, "nested union declarations are not supported");
        return None;
    }

    let variants = decl
        .nested
        .iter()
        .filter(|nested| is_variant_of(nested, &decl.name))
        .map(|nested| variant(nested, ctx))
        .collect();

    Some(UnionDescriptor {
        name: decl.name.clone(),
        accessibility,
        namespace: decl.namespace.clone(),
        kind,
        generics: generic_params(&decl.generics),
        variants,
        parts: parts(decl),
        constructors: decl.constructors.clone(),
        imports: decl.imports.clone(),
        explicit: UnionSettings::from_annotation(annotation),
        enclosing: ctx
            .module_annotation(annotation_name)
            .map(UnionSettings::from_annotation)
            .unwrap_or_default(),
        annotation: Some(annotation.clone()),
        location: decl.location.clone(),
        reference: decl.id,
    })
}

const fn type_kind(kind: DeclarationKind) -> Option<TypeKind> {
    match kind {
        DeclarationKind::Class => Some(TypeKind::Class),
        DeclarationKind::Record => Some(TypeKind::Record),
        _ => None,
    }
}

fn is_variant_of(nested: &RawDeclaration, union_name: &str) -> bool {
    type_kind(nested.kind).is_some()
        && nested
            .base_type
            .as_ref()
            .is_some_and(|base| base.simple_name() == union_name)
}

fn variant(nested: &RawDeclaration, ctx: &ExtractionContext<'_>) -> VariantDescriptor {
    VariantDescriptor {
        name: nested.name.clone(),
        // Nested types without an explicit modifier are private.
        visibility: nested.visibility.unwrap_or(Visibility::Private),
        visibility_span: nested.visibility_span.clone(),
        has_custom_tag: nested.annotation(&ctx.config.tag_annotation).is_some(),
        components: nested.deconstruction.as_ref().map(|params| {
            params
                .iter()
                .map(|p| Component {
                    name: p.name.clone(),
                    ty: p.ty.to_string(),
                })
                .collect()
        }),
        is_sealed: nested.modifiers.is_sealed,
        modifier_offset: nested.modifier_offset,
        location: nested.location.clone(),
    }
}

fn parts(decl: &RawDeclaration) -> Vec<DeclarationPart> {
    if decl.parts.is_empty() {
        return vec![DeclarationPart {
            span: decl.location.clone(),
            is_partial: decl.modifiers.is_partial,
            modifier_offset: decl.modifier_offset,
            body_end: decl.location.end,
        }];
    }
    decl.parts
        .iter()
        .map(|part| DeclarationPart {
            span: part.span.clone(),
            is_partial: part.modifiers.is_partial,
            modifier_offset: part.modifier_offset,
            body_end: part.body_end,
        })
        .collect()
}
