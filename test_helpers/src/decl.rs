//! Builders for host declarations.
//!
//! The helpers return plain [`RawDeclaration`] values so tests can refine
//! them with struct update syntax.

use declgen::host::{
    Annotation, AnnotationArgument, ArgumentValue, ContainingType, DeclarationKind, Modifiers,
    RawDeclaration, RawParameter, TypeHandle, Visibility,
};
use declgen::model::{DeclRef, SourceSpan};

/// Annotation called `name` carrying `arguments` in order.
#[must_use]
pub fn annotation(name: &str, arguments: &[(&str, ArgumentValue)]) -> Annotation {
    Annotation {
        arguments: arguments
            .iter()
            .map(|(key, value)| AnnotationArgument {
                key: (*key).to_owned(),
                value: value.clone(),
                value_span: SourceSpan::default(),
            })
            .collect(),
        ..Annotation::new(name)
    }
}

/// Enum-valued annotation argument, e.g. `MatchStrategy.ByDecomposition`.
#[must_use]
pub fn enum_value(text: &str) -> ArgumentValue {
    ArgumentValue::Enum(text.to_owned())
}

/// `Task<inner>`, or the non-generic `Task` when `inner` is `None`.
#[must_use]
pub fn task(inner: Option<&str>) -> TypeHandle {
    match inner {
        Some(ty) => TypeHandle::generic("Task", vec![TypeHandle::named(ty)]),
        None => TypeHandle::named("Task"),
    }
}

/// Public, partial record annotated as a union in `namespace`.
#[must_use]
pub fn union_record(name: &str, namespace: &str, variants: Vec<RawDeclaration>) -> RawDeclaration {
    RawDeclaration {
        name: name.to_owned(),
        kind: DeclarationKind::Record,
        visibility: Some(Visibility::Public),
        namespace: Some(namespace.to_owned()),
        modifiers: Modifiers {
            is_partial: true,
            is_abstract: true,
            ..Modifiers::default()
        },
        annotations: vec![Annotation::new("Union")],
        nested: variants,
        imports: vec!["System".to_owned()],
        location: SourceSpan::new(format!("{name}.cs"), 0, 0),
        ..RawDeclaration::default()
    }
}

/// Public sealed record deriving from `union` with positional `components`.
#[must_use]
pub fn variant_record(name: &str, union: &str, components: &[(&str, &str)]) -> RawDeclaration {
    RawDeclaration {
        name: name.to_owned(),
        kind: DeclarationKind::Record,
        visibility: Some(Visibility::Public),
        modifiers: Modifiers {
            is_sealed: true,
            ..Modifiers::default()
        },
        base_type: Some(TypeHandle::named(union)),
        deconstruction: Some(
            components
                .iter()
                .map(|(n, ty)| RawParameter::new(*n, TypeHandle::named(*ty)))
                .collect(),
        ),
        location: SourceSpan::new(format!("{union}.cs"), 0, 0),
        ..RawDeclaration::default()
    }
}

/// Public instance method on the public class `class`, opted in through an
/// annotation on the class.
#[must_use]
pub fn instance_method(
    class: &str,
    namespace: &str,
    name: &str,
    parameters: Vec<RawParameter>,
    return_type: TypeHandle,
) -> RawDeclaration {
    RawDeclaration {
        name: name.to_owned(),
        kind: DeclarationKind::Method,
        visibility: Some(Visibility::Public),
        namespace: Some(namespace.to_owned()),
        containing: vec![ContainingType {
            name: class.to_owned(),
            visibility: Some(Visibility::Public),
            annotations: vec![Annotation::new("GenerateAsync")],
            ..ContainingType::default()
        }],
        parameters,
        return_type: Some(return_type),
        imports: vec!["System".to_owned()],
        location: SourceSpan::new(format!("{class}.cs"), 0, 0),
        ..RawDeclaration::default()
    }
}

/// Public static extension method on `receiver`, declared in the static
/// class `holder` and annotated directly.
#[must_use]
pub fn extension_method(
    holder: &str,
    namespace: &str,
    name: &str,
    receiver: TypeHandle,
    parameters: Vec<RawParameter>,
    return_type: TypeHandle,
) -> RawDeclaration {
    let this = RawParameter {
        is_this: true,
        ..RawParameter::new("self", receiver)
    };
    RawDeclaration {
        name: name.to_owned(),
        kind: DeclarationKind::Method,
        visibility: Some(Visibility::Public),
        namespace: Some(namespace.to_owned()),
        modifiers: Modifiers {
            is_static: true,
            ..Modifiers::default()
        },
        containing: vec![ContainingType {
            name: holder.to_owned(),
            visibility: Some(Visibility::Public),
            is_static: true,
            ..ContainingType::default()
        }],
        parameters: std::iter::once(this).chain(parameters).collect(),
        return_type: Some(return_type),
        annotations: vec![Annotation::new("GenerateAsync")],
        location: SourceSpan::new(format!("{holder}.cs"), 0, 0),
        ..RawDeclaration::default()
    }
}

/// Assign distinct host identities and increasing locations in slice order.
///
/// Locations only move forward within each file, so declaration order is
/// preserved once grouping sorts by span.
#[must_use]
pub fn numbered(declarations: Vec<RawDeclaration>) -> Vec<RawDeclaration> {
    declarations
        .into_iter()
        .zip(1_u64..)
        .map(|(decl, id)| {
            let start = usize::try_from(id).unwrap_or(usize::MAX).saturating_mul(100);
            RawDeclaration {
                id: DeclRef(id),
                location: SourceSpan::new(decl.location.file.clone(), start, start + 50),
                ..decl
            }
        })
        .collect()
}
