//! Method extraction for the async-extension family.

use super::{ExtractionContext, detect_return_shape, generic_params};
use crate::host::{DeclarationKind, RawDeclaration, RawParameter};
use crate::model::{Accessibility, MethodDescriptor, Parameter};
use crate::settings::AsyncSettings;

/// Build a [`MethodDescriptor`] for a method opted into async extensions.
///
/// A method opts in through its own annotation or one on its containing
/// type. Returns `None` for non-methods, static methods that are not
/// extension methods, methods without a containing type, and methods whose
/// own or containing accessibility cannot be published.
#[must_use]
pub fn extract_method(decl: &RawDeclaration, ctx: &ExtractionContext<'_>) -> Option<MethodDescriptor> {
    if decl.kind != DeclarationKind::Method {
        return None;
    }
    let annotation_name = ctx.config.async_annotation.as_str();
    let containing = decl.containing_type()?;
    let explicit = decl.annotation(annotation_name);
    let enclosing = containing.annotations.iter().find(|a| a.is_named(annotation_name));
    if explicit.is_none() && enclosing.is_none() {
        return None;
    }

    let own = decl.visibility.and_then(Accessibility::from_visibility);
    let outer = containing.visibility.and_then(Accessibility::from_visibility);
    let (Some(own), Some(outer)) = (own, outer) else {
        tracing::trace!(name = %decl.name, "method has no publishable accessibility");
        return None;
    };

    let is_extension =
        decl.modifiers.is_static && decl.parameters.first().is_some_and(|p| p.is_this);
    if decl.modifiers.is_static && !is_extension {
        tracing::trace!(name = %decl.name, "static non-extension methods have no receiver");
        return None;
    }

    let (receiver, receiver_name, forwarded, generics) = if is_extension {
        let (this, rest) = decl.parameters.split_first()?;
        (
            this.ty.to_string(),
            this.ty.simple_name().to_owned(),
            rest,
            generic_params(&decl.generics),
        )
    } else {
        let ty = containing.as_type();
        let mut generics = generic_params(&containing.generics);
        generics.extend(generic_params(&decl.generics));
        (
            ty.to_string(),
            containing.name.clone(),
            decl.parameters.as_slice(),
            generics,
        )
    };

    Some(MethodDescriptor {
        name: decl.name.clone(),
        accessibility: own.min(outer),
        receiver_name,
        receiver,
        is_extension,
        namespace: decl.namespace.clone(),
        generics,
        parameters: forwarded.iter().map(parameter).collect(),
        return_shape: detect_return_shape(decl.return_type.as_ref(), &ctx.config.wrapper_shapes),
        imports: decl.imports.clone(),
        explicit: explicit.map(AsyncSettings::from_annotation).unwrap_or_default(),
        enclosing: enclosing.map(AsyncSettings::from_annotation).unwrap_or_default(),
        annotation: explicit.cloned(),
        location: decl.location.clone(),
        reference: decl.id,
    })
}

fn parameter(raw: &RawParameter) -> Parameter {
    Parameter {
        name: raw.name.clone(),
        ty: raw.ty.to_string(),
        modifier: raw.modifier,
        default_value: raw.default_value.clone(),
    }
}
