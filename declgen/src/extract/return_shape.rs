//! Structural detection of asynchronous wrapper return types.

use crate::host::TypeHandle;
use crate::model::ReturnShape;

/// Classify a declared return type.
///
/// A type whose simple name matches one of `wrapper_shapes` and that carries
/// exactly one type argument is `Wrapped` with that argument as the inner
/// type. The non-generic form of a wrapper is `Wrapped` without an inner
/// type. Every other type is recorded unchanged as `Plain`.
#[must_use]
pub fn detect_return_shape(return_type: Option<&TypeHandle>, wrapper_shapes: &[String]) -> ReturnShape {
    let Some(ty) = return_type else {
        return ReturnShape::Void;
    };
    if ty.name == "void" {
        return ReturnShape::Void;
    }
    let is_wrapper = wrapper_shapes
        .iter()
        .any(|shape| TypeHandle::named(shape.as_str()).simple_name() == ty.simple_name());
    match (is_wrapper, ty.arguments.as_slice()) {
        (true, [inner]) => ReturnShape::Wrapped {
            wrapper: ty.name.clone(),
            inner: Some(inner.to_string()),
        },
        (true, []) => ReturnShape::Wrapped {
            wrapper: ty.name.clone(),
            inner: None,
        },
        _ => ReturnShape::Plain(ty.to_string()),
    }
}
