//! Immutable descriptors produced by the extractor.
//!
//! Every type in this module is a plain value compared structurally. Two
//! descriptors are equal when all of their fields are equal; the only field
//! exempt from that rule is [`DeclRef`], which exists to re-resolve type
//! information at render time and never participates in identity.

mod accessibility;
mod descriptor;
mod location;

pub use accessibility::Accessibility;
pub use descriptor::{
    Component, DeclRef, DeclarationPart, GenericParam, MemberSignature, MethodDescriptor,
    Parameter, ParameterModifier, ReturnShape, TypeKind, UnionDescriptor, VariantDescriptor,
};
pub use location::SourceSpan;
