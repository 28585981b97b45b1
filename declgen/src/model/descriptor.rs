//! Declaration, variant and member descriptors.

use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::{Accessibility, SourceSpan};
use crate::host::{Annotation, Visibility};
use crate::settings::{AsyncSettings, UnionSettings};

/// Stable handle back to the host declaration a descriptor was built from.
///
/// The handle is only used to re-resolve type information at render time.
/// It compares equal to every other handle and hashes to nothing, so it
/// never affects descriptor equality or incremental caching.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct DeclRef(pub u64);

impl PartialEq for DeclRef {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for DeclRef {}

impl Hash for DeclRef {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

/// Generic parameter with its optional constraint clause.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GenericParam {
    /// Parameter name, e.g. `T`.
    pub name: String,
    /// Rendered constraint list, e.g. `class, new()`.
    pub constraint: Option<String>,
}

/// How an argument is passed to a method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterModifier {
    /// Passed by value.
    #[default]
    None,
    /// Passed by mutable reference.
    Ref,
    /// Output parameter.
    Out,
    /// Passed by read-only reference.
    In,
    /// Variadic trailing array.
    Params,
}

impl ParameterModifier {
    /// Keyword written before the parameter type, if any.
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ref => Some("ref"),
            Self::Out => Some("out"),
            Self::In => Some("in"),
            Self::Params => Some("params"),
        }
    }

    /// Returns `true` when the argument is an alias of caller storage.
    ///
    /// Such arguments cannot be captured across an await point.
    #[must_use]
    pub const fn is_by_reference(self) -> bool {
        matches!(self, Self::Ref | Self::Out | Self::In)
    }
}

/// One forwarded method parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Rendered parameter type.
    pub ty: String,
    /// Passing convention.
    pub modifier: ParameterModifier,
    /// Rendered default value expression, if the parameter is optional.
    pub default_value: Option<String>,
}

/// Shape of a method's declared return type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ReturnShape {
    /// The method returns nothing.
    #[default]
    Void,
    /// The method returns a plain value of the rendered type.
    Plain(String),
    /// The method returns an asynchronous wrapper.
    Wrapped {
        /// Rendered wrapper type name without arguments, e.g. `Task`.
        wrapper: String,
        /// Wrapped value type; `None` for the non-generic wrapper.
        inner: Option<String>,
    },
}

impl ReturnShape {
    /// Returns `true` when the declared return type is an async wrapper.
    #[must_use]
    pub const fn returns_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped { .. })
    }

    /// Type produced once the call (and any wrapper) has completed.
    #[must_use]
    pub fn result_type(&self) -> Option<&str> {
        match self {
            Self::Void | Self::Wrapped { inner: None, .. } => None,
            Self::Plain(ty) | Self::Wrapped { inner: Some(ty), .. } => Some(ty),
        }
    }
}

/// Kind of a type declaration accepted as a union.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    /// Reference type declared as a class.
    Class,
    /// Reference type declared as a record.
    #[default]
    Record,
}

impl TypeKind {
    /// Declaration keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Record => "record",
        }
    }
}

/// One part of a declaration that may be split across several files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DeclarationPart {
    /// Span of the part's header.
    pub span: SourceSpan,
    /// Whether the part carries the `partial` modifier.
    pub is_partial: bool,
    /// Offset at which modifiers such as `partial` can be inserted.
    pub modifier_offset: usize,
    /// Offset of the part's closing brace.
    pub body_end: usize,
}

/// Named component of a decomposable variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Component {
    /// Component name as declared.
    pub name: String,
    /// Rendered component type.
    pub ty: String,
}

/// One alternative of a tagged union.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct VariantDescriptor {
    /// Variant type name.
    pub name: String,
    /// Declared host visibility.
    pub visibility: Visibility,
    /// Span of the visibility keyword, when written explicitly.
    pub visibility_span: Option<SourceSpan>,
    /// The variant already carries its own serialization tag.
    pub has_custom_tag: bool,
    /// Ordered deconstruction signature, if the variant declares one.
    pub components: Option<Vec<Component>>,
    /// Whether the variant is sealed.
    pub is_sealed: bool,
    /// Offset at which modifiers can be inserted.
    pub modifier_offset: usize,
    /// Span of the variant declaration header.
    pub location: SourceSpan,
}

impl VariantDescriptor {
    /// Components used when decomposing the variant; empty when undeclared.
    #[must_use]
    pub fn components_or_empty(&self) -> &[Component] {
        self.components.as_deref().unwrap_or_default()
    }

    /// Publishable tier of the variant, if any.
    #[must_use]
    pub const fn accessibility(&self) -> Option<Accessibility> {
        Accessibility::from_visibility(self.visibility)
    }
}

/// Descriptor of a union declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UnionDescriptor {
    /// Union type name.
    pub name: String,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Declaring namespace; `None` for the global namespace.
    pub namespace: Option<String>,
    /// Class or record.
    pub kind: TypeKind,
    /// Generic parameters of the union.
    pub generics: Vec<GenericParam>,
    /// Variants in declaration order.
    pub variants: Vec<VariantDescriptor>,
    /// Declaration parts, in host order.
    pub parts: Vec<DeclarationPart>,
    /// Spans of explicitly declared constructors.
    pub constructors: Vec<SourceSpan>,
    /// Imports visible at the declaration site.
    pub imports: Vec<String>,
    /// Explicit annotation layer.
    pub explicit: UnionSettings,
    /// Enclosing (module-level) annotation layer.
    pub enclosing: UnionSettings,
    /// Annotation the explicit layer was read from.
    pub annotation: Option<Annotation>,
    /// Primary location of the declaration.
    pub location: SourceSpan,
    /// Handle back to the host declaration.
    pub reference: DeclRef,
}

impl UnionDescriptor {
    /// Name including the generic parameter list, e.g. `Result<T, E>`.
    #[must_use]
    pub fn display_name(&self) -> String {
        with_generics(&self.name, &self.generics)
    }
}

/// Descriptor of a method selected for async-extension generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Effective accessibility: the method's own tier capped by its type's.
    pub accessibility: Accessibility,
    /// Simple name of the receiver type; extension classes are named after it.
    pub receiver_name: String,
    /// Rendered receiver type the generated wrapper awaits.
    pub receiver: String,
    /// Whether the source method is an extension method.
    pub is_extension: bool,
    /// Declaring namespace; `None` for the global namespace.
    pub namespace: Option<String>,
    /// Generic parameters of the generated wrapper.
    pub generics: Vec<GenericParam>,
    /// Forwarded parameters, excluding any extension receiver.
    pub parameters: Vec<Parameter>,
    /// Return shape of the source method.
    pub return_shape: ReturnShape,
    /// Imports visible at the declaration site.
    pub imports: Vec<String>,
    /// Explicit annotation layer.
    pub explicit: AsyncSettings,
    /// Enclosing-type annotation layer.
    pub enclosing: AsyncSettings,
    /// Annotation the explicit layer was read from.
    pub annotation: Option<Annotation>,
    /// Primary location of the declaration.
    pub location: SourceSpan,
    /// Handle back to the host declaration.
    pub reference: DeclRef,
}

impl MethodDescriptor {
    /// Overload identity of the generated wrapper.
    #[must_use]
    pub fn signature(&self) -> MemberSignature<'_> {
        let receiver = match (&self.namespace, self.is_extension) {
            (Some(ns), false) => format!("{ns}.{}", self.receiver),
            _ => self.receiver.clone(),
        };
        MemberSignature {
            receiver,
            generic_arity: self.generics.len(),
            parameters: self.parameters.iter().map(|p| p.ty.as_str()).collect(),
        }
    }
}

/// What distinguishes two wrappers of the same name in one extension class.
///
/// Instance receivers are qualified with the declaring namespace; extension
/// receivers keep the type text the host reported.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberSignature<'a> {
    /// Receiver type awaited by the wrapper.
    pub receiver: String,
    /// Number of generic parameters on the wrapper.
    pub generic_arity: usize,
    /// Forwarded parameter types in order.
    pub parameters: Vec<&'a str>,
}

pub(crate) fn with_generics(name: &str, generics: &[GenericParam]) -> String {
    if generics.is_empty() {
        return name.to_owned();
    }
    let list: Vec<&str> = generics.iter().map(|g| g.name.as_str()).collect();
    format!("{name}<{}>", list.join(", "))
}
