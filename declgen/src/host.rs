//! Boundary types for the host compiler's declaration model.
//!
//! The host resolves declarations before the engine runs and hands them over
//! as [`RawDeclaration`] values. Anything the pipeline still needs from the
//! host afterwards (language level, type availability, qualified names) goes
//! through the narrow [`SymbolModel`] trait. Pipeline logic never compares
//! host symbols; it compares descriptors.

use std::fmt;

use serde::Serialize;

use crate::model::{DeclRef, ParameterModifier, SourceSpan};

/// Visibility exactly as declared in the host program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    /// `public`
    #[default]
    Public,
    /// `internal`
    Internal,
    /// `protected internal`
    ProtectedInternal,
    /// `protected`
    Protected,
    /// `private protected`
    PrivateProtected,
    /// `private`
    Private,
}

/// Kind of a host declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A class type.
    Class,
    /// A record type.
    Record,
    /// A value type.
    Struct,
    /// An interface.
    Interface,
    /// A method.
    Method,
    /// A property.
    Property,
    /// Anything else.
    #[default]
    Other,
}

/// Declaration modifiers relevant to generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// `static`
    pub is_static: bool,
    /// `partial`
    pub is_partial: bool,
    /// `sealed`
    pub is_sealed: bool,
    /// `abstract`
    pub is_abstract: bool,
}

/// Opaque, renderable reference to a type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeHandle {
    /// Type name without type arguments, possibly namespace-qualified.
    pub name: String,
    /// Type arguments in order.
    pub arguments: Vec<TypeHandle>,
}

impl TypeHandle {
    /// Non-generic type handle.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Generic type handle with `arguments`.
    #[must_use]
    pub fn generic(name: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Name with any namespace qualification and `global::` alias removed.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let unaliased = self.name.rsplit("::").next().unwrap_or(&self.name);
        unaliased.rsplit('.').next().unwrap_or(unaliased)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (index, argument) in self.arguments.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str(">")
    }
}

/// Method or constructor parameter as declared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeHandle,
    /// Passing convention.
    pub modifier: ParameterModifier,
    /// Whether this is the receiver of an extension method.
    pub is_this: bool,
    /// Rendered default value, if any.
    pub default_value: Option<String>,
}

impl RawParameter {
    /// By-value parameter of type `ty`.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeHandle) -> Self {
        Self {
            name: name.into(),
            ty,
            ..Self::default()
        }
    }
}

/// Generic parameter as declared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawGenericParam {
    /// Parameter name.
    pub name: String,
    /// Constraint clauses in declaration order.
    pub constraints: Vec<String>,
}

/// Loosely typed annotation argument value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentValue {
    /// Boolean literal.
    Bool(bool),
    /// String literal.
    Str(String),
    /// Enum member access, e.g. `MatchStrategy.ByType`.
    Enum(String),
    /// Integer literal.
    Int(i64),
}

impl ArgumentValue {
    /// Boolean payload, if the argument is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// String payload, if the argument is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Enum member name, accepting string literals for hosts that lower
    /// enum arguments to text.
    #[must_use]
    pub fn as_enum_name(&self) -> Option<&str> {
        match self {
            Self::Enum(value) | Self::Str(value) => {
                Some(value.rsplit('.').next().unwrap_or(value))
            }
            _ => None,
        }
    }
}

/// Named argument of an annotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationArgument {
    /// Argument name.
    pub key: String,
    /// Argument value.
    pub value: ArgumentValue,
    /// Span of the value expression.
    pub value_span: SourceSpan,
}

/// Annotation applied to a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Annotation {
    /// Annotation name without any `Attribute` suffix.
    pub name: String,
    /// Span of the annotation name and argument list, excluding any
    /// surrounding brackets.
    pub span: SourceSpan,
    /// Span of the parenthesised argument list, parentheses included.
    pub arguments_span: Option<SourceSpan>,
    /// Named arguments in source order.
    pub arguments: Vec<AnnotationArgument>,
}

impl Annotation {
    /// Annotation named `name` without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the annotation is called `name`, allowing an `Attribute`
    /// suffix and namespace qualification.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        let last = self.name.rsplit('.').next().unwrap_or(&self.name);
        last.strip_suffix("Attribute").unwrap_or(last) == name
    }

    /// Look up an argument by key, ignoring ASCII case.
    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&AnnotationArgument> {
        self.arguments
            .iter()
            .find(|arg| arg.key.eq_ignore_ascii_case(key))
    }
}

/// One type in the chain of types enclosing a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContainingType {
    /// Type name.
    pub name: String,
    /// Declared visibility.
    pub visibility: Option<Visibility>,
    /// Generic parameters.
    pub generics: Vec<RawGenericParam>,
    /// Annotations applied to the type.
    pub annotations: Vec<Annotation>,
    /// Whether the type is static.
    pub is_static: bool,
}

impl ContainingType {
    /// Type reference rendered with its generic parameters.
    #[must_use]
    pub fn as_type(&self) -> TypeHandle {
        TypeHandle::generic(
            self.name.clone(),
            self.generics
                .iter()
                .map(|g| TypeHandle::named(g.name.clone()))
                .collect(),
        )
    }
}

/// Part of a split declaration as reported by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawPart {
    /// Span of the part's header.
    pub span: SourceSpan,
    /// Modifiers written on this part.
    pub modifiers: Modifiers,
    /// Offset at which modifiers can be inserted.
    pub modifier_offset: usize,
    /// Offset of the closing brace.
    pub body_end: usize,
}

/// Already-resolved declaration metadata supplied by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawDeclaration {
    /// Host identity.
    pub id: DeclRef,
    /// Declared name.
    pub name: String,
    /// Declaration kind.
    pub kind: DeclarationKind,
    /// Declared visibility, if the host could resolve one.
    pub visibility: Option<Visibility>,
    /// Span of the visibility keyword, when written explicitly.
    pub visibility_span: Option<SourceSpan>,
    /// Modifiers, merged across parts.
    pub modifiers: Modifiers,
    /// Offset at which modifiers can be inserted on the primary part.
    pub modifier_offset: usize,
    /// Declaring namespace.
    pub namespace: Option<String>,
    /// Enclosing types, outermost first.
    pub containing: Vec<ContainingType>,
    /// Generic parameters.
    pub generics: Vec<RawGenericParam>,
    /// Parameters, for methods.
    pub parameters: Vec<RawParameter>,
    /// Declared return type, for methods.
    pub return_type: Option<TypeHandle>,
    /// Declared base type, for types.
    pub base_type: Option<TypeHandle>,
    /// Applied annotations.
    pub annotations: Vec<Annotation>,
    /// Nested type declarations, in declaration order.
    pub nested: Vec<RawDeclaration>,
    /// Spans of explicit constructors.
    pub constructors: Vec<SourceSpan>,
    /// Deconstruction signature (primary constructor parameters).
    pub deconstruction: Option<Vec<RawParameter>>,
    /// Imports visible at the declaration site.
    pub imports: Vec<String>,
    /// Parts of a split declaration; empty means a single part at
    /// [`RawDeclaration::location`].
    pub parts: Vec<RawPart>,
    /// Primary location.
    pub location: SourceSpan,
}

impl RawDeclaration {
    /// First annotation called `name`.
    #[must_use]
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.is_named(name))
    }

    /// Innermost enclosing type.
    #[must_use]
    pub fn containing_type(&self) -> Option<&ContainingType> {
        self.containing.last()
    }

    /// Whether the declaration is nested inside another type.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.containing.is_empty()
    }
}

/// Language level of the generated target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LanguageLevel {
    /// Major version.
    pub major: u16,
    /// Minor version.
    pub minor: u16,
}

impl LanguageLevel {
    /// Level introducing type patterns.
    pub const TYPE_PATTERNS: Self = Self::new(7, 0);
    /// Level introducing positional (deconstruction) patterns.
    pub const POSITIONAL_PATTERNS: Self = Self::new(8, 0);
    /// Newest level the engine knows about.
    pub const LATEST: Self = Self::new(12, 0);

    /// Construct a level.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl Default for LanguageLevel {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Queries the pipeline still needs from the host after extraction.
pub trait SymbolModel: Sync {
    /// Configured language level of the compilation.
    fn language_level(&self) -> LanguageLevel;

    /// Whether the referenced libraries define the type `metadata_name`.
    fn has_type(&self, metadata_name: &str) -> bool;

    /// Fully qualified name of the declaration behind `reference`.
    ///
    /// Only consulted while rendering; returning `None` makes the renderer
    /// fall back to the descriptor's own names.
    fn qualified_name(&self, reference: DeclRef) -> Option<String>;
}
