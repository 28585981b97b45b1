//! Settings for the async-extension generator family.

use serde::Serialize;

use super::settings_layer;
use crate::host::Annotation;
use crate::model::Accessibility;

/// Namespace the generated extension class is emitted into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum NamespaceChoice {
    /// Use the namespace of the source declaration.
    #[default]
    Inherit,
    /// Use the named namespace; an empty name means the global namespace.
    Named(String),
}

impl NamespaceChoice {
    /// Apply the choice to the declaration namespace `declared`.
    #[must_use]
    pub fn apply(&self, declared: Option<&str>) -> Option<String> {
        match self {
            Self::Inherit => declared.map(str::to_owned),
            Self::Named(name) if name.is_empty() => None,
            Self::Named(name) => Some(name.clone()),
        }
    }
}

settings_layer! {
    /// One tier of async-extension settings.
    pub struct AsyncSettings => ResolvedAsyncSettings {
        /// Pattern producing the extension class name from the type name.
        class_pattern: String = String::from("{0}AsyncExtensions"),
        /// Pattern producing the wrapper name from the method name.
        method_pattern: String = String::from("{0}Async"),
        /// Namespace of the generated class.
        namespace: NamespaceChoice = NamespaceChoice::Inherit,
        /// Requested accessibility of the generated class.
        accessibility: Accessibility = Accessibility::Public,
        /// Await with `ConfigureAwait(false)`.
        configure_await: bool = true,
    }
}

/// Annotation argument names recognised on async annotations.
pub(crate) mod arg {
    pub const CLASS_NAME: &str = "ClassName";
    pub const METHOD_NAME: &str = "MethodName";
    pub const NAMESPACE: &str = "Namespace";
    pub const ACCESSIBILITY: &str = "Accessibility";
    pub const CONFIGURE_AWAIT: &str = "ConfigureAwait";
}

impl AsyncSettings {
    /// Read the layer from an annotation's named arguments.
    ///
    /// An empty but present string is kept: it is a deliberate value, not an
    /// absent one.
    #[must_use]
    pub fn from_annotation(annotation: &Annotation) -> Self {
        let text = |key: &str| {
            annotation
                .argument(key)
                .and_then(|a| a.value.as_str())
                .map(str::to_owned)
        };
        Self {
            class_pattern: text(arg::CLASS_NAME),
            method_pattern: text(arg::METHOD_NAME),
            namespace: text(arg::NAMESPACE).map(NamespaceChoice::Named),
            accessibility: annotation
                .argument(arg::ACCESSIBILITY)
                .and_then(|a| a.value.as_enum_name())
                .and_then(Accessibility::parse_name),
            configure_await: annotation
                .argument(arg::CONFIGURE_AWAIT)
                .and_then(|a| a.value.as_bool()),
        }
    }
}
