//! Project-wide defaults read from string-keyed build configuration.

use std::collections::BTreeMap;

use figment::value::{Dict, Value};
use figment::{Figment, Provider};
use uncased::{Uncased, UncasedStr};

use super::{AsyncSettings, NamespaceChoice, UnionSettings};
use crate::matching::MatchStrategy;
use crate::model::Accessibility;
use crate::{GenResult, GenResultExt};

/// Recognised project configuration keys.
///
/// Nested tables are flattened with `_`, so `[union] match_strategy` and
/// `union_match_strategy` address the same setting.
pub mod keys {
    /// Default union match strategy (`None`, `ByType`, `ByDecomposition`).
    pub const UNION_MATCH_STRATEGY: &str = "union_match_strategy";
    /// Default for generated union constructors.
    pub const UNION_GENERATE_CONSTRUCTOR: &str = "union_generate_constructor";
    /// Default for variant factory methods.
    pub const UNION_GENERATE_FACTORIES: &str = "union_generate_factories";
    /// Default for implicit conversions.
    pub const UNION_IMPLICIT_CONVERSIONS: &str = "union_implicit_conversions";
    /// Default for serialization tags.
    pub const UNION_SERIALIZATION_TAGS: &str = "union_serialization_tags";
    /// Default extension class naming pattern.
    pub const ASYNC_CLASS_PATTERN: &str = "async_class_pattern";
    /// Default wrapper method naming pattern.
    pub const ASYNC_METHOD_PATTERN: &str = "async_method_pattern";
    /// Default namespace for extension classes.
    pub const ASYNC_NAMESPACE: &str = "async_namespace";
    /// Default extension class accessibility.
    pub const ASYNC_ACCESSIBILITY: &str = "async_accessibility";
    /// Default for `ConfigureAwait(false)`.
    pub const ASYNC_CONFIGURE_AWAIT: &str = "async_configure_await";
}

/// String-keyed project defaults forming the least specific settings tier.
///
/// Keys compare without regard to ASCII case. Empty or unparsable values
/// behave as if the key were absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectDefaults {
    values: BTreeMap<Uncased<'static>, String>,
}

impl ProjectDefaults {
    /// Defaults with no keys set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build defaults from key/value pairs as supplied by a host.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (Uncased::from_owned(k.into()), v.into()))
                .collect(),
        }
    }

    /// Extract defaults from any `figment` provider.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenError::Config`] when the provider fails.
    pub fn from_provider<P: Provider>(provider: P) -> GenResult<Self> {
        Self::from_figment(&Figment::from(provider))
    }

    /// Extract defaults from an assembled [`Figment`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenError::Config`] when extraction fails.
    pub fn from_figment(figment: &Figment) -> GenResult<Self> {
        let raw: Dict = figment.extract().into_gen()?;
        let mut values = BTreeMap::new();
        flatten_into(&mut values, None, raw);
        tracing::debug!(keys = values.len(), "loaded project defaults");
        Ok(Self { values })
    }

    /// Raw text for `key`; empty values are treated as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(UncasedStr::new(key))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Boolean value of `key`; anything but `true`/`false` is absent.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        let value = self.get(key)?;
        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            tracing::trace!(key, value, "ignoring unparsable boolean project setting");
            None
        }
    }

    /// Project tier for union settings.
    #[must_use]
    pub fn union_layer(&self) -> UnionSettings {
        UnionSettings {
            match_strategy: self
                .get(keys::UNION_MATCH_STRATEGY)
                .and_then(MatchStrategy::parse_name),
            generate_constructor: self.flag(keys::UNION_GENERATE_CONSTRUCTOR),
            generate_factories: self.flag(keys::UNION_GENERATE_FACTORIES),
            implicit_conversions: self.flag(keys::UNION_IMPLICIT_CONVERSIONS),
            serialization_tags: self.flag(keys::UNION_SERIALIZATION_TAGS),
        }
    }

    /// Project tier for async-extension settings.
    #[must_use]
    pub fn async_layer(&self) -> AsyncSettings {
        AsyncSettings {
            class_pattern: self.get(keys::ASYNC_CLASS_PATTERN).map(str::to_owned),
            method_pattern: self.get(keys::ASYNC_METHOD_PATTERN).map(str::to_owned),
            namespace: self
                .get(keys::ASYNC_NAMESPACE)
                .map(|ns| NamespaceChoice::Named(ns.to_owned())),
            accessibility: self
                .get(keys::ASYNC_ACCESSIBILITY)
                .and_then(Accessibility::parse_name),
            configure_await: self.flag(keys::ASYNC_CONFIGURE_AWAIT),
        }
    }
}

fn flatten_into(out: &mut BTreeMap<Uncased<'static>, String>, prefix: Option<&str>, dict: Dict) {
    for (key, value) in dict {
        let key = match prefix {
            Some(prefix) => format!("{prefix}_{key}"),
            None => key,
        };
        match value {
            Value::Dict(_, nested) => flatten_into(out, Some(&key), nested),
            Value::String(_, text) => {
                out.insert(Uncased::from_owned(key), text);
            }
            Value::Char(_, ch) => {
                out.insert(Uncased::from_owned(key), ch.to_string());
            }
            Value::Bool(_, flag) => {
                out.insert(Uncased::from_owned(key), flag.to_string());
            }
            _ => tracing::trace!(key = %key, "ignoring non-scalar project setting"),
        }
    }
}
