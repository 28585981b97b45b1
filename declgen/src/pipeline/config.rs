//! Generator configuration.

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{GenResult, GenResultExt};

/// Names and conventions the generator recognises in the host program.
///
/// Every field has a default, so partial configuration files are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Annotation marking a union declaration.
    pub union_annotation: String,
    /// Annotation opting methods or types into async extensions.
    pub async_annotation: String,
    /// Annotation a variant uses to declare its own serialization tag.
    pub tag_annotation: String,
    /// Metadata name of the serialization tag attribute type.
    pub serialization_tag_type: String,
    /// Simple names of asynchronous wrapper types.
    pub wrapper_shapes: Vec<String>,
    /// Fully qualified wrapper the generated extensions accept as receiver.
    pub receiver_wrapper: String,
    /// Extension appended to generated hint names.
    pub output_extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            union_annotation: "Union".to_owned(),
            async_annotation: "GenerateAsync".to_owned(),
            tag_annotation: "UnionTag".to_owned(),
            serialization_tag_type: "System.Text.Json.Serialization.JsonDerivedTypeAttribute"
                .to_owned(),
            wrapper_shapes: vec!["Task".to_owned(), "ValueTask".to_owned()],
            receiver_wrapper: "global::System.Threading.Tasks.Task".to_owned(),
            output_extension: ".g.cs".to_owned(),
        }
    }
}

impl GeneratorConfig {
    /// Extract the configuration from `figment`, filling absent keys from
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenError::Config`] when a present key has the wrong
    /// type.
    pub fn from_figment(figment: &Figment) -> GenResult<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(figment.clone())
            .extract()
            .into_gen()
    }

    /// Parse the configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenError::Config`] when the text is not valid TOML
    /// or a key has the wrong type.
    pub fn from_toml(text: &str) -> GenResult<Self> {
        Self::from_figment(&Figment::from(Toml::string(text)))
    }
}
