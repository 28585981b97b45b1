//! Settings for the union generator family.

use super::settings_layer;
use crate::host::Annotation;
use crate::matching::MatchStrategy;

settings_layer! {
    /// One tier of union generation settings.
    pub struct UnionSettings => ResolvedUnionSettings {
        /// How `Match`/`Switch` bind arguments to variants.
        match_strategy: MatchStrategy = MatchStrategy::ByType,
        /// Emit a private parameterless constructor that closes the hierarchy.
        generate_constructor: bool = true,
        /// Emit static factory methods for each variant.
        generate_factories: bool = true,
        /// Emit implicit conversions from single-component variants.
        implicit_conversions: bool = true,
        /// Emit serialization tags on the union for every variant.
        serialization_tags: bool = false,
    }
}

/// Annotation argument names recognised on union annotations.
pub(crate) mod arg {
    pub const MATCH_STRATEGY: &str = "MatchStrategy";
    pub const GENERATE_CONSTRUCTOR: &str = "GenerateConstructor";
    pub const GENERATE_FACTORIES: &str = "GenerateFactories";
    pub const IMPLICIT_CONVERSIONS: &str = "ImplicitConversions";
    pub const SERIALIZATION_TAGS: &str = "SerializationTags";
}

impl UnionSettings {
    /// Read the layer from an annotation's named arguments.
    ///
    /// Arguments of the wrong kind are treated as absent.
    #[must_use]
    pub fn from_annotation(annotation: &Annotation) -> Self {
        let flag = |key: &str| annotation.argument(key).and_then(|a| a.value.as_bool());
        Self {
            match_strategy: annotation
                .argument(arg::MATCH_STRATEGY)
                .and_then(|a| a.value.as_enum_name())
                .and_then(MatchStrategy::parse_name),
            generate_constructor: flag(arg::GENERATE_CONSTRUCTOR),
            generate_factories: flag(arg::GENERATE_FACTORIES),
            implicit_conversions: flag(arg::IMPLICIT_CONVERSIONS),
            serialization_tags: flag(arg::SERIALIZATION_TAGS),
        }
    }
}
