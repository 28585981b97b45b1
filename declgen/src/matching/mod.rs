//! Match-model construction for union dispatch.
//!
//! The builder turns a union's variants into the parameters and arms of the
//! generated `Match`/`Switch` methods. Output order always equals declaration
//! order, because callers invoke the generated methods positionally.

use heck::ToLowerCamelCase;
use serde::Serialize;

use crate::host::LanguageLevel;
use crate::model::{Component, VariantDescriptor};

/// Policy binding dispatch arguments to variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MatchStrategy {
    /// No dispatch methods are generated.
    None,
    /// One argument per variant receiving the variant value itself.
    #[default]
    ByType,
    /// One argument per variant receiving the variant's components.
    ByDecomposition,
}

impl MatchStrategy {
    /// Parse the named-enum text used by annotations and project settings.
    ///
    /// Matching ignores ASCII case and an optional `MatchStrategy.` prefix.
    #[must_use]
    pub fn parse_name(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let name = trimmed.rsplit('.').next().unwrap_or(trimmed);
        [Self::None, Self::ByType, Self::ByDecomposition]
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(name))
    }

    /// Canonical member name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::ByType => "ByType",
            Self::ByDecomposition => "ByDecomposition",
        }
    }

    /// Lowest language level able to express the strategy's arms.
    #[must_use]
    pub const fn required_level(self) -> Option<LanguageLevel> {
        match self {
            Self::None => None,
            Self::ByType => Some(LanguageLevel::TYPE_PATTERNS),
            Self::ByDecomposition => Some(LanguageLevel::POSITIONAL_PATTERNS),
        }
    }

    /// Whether `level` can express the strategy.
    #[must_use]
    pub fn is_supported_at(self, level: LanguageLevel) -> bool {
        self.required_level().is_none_or(|required| level >= required)
    }
}

/// Pattern an arm uses to recognise its variant.
///
/// The renderer matches on this exhaustively, so adding a strategy forces
/// every consumer to handle it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArmPattern {
    /// Bind the whole value when its runtime type is the variant.
    Type {
        /// Name bound to the matched value, `__` plus the lower camel case
        /// variant name.
        binding: String,
    },
    /// Destructure the variant into its named components.
    Deconstruct {
        /// Components bound in declaration order.
        components: Vec<Component>,
    },
}

/// One generated dispatch parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MatchParameter {
    /// Parameter name, the variant name in lower camel case.
    pub name: String,
    /// Variant the parameter handles.
    pub variant: String,
    /// Ordered argument types passed to the parameter's function.
    pub inputs: Vec<String>,
}

impl MatchParameter {
    /// Number of arguments the parameter's function receives.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }
}

/// One arm of the generated dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MatchArm {
    /// Variant matched by the arm.
    pub variant: String,
    /// Pattern recognising the variant.
    pub pattern: ArmPattern,
    /// Parameter invoked by the arm.
    pub parameter: String,
    /// Names bound by the pattern and passed to the parameter, in order.
    pub arguments: Vec<String>,
}

/// Dispatch parameters and arms for one union.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MatchModel {
    /// Strategy the model was built with.
    pub strategy: MatchStrategy,
    /// Parameters in declaration order.
    pub parameters: Vec<MatchParameter>,
    /// Arms in declaration order.
    pub arms: Vec<MatchArm>,
}

impl MatchModel {
    /// Whether the model produces no dispatch at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

/// Build the dispatch model for `variants`.
///
/// Returns an empty model when `strategy` is [`MatchStrategy::None`] or the
/// target lacks pattern support (`capable == false`); the validation layer
/// reports the capability gap separately.
#[must_use]
pub fn build_match_model(
    variants: &[VariantDescriptor],
    strategy: MatchStrategy,
    capable: bool,
) -> MatchModel {
    if !capable || strategy == MatchStrategy::None {
        return MatchModel {
            strategy,
            ..MatchModel::default()
        };
    }
    let (parameters, arms) = variants
        .iter()
        .map(|variant| match strategy {
            MatchStrategy::ByDecomposition => decomposition_entry(variant),
            MatchStrategy::ByType | MatchStrategy::None => type_entry(variant),
        })
        .unzip();
    MatchModel {
        strategy,
        parameters,
        arms,
    }
}

/// Prefix of type-pattern bindings. Parameter names never start with an
/// underscore, so a binding cannot shadow a dispatch parameter.
const BINDING_PREFIX: &str = "__";

/// Lower camel case identifier for `name`, escaped when it is a keyword.
pub(crate) fn camel_identifier(name: &str) -> String {
    let camel = name.to_lower_camel_case();
    if is_reserved(&camel) {
        format!("@{camel}")
    } else {
        camel
    }
}

fn type_entry(variant: &VariantDescriptor) -> (MatchParameter, MatchArm) {
    let name = camel_identifier(&variant.name);
    let binding = format!("{BINDING_PREFIX}{}", variant.name.to_lower_camel_case());
    (
        MatchParameter {
            name: name.clone(),
            variant: variant.name.clone(),
            inputs: vec![variant.name.clone()],
        },
        MatchArm {
            variant: variant.name.clone(),
            arguments: vec![binding.clone()],
            pattern: ArmPattern::Type { binding },
            parameter: name,
        },
    )
}

fn decomposition_entry(variant: &VariantDescriptor) -> (MatchParameter, MatchArm) {
    let name = camel_identifier(&variant.name);
    let components = variant.components_or_empty().to_vec();
    (
        MatchParameter {
            name: name.clone(),
            variant: variant.name.clone(),
            inputs: components.iter().map(|c| c.ty.clone()).collect(),
        },
        MatchArm {
            variant: variant.name.clone(),
            arguments: components.iter().map(|c| camel_identifier(&c.name)).collect(),
            pattern: ArmPattern::Deconstruct { components },
            parameter: name,
        },
    )
}

const RESERVED: &[&str] = &[
    "base", "bool", "break", "case", "catch", "char", "checked", "class", "const", "continue",
    "default", "delegate", "do", "double", "else", "enum", "event", "explicit", "extern", "false",
    "finally", "fixed", "float", "for", "foreach", "goto", "if", "implicit", "in", "int",
    "interface", "internal", "is", "lock", "long", "namespace", "new", "null", "object",
    "operator", "out", "override", "params", "private", "protected", "public", "readonly", "ref",
    "return", "sealed", "short", "sizeof", "static", "string", "struct", "switch", "this",
    "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using",
    "virtual", "void", "volatile", "while",
];

fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

#[cfg(test)]
mod tests;
