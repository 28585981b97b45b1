//! Render model for union units.

use std::collections::HashMap;

use serde::Serialize;

use super::hint_name;
use crate::grouping::{EmissionUnit, UnionMember};
use crate::host::SymbolModel;
use crate::matching::{ArmPattern, MatchArm, MatchModel, MatchParameter, camel_identifier};
use crate::model::{GenericParam, UnionDescriptor, VariantDescriptor};
use crate::pipeline::GeneratorConfig;

/// Serialization tag attached to the union for one variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TagModel {
    /// Attribute name as written in source.
    pub attribute: String,
    /// Type the tag refers to.
    pub target: String,
    /// Tag value.
    pub tag: String,
}

/// Static factory method for one variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FactoryModel {
    /// Factory method name.
    pub name: String,
    /// Variant constructed.
    pub variant: String,
    /// Rendered parameter list.
    pub parameters: String,
    /// Rendered constructor argument list.
    pub arguments: String,
}

/// Implicit conversion from a single-component variant's payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ConversionModel {
    /// Variant constructed.
    pub variant: String,
    /// Source type of the conversion.
    pub parameter_type: String,
    /// Parameter name.
    pub parameter_name: String,
}

/// Delegate parameter of `Match`/`Switch`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DispatchParameter {
    /// Parameter name.
    pub name: String,
    /// Delegate type used by `Match`.
    pub func: String,
    /// Delegate type used by `Switch`.
    pub action: String,
}

/// One arm of `Match`/`Switch`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DispatchArm {
    /// Pattern recognising the variant.
    pub pattern: String,
    /// Delegate invocation.
    pub invocation: String,
}

/// Everything the union template needs for one union.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct UnionRenderModel {
    /// Output file hint.
    pub hint_name: String,
    /// Qualified name of the source declaration.
    pub source_name: String,
    /// Target namespace.
    pub namespace: Option<String>,
    /// Merged imports.
    pub imports: Vec<String>,
    /// Declaration keyword.
    pub kind: &'static str,
    /// Union name.
    pub name: String,
    /// Generic parameters.
    pub generics: Vec<GenericParam>,
    /// Union type as referenced from inside its body.
    pub self_type: String,
    /// Emit the private constructor.
    pub generate_constructor: bool,
    /// Serialization tags.
    pub tags: Vec<TagModel>,
    /// Factory methods.
    pub factories: Vec<FactoryModel>,
    /// Implicit conversions.
    pub conversions: Vec<ConversionModel>,
    /// Emit `Match` and `Switch`.
    pub has_match: bool,
    /// Delegate parameters, in declaration order.
    pub match_parameters: Vec<DispatchParameter>,
    /// Dispatch arms, in declaration order.
    pub match_arms: Vec<DispatchArm>,
    /// Message thrown for an unrecognised variant.
    pub unknown_variant: String,
}

/// Build the render model for a union unit.
///
/// `matching` is the model built from the unit's variants with the resolved
/// strategy.
#[must_use]
pub fn union_model<S>(
    unit: &EmissionUnit<UnionMember>,
    matching: &MatchModel,
    config: &GeneratorConfig,
    symbols: &S,
) -> Option<UnionRenderModel>
where
    S: SymbolModel + ?Sized,
{
    let member = unit.members.first()?;
    let union = &member.union;
    let settings = &member.settings;
    let self_type = union.display_name();

    let tags = if settings.serialization_tags && union.generics.is_empty() {
        serialization_tags(union, &config.serialization_tag_type)
    } else {
        Vec::new()
    };
    let factories = if settings.generate_factories {
        union.variants.iter().map(factory).collect()
    } else {
        Vec::new()
    };
    let conversions = if settings.implicit_conversions {
        conversions(union, &self_type)
    } else {
        Vec::new()
    };

    Some(UnionRenderModel {
        hint_name: hint_name(&unit.key, &union.generics, &config.output_extension),
        source_name: symbols
            .qualified_name(union.reference)
            .unwrap_or_else(|| unit.key.qualified_name()),
        namespace: unit.key.namespace.clone(),
        imports: unit.imports.clone(),
        kind: union.kind.keyword(),
        name: union.name.clone(),
        generics: union.generics.clone(),
        generate_constructor: settings.generate_constructor,
        tags,
        factories,
        conversions,
        has_match: !matching.is_empty(),
        match_parameters: matching.parameters.iter().map(dispatch_parameter).collect(),
        match_arms: matching.arms.iter().map(dispatch_arm).collect(),
        unknown_variant: format!("Unknown variant of {self_type}."),
        self_type,
    })
}

fn serialization_tags(union: &UnionDescriptor, tag_type: &str) -> Vec<TagModel> {
    let simple = tag_type.strip_suffix("Attribute").unwrap_or(tag_type);
    let attribute = format!("global::{simple}");
    union
        .variants
        .iter()
        .filter(|v| !v.has_custom_tag)
        .map(|v| TagModel {
            attribute: attribute.clone(),
            target: format!("{}.{}", union.name, v.name),
            tag: v.name.clone(),
        })
        .collect()
}

fn factory(variant: &VariantDescriptor) -> FactoryModel {
    let components = variant.components_or_empty();
    let names: Vec<String> = components
        .iter()
        .map(|c| camel_identifier(&c.name))
        .collect();
    let parameters: Vec<String> = components
        .iter()
        .zip(&names)
        .map(|(c, name)| format!("{} {name}", c.ty))
        .collect();
    FactoryModel {
        name: format!("New{}", variant.name),
        variant: variant.name.clone(),
        parameters: parameters.join(", "),
        arguments: names.join(", "),
    }
}

/// Conversions for single-component variants whose payload type no other
/// single-component variant shares.
fn conversions(union: &UnionDescriptor, self_type: &str) -> Vec<ConversionModel> {
    let candidates: Vec<(&VariantDescriptor, &str, &str)> = union
        .variants
        .iter()
        .filter_map(|v| match v.components_or_empty() {
            [only] => Some((v, only.name.as_str(), only.ty.as_str())),
            _ => None,
        })
        .collect();
    let mut uses: HashMap<&str, usize> = HashMap::new();
    for (_, _, ty) in &candidates {
        *uses.entry(*ty).or_default() += 1;
    }
    candidates
        .into_iter()
        .filter(|(_, _, ty)| {
            uses.get(ty) == Some(&1) && *ty != self_type && *ty != union.name && *ty != "object"
        })
        .map(|(v, name, ty)| ConversionModel {
            variant: v.name.clone(),
            parameter_type: ty.to_owned(),
            parameter_name: camel_identifier(name),
        })
        .collect()
}

fn dispatch_parameter(parameter: &MatchParameter) -> DispatchParameter {
    let inputs = parameter.inputs.join(", ");
    let (func, action) = if parameter.inputs.is_empty() {
        (
            "global::System.Func<TResult>".to_owned(),
            "global::System.Action".to_owned(),
        )
    } else {
        (
            format!("global::System.Func<{inputs}, TResult>"),
            format!("global::System.Action<{inputs}>"),
        )
    };
    DispatchParameter {
        name: parameter.name.clone(),
        func,
        action,
    }
}

fn dispatch_arm(arm: &MatchArm) -> DispatchArm {
    let pattern = match &arm.pattern {
        ArmPattern::Type { binding } => format!("{} {binding}", arm.variant),
        ArmPattern::Deconstruct { components } if components.is_empty() => {
            format!("{} _", arm.variant)
        }
        ArmPattern::Deconstruct { .. } => {
            let bindings: Vec<String> = arm.arguments.iter().map(|a| format!("var {a}")).collect();
            format!("{}({})", arm.variant, bindings.join(", "))
        }
    };
    DispatchArm {
        pattern,
        invocation: format!("{}({})", arm.parameter, arm.arguments.join(", ")),
    }
}
