//! Unit tests for the match-model builder.

use rstest::{fixture, rstest};

use super::{ArmPattern, MatchStrategy, build_match_model};
use crate::host::LanguageLevel;
use crate::model::{Component, VariantDescriptor};

fn variant(name: &str, components: &[(&str, &str)]) -> VariantDescriptor {
    VariantDescriptor {
        components: Some(
            components
                .iter()
                .map(|(name, ty)| Component {
                    name: (*name).to_owned(),
                    ty: (*ty).to_owned(),
                })
                .collect(),
        ),
        ..bare(name)
    }
}

fn bare(name: &str) -> VariantDescriptor {
    VariantDescriptor {
        name: name.to_owned(),
        ..VariantDescriptor::default()
    }
}

#[fixture]
fn shape() -> Vec<VariantDescriptor> {
    vec![
        variant("Circle", &[("radius", "float")]),
        variant("Square", &[("side", "float")]),
    ]
}

#[rstest]
fn decomposes_shape_in_declaration_order(shape: Vec<VariantDescriptor>) {
    let model = build_match_model(&shape, MatchStrategy::ByDecomposition, true);
    assert_eq!(model.parameters.len(), 2);
    assert_eq!(model.arms.len(), 2);

    let names: Vec<&str> = model.parameters.iter().map(|p| p.variant.as_str()).collect();
    assert_eq!(names, ["Circle", "Square"]);
    assert!(model.parameters.iter().all(|p| p.arity() == 1));

    let Some(first) = model.arms.first() else {
        panic!("expected a first arm");
    };
    assert_eq!(
        first.pattern,
        ArmPattern::Deconstruct {
            components: vec![Component {
                name: "radius".to_owned(),
                ty: "float".to_owned(),
            }],
        }
    );
    assert_eq!(first.arguments, ["radius"]);
    assert_eq!(first.parameter, "circle");
}

#[rstest]
fn by_type_produces_one_unary_entry_per_variant(shape: Vec<VariantDescriptor>) {
    let model = build_match_model(&shape, MatchStrategy::ByType, true);
    assert_eq!(model.parameters.len(), shape.len());
    assert_eq!(model.arms.len(), shape.len());
    for (parameter, variant) in model.parameters.iter().zip(&shape) {
        assert_eq!(parameter.inputs, [variant.name.clone()]);
    }
    assert!(
        model
            .arms
            .iter()
            .all(|arm| matches!(arm.pattern, ArmPattern::Type { .. }))
    );
}

#[rstest]
fn undecomposable_variants_get_nullary_parameters() {
    let variants = vec![bare("Empty"), variant("Pair", &[("a", "int"), ("b", "int")])];
    let model = build_match_model(&variants, MatchStrategy::ByDecomposition, true);
    let arities: Vec<usize> = model.parameters.iter().map(|p| p.arity()).collect();
    assert_eq!(arities, [0, 2]);
    assert_eq!(model.arms.len(), 2, "nullary variants still receive an arm");
}

#[rstest]
#[case(MatchStrategy::ByType, false)]
#[case(MatchStrategy::ByDecomposition, false)]
#[case(MatchStrategy::None, true)]
fn empty_without_capability_or_strategy(
    shape: Vec<VariantDescriptor>,
    #[case] strategy: MatchStrategy,
    #[case] capable: bool,
) {
    assert!(build_match_model(&shape, strategy, capable).is_empty());
}

#[rstest]
fn type_bindings_never_shadow_parameters() {
    let variants = vec![bare("Circle"), bare("CircleValue")];
    let model = build_match_model(&variants, MatchStrategy::ByType, true);
    let parameters: Vec<&str> = model.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(parameters, ["circle", "circleValue"]);
    for arm in &model.arms {
        let ArmPattern::Type { binding } = &arm.pattern else {
            panic!("expected a type pattern");
        };
        assert!(
            !parameters.contains(&binding.as_str()),
            "{binding} shadows a parameter"
        );
        assert_eq!(arm.arguments, [binding.clone()]);
    }
    let bindings: Vec<&str> = model
        .arms
        .iter()
        .flat_map(|a| a.arguments.iter().map(String::as_str))
        .collect();
    assert_eq!(bindings, ["__circle", "__circleValue"]);
}

#[rstest]
fn reserved_parameter_names_are_escaped() {
    let model = build_match_model(&[bare("Default")], MatchStrategy::ByType, true);
    let names: Vec<&str> = model.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["@default"]);
}

#[rstest]
#[case("bytype", Some(MatchStrategy::ByType))]
#[case("MatchStrategy.ByDecomposition", Some(MatchStrategy::ByDecomposition))]
#[case("none", Some(MatchStrategy::None))]
#[case("", None)]
#[case("Sideways", None)]
fn parses_strategy_names(#[case] text: &str, #[case] expected: Option<MatchStrategy>) {
    assert_eq!(MatchStrategy::parse_name(text), expected);
}

#[rstest]
#[case(MatchStrategy::ByType, LanguageLevel::new(7, 0), true)]
#[case(MatchStrategy::ByDecomposition, LanguageLevel::new(7, 3), false)]
#[case(MatchStrategy::ByDecomposition, LanguageLevel::new(8, 0), true)]
#[case(MatchStrategy::None, LanguageLevel::new(1, 0), true)]
fn strategies_know_their_language_level(
    #[case] strategy: MatchStrategy,
    #[case] level: LanguageLevel,
    #[case] expected: bool,
) {
    assert_eq!(strategy.is_supported_at(level), expected);
}
