//! End-to-end coverage for the union generator family.

mod support;

use anyhow::{Result, ensure};
use declgen::diagnostics::{DiagnosticId, Severity};
use declgen::host::{Annotation, ArgumentValue, RawDeclaration, Visibility};
use declgen::{GenerationInput, Generator};
use rstest::{fixture, rstest};
use test_helpers::FakeHost;
use test_helpers::decl::{annotation, enum_value, numbered, union_record, variant_record};

use support::{codes, generate, text};

#[fixture]
fn shape() -> RawDeclaration {
    RawDeclaration {
        annotations: vec![annotation(
            "Union",
            &[("MatchStrategy", enum_value("MatchStrategy.ByDecomposition"))],
        )],
        ..union_record(
            "Shape",
            "Geometry",
            vec![
                variant_record("Circle", "Shape", &[("Radius", "float")]),
                variant_record("Square", "Shape", &[("Side", "float")]),
            ],
        )
    }
}

#[rstest]
fn decomposed_shape_dispatches_in_declaration_order(shape: RawDeclaration) -> Result<()> {
    let generator = Generator::new(FakeHost::new());
    let output = generate(&generator, &GenerationInput::new(numbered(vec![shape])))?;

    ensure!(output.diagnostics.is_empty(), "unexpected diagnostics: {:?}", codes(&output));
    let generated = text(&output, "Geometry.Shape.g.cs")?;
    ensure!(
        generated.contains(
            "public TResult Match<TResult>(global::System.Func<float, TResult> circle, \
             global::System.Func<float, TResult> square)"
        ),
        "match signature missing:\n{generated}"
    );
    let circle = generated.find("Circle(var radius) => circle(radius),");
    let square = generated.find("Square(var side) => square(side),");
    ensure!(
        matches!((circle, square), (Some(c), Some(s)) if c < s),
        "arms out of order:\n{generated}"
    );
    ensure!(generated.contains("case Square(var side):"), "switch arm missing");
    ensure!(generated.contains("partial record Shape"), "declaration missing");
    ensure!(generated.contains("private Shape() { }"), "constructor missing");
    ensure!(
        generated.contains("public static Shape NewCircle(float radius) => new Circle(radius);"),
        "factory missing:\n{generated}"
    );
    ensure!(
        !generated.contains("implicit operator"),
        "shared payload types must not get conversions"
    );
    Ok(())
}

#[rstest]
fn by_type_is_the_default_strategy() -> Result<()> {
    let union = union_record(
        "Token",
        "Lexing",
        vec![
            variant_record("Word", "Token", &[("Text", "string")]),
            variant_record("Number", "Token", &[("Value", "int")]),
        ],
    );
    let generator = Generator::new(FakeHost::new());
    let output = generate(&generator, &GenerationInput::new(numbered(vec![union])))?;
    let generated = text(&output, "Lexing.Token.g.cs")?;
    ensure!(generated.contains("Word __word => word(__word),"), "type arm missing");
    ensure!(
        generated.contains("public static implicit operator Token(string text) => new Word(text);"),
        "conversion missing:\n{generated}"
    );
    Ok(())
}

#[rstest]
fn zero_variant_union_reports_one_error_and_emits_nothing() -> Result<()> {
    let generator = Generator::new(FakeHost::new());
    let input = GenerationInput::new(numbered(vec![union_record("Empty", "App", Vec::new())]));
    let output = generate(&generator, &input)?;

    ensure!(codes(&output) == ["DG0002"], "unexpected diagnostics: {:?}", codes(&output));
    ensure!(output.has_errors(), "missing variants is an error");
    ensure!(output.sources.is_empty(), "no source may be generated");
    ensure!(output.fixes.len() == 1, "expected the stub-variant fix");
    Ok(())
}

#[rstest]
fn unsupported_strategy_downgrades_to_no_matching(shape: RawDeclaration) -> Result<()> {
    let generator = Generator::new(FakeHost::new().with_level(7, 3));
    let output = generate(&generator, &GenerationInput::new(numbered(vec![shape])))?;

    let Some(diagnostic) = output.diagnostics.first() else {
        anyhow::bail!("expected a diagnostic");
    };
    ensure!(diagnostic.id == DiagnosticId::StrategyUnsupported, "wrong id");
    ensure!(diagnostic.severity == Severity::Warning, "must be a warning");
    ensure!(
        diagnostic.message().contains("ByDecomposition"),
        "message should name the strategy: {}",
        diagnostic.message()
    );
    let generated = text(&output, "Geometry.Shape.g.cs")?;
    ensure!(!generated.contains("Match<TResult>"), "matching must be disabled");
    ensure!(generated.contains("NewSquare"), "the rest of the union is still generated");
    Ok(())
}

#[rstest]
#[case::available(true, 0)]
#[case::missing(false, 1)]
fn serialization_tags_depend_on_the_tag_type(
    #[case] available: bool,
    #[case] expected_diagnostics: usize,
) -> Result<()> {
    const TAG_TYPE: &str = "System.Text.Json.Serialization.JsonDerivedTypeAttribute";
    let union = RawDeclaration {
        annotations: vec![annotation(
            "Union",
            &[("SerializationTags", ArgumentValue::Bool(true))],
        )],
        ..union_record(
            "Event",
            "Audit",
            vec![
                variant_record("Created", "Event", &[("Id", "int")]),
                RawDeclaration {
                    annotations: vec![Annotation::new("UnionTag")],
                    ..variant_record("Deleted", "Event", &[("Id", "int")])
                },
            ],
        )
    };
    let host = if available {
        FakeHost::new().with_type(TAG_TYPE)
    } else {
        FakeHost::new()
    };
    let generator = Generator::new(host);
    let output = generate(&generator, &GenerationInput::new(numbered(vec![union])))?;

    ensure!(
        output.diagnostics.len() == expected_diagnostics,
        "unexpected diagnostics: {:?}",
        codes(&output)
    );
    ensure!(generator.symbols().type_queries() == [TAG_TYPE], "tag type queried once");
    let generated = text(&output, "Audit.Event.g.cs")?;
    let tagged = generated.contains(
        "[global::System.Text.Json.Serialization.JsonDerivedType(typeof(Event.Created), \"Created\")]",
    );
    ensure!(tagged == available, "tag presence mismatch:\n{generated}");
    ensure!(
        !generated.contains("typeof(Event.Deleted)"),
        "variants with their own tag are skipped"
    );
    Ok(())
}

#[rstest]
fn private_variants_are_reported_with_a_visibility_fix() -> Result<()> {
    let union = union_record(
        "Message",
        "Chat",
        vec![
            variant_record("Text", "Message", &[("Body", "string")]),
            RawDeclaration {
                visibility: None,
                ..variant_record("Hidden", "Message", &[])
            },
        ],
    );
    let generator = Generator::new(FakeHost::new());
    let output = generate(&generator, &GenerationInput::new(numbered(vec![union])))?;
    ensure!(codes(&output) == ["DG0006"], "unexpected diagnostics: {:?}", codes(&output));
    ensure!(!output.has_errors(), "an unpublishable variant is a warning");
    ensure!(
        output.fixes.iter().any(|f| f.title == "Make declaration public"),
        "expected a visibility fix"
    );
    ensure!(output.source("Chat.Message.g.cs").is_some(), "warnings keep the union");
    Ok(())
}

#[rstest]
fn internal_unions_accept_internal_variants() -> Result<()> {
    let union = RawDeclaration {
        visibility: Some(Visibility::Internal),
        ..union_record(
            "Step",
            "Flow",
            vec![RawDeclaration {
                visibility: Some(Visibility::Internal),
                ..variant_record("Next", "Step", &[])
            }],
        )
    };
    let generator = Generator::new(FakeHost::new());
    let output = generate(&generator, &GenerationInput::new(numbered(vec![union])))?;
    ensure!(output.diagnostics.is_empty(), "unexpected diagnostics: {:?}", codes(&output));
    let generated = text(&output, "Flow.Step.g.cs")?;
    ensure!(
        generated.contains("Next __next => next(__next),"),
        "by type binds the whole value:\n{generated}"
    );
    Ok(())
}
