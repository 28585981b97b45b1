//! Applying suggested fixes to real declaration text.

mod support;

use anyhow::{Result, anyhow, ensure};
use declgen::diagnostics::DiagnosticId;
use declgen::fixes::Fix;
use declgen::host::{Annotation, AnnotationArgument, Modifiers, RawDeclaration, RawPart};
use declgen::{GenerationInput, GenerationOutput, Generator};
use rstest::rstest;
use test_helpers::decl::{enum_value, union_record, variant_record};
use test_helpers::{FakeHost, SourceFile};

use support::{codes, generate};

fn fixes_for(output: &GenerationOutput, id: DiagnosticId) -> Vec<&Fix> {
    output.fixes.iter().filter(|f| f.diagnostic == id).collect()
}

fn apply(fix: &Fix, file: &SourceFile) -> Result<String> {
    fix.apply(file.path(), file.text()).map_err(|e| anyhow!("{e}"))
}

#[rstest]
fn missing_partial_modifier_is_inserted() -> Result<()> {
    let file = SourceFile::new(
        "Shape.cs",
        "[Union]\npublic record Shape\n{\n    public sealed record Circle(float Radius) : Shape;\n}\n",
    );
    let circle = RawDeclaration {
        location: file.span_of("public sealed record Circle")?,
        ..variant_record("Circle", "Shape", &[("Radius", "float")])
    };
    let union = RawDeclaration {
        modifiers: Modifiers::default(),
        modifier_offset: file.offset_of("record Shape")?,
        location: file.span_of("public record Shape")?,
        ..union_record("Shape", "Geometry", vec![circle])
    };
    let output = generate(&Generator::new(FakeHost::new()), &GenerationInput::new(vec![union]))?;

    ensure!(codes(&output) == ["DG0001"], "unexpected diagnostics: {:?}", codes(&output));
    let fixes = fixes_for(&output, DiagnosticId::UnionNotPartial);
    let [fix] = fixes.as_slice() else {
        anyhow::bail!("expected one fix, got {}", fixes.len());
    };
    let fixed = apply(fix, &file)?;
    ensure!(fixed.contains("public partial record Shape\n"), "fixed text:\n{fixed}");
    Ok(())
}

#[rstest]
fn empty_union_gets_a_stub_variant() -> Result<()> {
    let file = SourceFile::new("Empty.cs", "[Union]\npublic partial record Empty\n{\n}\n");
    let location = file.span_between("public partial record Empty", "}")?;
    let union = RawDeclaration {
        location: location.clone(),
        parts: vec![RawPart {
            span: location,
            modifiers: Modifiers {
                is_partial: true,
                ..Modifiers::default()
            },
            modifier_offset: file.offset_of("record Empty")?,
            body_end: file.last_brace()?,
        }],
        ..union_record("Empty", "App", Vec::new())
    };
    let output = generate(&Generator::new(FakeHost::new()), &GenerationInput::new(vec![union]))?;

    let fixes = fixes_for(&output, DiagnosticId::UnionHasNoVariants);
    let [fix] = fixes.as_slice() else {
        anyhow::bail!("expected one fix, got {}", fixes.len());
    };
    let fixed = apply(fix, &file)?;
    ensure!(
        fixed == "[Union]\npublic partial record Empty\n{\n    public sealed record Variant : Empty;\n}\n",
        "fixed text:\n{fixed}"
    );
    Ok(())
}

#[rstest]
fn unsupported_strategy_offers_supported_alternatives() -> Result<()> {
    let file = SourceFile::new(
        "Shape.cs",
        "[Union(MatchStrategy = MatchStrategy.ByDecomposition)]\n\
         public partial record Shape\n{\n    public sealed record Circle(float Radius) : Shape;\n}\n",
    );
    let annotation = Annotation {
        span: file.span_of("Union(MatchStrategy = MatchStrategy.ByDecomposition)")?,
        arguments_span: Some(file.span_of("(MatchStrategy = MatchStrategy.ByDecomposition)")?),
        arguments: vec![AnnotationArgument {
            key: "MatchStrategy".to_owned(),
            value: enum_value("MatchStrategy.ByDecomposition"),
            value_span: file.span_of("MatchStrategy.ByDecomposition")?,
        }],
        ..Annotation::new("Union")
    };
    let union = RawDeclaration {
        annotations: vec![annotation],
        location: file.span_of("public partial record Shape")?,
        ..union_record(
            "Shape",
            "Geometry",
            vec![variant_record("Circle", "Shape", &[("Radius", "float")])],
        )
    };
    let generator = Generator::new(FakeHost::new().with_level(7, 3));
    let output = generate(&generator, &GenerationInput::new(vec![union]))?;

    let fixes = fixes_for(&output, DiagnosticId::StrategyUnsupported);
    let fixed: Vec<String> = fixes
        .iter()
        .map(|fix| apply(fix, &file))
        .collect::<Result<_>>()?;
    let heads: Vec<&str> = fixed.iter().filter_map(|text| text.lines().next()).collect();
    ensure!(
        heads
            == [
                "[Union(MatchStrategy = MatchStrategy.None)]",
                "[Union(MatchStrategy = MatchStrategy.ByType)]",
            ],
        "unexpected fixes: {heads:?}"
    );
    Ok(())
}

#[rstest]
fn explicit_constructor_fix_disables_generation() -> Result<()> {
    let file = SourceFile::new(
        "Shape.cs",
        "[Union]\npublic partial record Shape\n{\n    private Shape(int seed) { }\n    \
         public sealed record Circle(float Radius) : Shape;\n}\n",
    );
    let annotation = Annotation {
        span: file.span_of("Union")?,
        ..Annotation::new("Union")
    };
    let union = RawDeclaration {
        annotations: vec![annotation],
        constructors: vec![file.span_between("    private Shape", "{ }\n")?],
        location: file.span_of("public partial record Shape")?,
        ..union_record(
            "Shape",
            "Geometry",
            vec![variant_record("Circle", "Shape", &[("Radius", "float")])],
        )
    };
    let output = generate(&Generator::new(FakeHost::new()), &GenerationInput::new(vec![union]))?;

    let fixes = fixes_for(&output, DiagnosticId::ConstructorConflict);
    let [remove, disable] = fixes.as_slice() else {
        anyhow::bail!("expected two fixes, got {}", fixes.len());
    };
    let removed = apply(remove, &file)?;
    ensure!(!removed.contains("private Shape(int seed)"), "constructor kept:\n{removed}");
    let disabled = apply(disable, &file)?;
    ensure!(
        disabled.starts_with("[Union(GenerateConstructor = false)]\n"),
        "annotation not updated:\n{disabled}"
    );
    let generated = output
        .sources
        .first()
        .map(|s| s.text.as_str())
        .unwrap_or_default();
    ensure!(!generated.contains("private Shape() { }"), "generated constructor suppressed");
    Ok(())
}
