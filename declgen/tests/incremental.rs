//! Incremental reuse, cancellation and determinism across runs.

mod support;

use anyhow::{Result, anyhow, ensure};
use declgen::host::RawDeclaration;
use declgen::render::TemplateSet;
use declgen::{CancellationToken, GenError, GenerationInput, Generator, IncrementalCache};
use rstest::{fixture, rstest};
use test_helpers::FakeHost;
use test_helpers::decl::{instance_method, numbered, task, union_record, variant_record};

use support::{codes, generate, text};

#[fixture]
fn declarations() -> Vec<RawDeclaration> {
    numbered(vec![
        union_record(
            "Shape",
            "Geometry",
            vec![
                variant_record("Circle", "Shape", &[("Radius", "float")]),
                variant_record("Square", "Shape", &[("Side", "float")]),
            ],
        ),
        instance_method("Repository", "Data", "Load", Vec::new(), task(Some("int"))),
        union_record(
            "Option",
            "Core",
            vec![
                variant_record("Some", "Option", &[("Value", "object")]),
                variant_record("None", "Option", &[]),
            ],
        ),
        instance_method("Repository", "Data", "Save", Vec::new(), task(None)),
        union_record("Broken", "Core", Vec::new()),
    ])
}

#[rstest]
fn unchanged_units_are_reused(declarations: Vec<RawDeclaration>) -> Result<()> {
    let generator = Generator::new(FakeHost::new());
    let cancel = CancellationToken::new();
    let mut cache = IncrementalCache::new();
    let input = GenerationInput::new(declarations.clone());

    let first = generator.run(&input, &cancel, &mut cache).map_err(|e| anyhow!("{e}"))?;
    ensure!(cache.stats().rendered == 3, "stats: {:?}", cache.stats());
    ensure!(cache.len() == 3, "three units are cached");

    let second = generator.run(&input, &cancel, &mut cache).map_err(|e| anyhow!("{e}"))?;
    ensure!(cache.stats().reused == 3 && cache.stats().rendered == 0, "stats: {:?}", cache.stats());
    ensure!(first == second, "reused output must be identical");

    let edited: Vec<RawDeclaration> = declarations
        .into_iter()
        .filter(|d| d.name != "Save")
        .collect();
    generator
        .run(&GenerationInput::new(edited), &cancel, &mut cache)
        .map_err(|e| anyhow!("{e}"))?;
    let stats = cache.stats();
    ensure!(
        stats.reused == 2 && stats.rendered == 1 && stats.evicted == 1,
        "only the edited unit is rendered again: {stats:?}"
    );
    Ok(())
}

#[rstest]
fn output_does_not_depend_on_declaration_order(declarations: Vec<RawDeclaration>) -> Result<()> {
    let generator = Generator::new(FakeHost::new());
    let forward = generate(&generator, &GenerationInput::new(declarations.clone()))?;
    let mut reversed = declarations;
    reversed.reverse();
    let backward = generate(&generator, &GenerationInput::new(reversed))?;

    ensure!(forward == backward, "output changed with input order");
    ensure!(codes(&forward) == ["DG0002"], "unexpected diagnostics: {:?}", codes(&forward));
    let repository = text(&forward, "Data.RepositoryAsyncExtensions.g.cs")?;
    let load = repository.find("LoadAsync");
    let save = repository.find("SaveAsync");
    ensure!(
        matches!((load, save), (Some(l), Some(s)) if l < s),
        "members follow declaration order:\n{repository}"
    );
    Ok(())
}

#[rstest]
fn cancelled_runs_return_no_output(declarations: Vec<RawDeclaration>) {
    let generator = Generator::new(FakeHost::new());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut cache = IncrementalCache::new();
    let result = generator.run(&GenerationInput::new(declarations), &cancel, &mut cache);
    assert!(
        result.is_err_and(|err| matches!(*err, GenError::Cancelled)),
        "expected cancellation"
    );
    assert!(cache.is_empty(), "a cancelled run caches nothing");
}

#[rstest]
fn malformed_templates_abort_the_run(declarations: Vec<RawDeclaration>) {
    let generator = Generator::new(FakeHost::new())
        .with_templates(TemplateSet::default().with_union("{{#each tags}}"));
    let result = generator.run(
        &GenerationInput::new(declarations),
        &CancellationToken::new(),
        &mut IncrementalCache::new(),
    );
    assert!(
        result.is_err_and(|err| matches!(*err, GenError::Template { .. })),
        "expected a template error"
    );
}

#[rstest]
fn custom_templates_render_the_same_models(declarations: Vec<RawDeclaration>) -> Result<()> {
    let generator = Generator::new(FakeHost::new()).with_templates(
        TemplateSet::default()
            .with_union("{{name}}:{{#each match_parameters}}{{name}};{{/each}}")
            .with_async_extensions("{{class_name}}:{{#each members}}{{name}};{{/each}}"),
    );
    let output = generate(&generator, &GenerationInput::new(declarations))?;
    ensure!(text(&output, "Geometry.Shape.g.cs")? == "Shape:circle;square;", "union text");
    ensure!(text(&output, "Core.Option.g.cs")? == "Option:some;none;", "option text");
    ensure!(
        text(&output, "Data.RepositoryAsyncExtensions.g.cs")?
            == "RepositoryAsyncExtensions:LoadAsync;SaveAsync;",
        "async text"
    );
    Ok(())
}

#[rstest]
fn swapping_templates_invalidates_cached_text(declarations: Vec<RawDeclaration>) -> Result<()> {
    let cancel = CancellationToken::new();
    let mut cache = IncrementalCache::new();
    let input = GenerationInput::new(declarations);
    Generator::new(FakeHost::new())
        .run(&input, &cancel, &mut cache)
        .map_err(|e| anyhow!("{e}"))?;

    let custom = Generator::new(FakeHost::new())
        .with_templates(TemplateSet::default().with_union("CUSTOM {{name}}"));
    let output = custom.run(&input, &cancel, &mut cache).map_err(|e| anyhow!("{e}"))?;
    ensure!(text(&output, "Geometry.Shape.g.cs")? == "CUSTOM Shape", "stale union text");
    let stats = cache.stats();
    ensure!(
        stats.rendered == 3 && stats.reused == 0,
        "every unit is rendered with the new templates: {stats:?}"
    );
    Ok(())
}
