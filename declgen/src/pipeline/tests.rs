//! Unit tests for pipeline configuration and helpers.

use std::collections::HashSet;

use anyhow::{Result, anyhow, ensure};
use figment::{Figment, Jail, providers::Env, providers::Format, providers::Toml};
use rstest::rstest;

use super::{GeneratorConfig, unique_hint};

#[rstest]
fn partial_toml_keeps_remaining_defaults() -> Result<()> {
    let config = GeneratorConfig::from_toml("union_annotation = \"Variant\"\noutput_extension = \".cs\"")
        .map_err(|e| anyhow!("{e}"))?;
    ensure!(config.union_annotation == "Variant", "override ignored");
    ensure!(config.output_extension == ".cs", "override ignored");
    ensure!(config.async_annotation == "GenerateAsync", "default lost");
    ensure!(config.wrapper_shapes == ["Task", "ValueTask"], "default lost");
    Ok(())
}

#[rstest]
fn wrong_types_are_configuration_errors() {
    let err = GeneratorConfig::from_toml("wrapper_shapes = 3").expect_err("must fail");
    assert!(matches!(*err, crate::GenError::Config(_)), "unexpected error: {err}");
}

#[rstest]
fn layered_providers_merge_over_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("declgen.toml", "tag_annotation = \"Tag\"\n")?;
        jail.set_env("DECLGEN_ASYNC_ANNOTATION", "Awaitable");
        let figment = Figment::new()
            .merge(Toml::file("declgen.toml"))
            .merge(Env::prefixed("DECLGEN_"));
        let config = GeneratorConfig::from_figment(&figment).map_err(|e| e.to_string())?;
        assert_eq!(config.tag_annotation, "Tag");
        assert_eq!(config.async_annotation, "Awaitable");
        assert_eq!(config.union_annotation, "Union");
        Ok(())
    });
}

#[rstest]
fn colliding_hints_get_numeric_suffixes() {
    let mut claimed = HashSet::new();
    assert_eq!(unique_hint(&mut claimed, "App.X.g.cs", ".g.cs"), "App.X.g.cs");
    assert_eq!(unique_hint(&mut claimed, "App.X.g.cs", ".g.cs"), "App.X.2.g.cs");
    assert_eq!(unique_hint(&mut claimed, "App.X.g.cs", ".g.cs"), "App.X.3.g.cs");
    assert_eq!(unique_hint(&mut claimed, "App.Y.g.cs", ".g.cs"), "App.Y.g.cs");
}
