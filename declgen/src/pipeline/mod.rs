//! The generation pipeline.
//!
//! [`Generator::run`] wires the stages together: extraction (data parallel),
//! settings resolution and validation per declaration, grouping of the valid
//! descriptors, match-model construction and rendering. Each stage checks
//! the run's [`CancellationToken`] on entry, so a cancelled run returns
//! [`crate::GenError::Cancelled`] and never a partial output.

mod cache;
mod config;

pub use cache::{CacheStats, IncrementalCache};
pub use config::GeneratorConfig;

use std::collections::HashSet;

use rayon::prelude::*;

use self::cache::CacheKey;
use crate::diagnostics::{
    Diagnostic, Severity, duplicate_member, validate_method, validate_union,
};
use crate::extract::{ExtractionContext, extract_method, extract_union};
use crate::fixes::{Fix, suggest};
use crate::grouping::{AsyncMember, UnionMember, group_async, group_unions};
use crate::host::{Annotation, DeclarationKind, RawDeclaration, SymbolModel};
use crate::matching::build_match_model;
use crate::model::{MethodDescriptor, UnionDescriptor};
use crate::naming::NamePattern;
use crate::render::{
    ASYNC_TEMPLATE, TemplateCache, TemplateSet, UNION_TEMPLATE, async_model, union_model,
};
use crate::settings::ProjectDefaults;
use crate::{CancellationToken, GenResult};

/// Everything the host supplies for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationInput {
    /// Candidate declarations in host order.
    pub declarations: Vec<RawDeclaration>,
    /// Module-level annotations.
    pub module_annotations: Vec<Annotation>,
    /// Project-wide defaults.
    pub project: ProjectDefaults,
}

impl GenerationInput {
    /// Input over `declarations` with no module annotations or project
    /// defaults.
    #[must_use]
    pub fn new(declarations: Vec<RawDeclaration>) -> Self {
        Self {
            declarations,
            ..Self::default()
        }
    }

    /// Attach module-level annotations.
    #[must_use]
    pub fn with_module_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.module_annotations = annotations;
        self
    }

    /// Attach project-wide defaults.
    #[must_use]
    pub fn with_project(mut self, project: ProjectDefaults) -> Self {
        self.project = project;
        self
    }
}

/// One generated file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratedSource {
    /// Unique output hint, e.g. `Geometry.Shape.g.cs`.
    pub hint_name: String,
    /// Generated text.
    pub text: String,
}

/// Result of a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    /// Generated files: union units first, then extension classes, each
    /// ordered by emission key.
    pub sources: Vec<GeneratedSource>,
    /// Diagnostics ordered by location, then identifier.
    pub diagnostics: Vec<Diagnostic>,
    /// Fixes for the diagnostics, in diagnostic order.
    pub fixes: Vec<Fix>,
}

impl GenerationOutput {
    /// Generated file with `hint_name`.
    #[must_use]
    pub fn source(&self, hint_name: &str) -> Option<&GeneratedSource> {
        self.sources.iter().find(|s| s.hint_name == hint_name)
    }

    /// Whether any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

enum Extracted {
    Union(UnionDescriptor),
    Method(MethodDescriptor),
}

/// Source generator bound to one host symbol model.
#[derive(Debug)]
pub struct Generator<H> {
    symbols: H,
    config: GeneratorConfig,
    templates: TemplateCache,
}

impl<H: SymbolModel> Generator<H> {
    /// Generator with the default configuration and built-in templates.
    #[must_use]
    pub fn new(symbols: H) -> Self {
        Self {
            symbols,
            config: GeneratorConfig::default(),
            templates: TemplateCache::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the templates. Compilation is deferred to the next run.
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = TemplateCache::new(templates);
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Host symbol model.
    #[must_use]
    pub const fn symbols(&self) -> &H {
        &self.symbols
    }

    /// Run one generation pass.
    ///
    /// Units whose render model is unchanged since the previous run sharing
    /// `cache` are reused instead of re-rendered.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenError::Cancelled`] when `cancel` fires, and a
    /// fatal error for malformed naming patterns or templates.
    pub fn run(
        &self,
        input: &GenerationInput,
        cancel: &CancellationToken,
        cache: &mut IncrementalCache,
    ) -> GenResult<GenerationOutput> {
        let span = tracing::debug_span!("generate", declarations = input.declarations.len());
        let _entered = span.enter();

        cancel.check()?;
        let ctx = ExtractionContext::new(&self.config, &input.module_annotations);
        let extracted: Vec<Extracted> = input
            .declarations
            .par_iter()
            .filter_map(|decl| extract(decl, &ctx))
            .collect();
        tracing::debug!(extracted = extracted.len(), "extraction finished");

        cancel.check()?;
        let union_project = input.project.union_layer();
        let async_project = input.project.async_layer();
        let mut diagnostics = Vec::new();
        let mut unions = Vec::new();
        let mut methods: Vec<(AsyncMember, NamePattern)> = Vec::new();
        for item in extracted {
            match item {
                Extracted::Union(union) => {
                    let validated =
                        validate_union(&union, &union_project, &self.config, &self.symbols);
                    diagnostics.extend(validated.diagnostics);
                    if validated.emit {
                        unions.push(UnionMember {
                            union,
                            settings: validated.settings,
                        });
                    }
                }
                Extracted::Method(method) => {
                    let validated = validate_method(&method, &async_project)?;
                    diagnostics.extend(validated.diagnostics);
                    if validated.emit {
                        methods.push((
                            AsyncMember {
                                method,
                                settings: validated.settings,
                                generated_name: validated.generated_name,
                            },
                            validated.class_pattern,
                        ));
                    }
                }
            }
        }
        tracing::debug!(
            unions = unions.len(),
            methods = methods.len(),
            diagnostics = diagnostics.len(),
            "validation finished"
        );

        cancel.check()?;
        let union_units = group_unions(unions);
        let async_grouping = group_async(methods);
        diagnostics.extend(async_grouping.duplicates.iter().map(duplicate_member));

        cancel.check()?;
        let renderer = self.templates.renderer()?;
        let level = self.symbols.language_level();
        let mut hints = HashSet::new();
        let mut sources = Vec::with_capacity(union_units.len() + async_grouping.units.len());
        cache.begin_run(self.templates.templates().fingerprint());
        for unit in &union_units {
            cancel.check()?;
            let Some(member) = unit.members.first() else {
                continue;
            };
            let strategy = member.settings.match_strategy;
            let matching = build_match_model(
                &member.union.variants,
                strategy,
                strategy.is_supported_at(level),
            );
            let Some(model) = union_model(unit, &matching, &self.config, &self.symbols) else {
                continue;
            };
            let hint_name = unique_hint(&mut hints, &model.hint_name, &self.config.output_extension);
            let text = cache.get_or_render(CacheKey::Union(model.clone()), || {
                renderer.render(UNION_TEMPLATE, &model)
            })?;
            sources.push(GeneratedSource { hint_name, text });
        }
        for unit in &async_grouping.units {
            cancel.check()?;
            let model = async_model(unit, &self.config, &self.symbols);
            let hint_name = unique_hint(&mut hints, &model.hint_name, &self.config.output_extension);
            let text = cache.get_or_render(CacheKey::Async(model.clone()), || {
                renderer.render(ASYNC_TEMPLATE, &model)
            })?;
            sources.push(GeneratedSource { hint_name, text });
        }
        cache.finish_run();
        let stats = cache.stats();
        tracing::debug!(
            sources = sources.len(),
            reused = stats.reused,
            rendered = stats.rendered,
            evicted = stats.evicted,
            "rendering finished"
        );

        diagnostics.sort_by(|a, b| a.location.cmp(&b.location).then(a.id.cmp(&b.id)));
        let fixes = diagnostics.iter().flat_map(suggest).collect();
        Ok(GenerationOutput {
            sources,
            diagnostics,
            fixes,
        })
    }
}

fn extract(decl: &RawDeclaration, ctx: &ExtractionContext<'_>) -> Option<Extracted> {
    match decl.kind {
        DeclarationKind::Class | DeclarationKind::Record => {
            extract_union(decl, ctx).map(Extracted::Union)
        }
        DeclarationKind::Method => extract_method(decl, ctx).map(Extracted::Method),
        DeclarationKind::Struct
        | DeclarationKind::Interface
        | DeclarationKind::Property
        | DeclarationKind::Other => {
            if decl.annotation(&ctx.config.union_annotation).is_some() {
                tracing::trace!(name = %decl.name, "unions must be classes or records");
            }
            None
        }
    }
}

/// `hint`, or `hint` with a numeric suffix before `extension` when an
/// earlier unit already claimed it.
fn unique_hint(claimed: &mut HashSet<String>, hint: &str, extension: &str) -> String {
    if claimed.insert(hint.to_owned()) {
        return hint.to_owned();
    }
    let stem = hint.strip_suffix(extension).unwrap_or(hint);
    let mut counter = 2_usize;
    loop {
        let candidate = format!("{stem}.{counter}{extension}");
        if claimed.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests;
