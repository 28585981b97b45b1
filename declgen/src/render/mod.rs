//! Template rendering.
//!
//! Rendering is a pure function of a serialisable render model and template
//! text. Templates are compiled into a [`Renderer`] once per
//! [`TemplateCache`]; the cache is an explicit handle owned by the generator
//! rather than process-global state.

mod async_ext;
mod helpers;
mod templates;
mod union;

pub use async_ext::{AsyncMemberModel, AsyncUnitRenderModel, async_model};
pub use templates::{ASYNC_TEMPLATE, UNION_TEMPLATE};
pub use union::{
    ConversionModel, DispatchArm, DispatchParameter, FactoryModel, TagModel, UnionRenderModel,
    union_model,
};

use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use handlebars::Handlebars;
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;

use crate::grouping::EmissionKey;
use crate::model::GenericParam;
use crate::{GenError, GenResult, GenResultExt};

/// Template text for both generator families.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TemplateSet {
    union: Cow<'static, str>,
    async_extensions: Cow<'static, str>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            union: Cow::Borrowed(templates::UNION),
            async_extensions: Cow::Borrowed(templates::ASYNC_EXTENSIONS),
        }
    }
}

impl TemplateSet {
    /// Replace the union template.
    #[must_use]
    pub fn with_union(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.union = text.into();
        self
    }

    /// Replace the async-extension template.
    #[must_use]
    pub fn with_async_extensions(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.async_extensions = text.into();
        self
    }

    /// Identity of the template text, stable within one process.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn entries(&self) -> [(&'static str, &str); 2] {
        [
            (UNION_TEMPLATE, &*self.union),
            (ASYNC_TEMPLATE, &*self.async_extensions),
        ]
    }
}

/// Compiled templates.
#[derive(Debug)]
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Compile every template in `templates`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`] naming the first malformed template.
    pub fn new(templates: &TemplateSet) -> GenResult<Self> {
        let mut registry = registry();
        for (name, text) in templates.entries() {
            registry
                .register_template_string(name, text)
                .map_err(|e| Arc::new(GenError::template(name, e)))?;
        }
        tracing::debug!("compiled generator templates");
        Ok(Self { registry })
    }

    /// Render the template registered as `name` with `model`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Model`] when the model cannot be serialised and
    /// [`GenError::Render`] when it does not satisfy the template, e.g. a
    /// referenced field is missing.
    pub fn render<M: Serialize>(&self, name: &str, model: &M) -> GenResult<String> {
        let data = model_data(model)?;
        self.registry
            .render(name, &data)
            .map_err(|e| Arc::new(GenError::render(name, e)))
    }
}

/// Render `template` with `model` without any caching.
///
/// # Errors
///
/// Returns [`GenError::Model`] when the model cannot be serialised and
/// [`GenError::Render`] when the template text is malformed or the model
/// does not satisfy it.
pub fn render_template<M: Serialize>(template: &str, model: &M) -> GenResult<String> {
    const INLINE: &str = "inline";
    let data = model_data(model)?;
    registry()
        .render_template(template, &data)
        .map_err(|e| Arc::new(GenError::render(INLINE, e)))
}

/// Serialise `model` up front so its failures are told apart from template
/// failures.
fn model_data<M: Serialize>(model: &M) -> GenResult<Value> {
    serde_json::to_value(model).into_gen()
}

fn registry() -> Handlebars<'static> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    helpers::register(&mut registry);
    registry
}

/// Lazily compiled [`Renderer`] shared by every run of one generator.
///
/// Compilation happens on first use. A failed compilation is reported to
/// the caller and retried on the next use; a successful one is kept.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: TemplateSet,
    renderer: OnceCell<Renderer>,
}

impl TemplateCache {
    /// Cache over `templates`.
    #[must_use]
    pub fn new(templates: TemplateSet) -> Self {
        Self {
            templates,
            renderer: OnceCell::new(),
        }
    }

    /// Compiled renderer, compiling on first use.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`] when a template is malformed.
    pub fn renderer(&self) -> GenResult<&Renderer> {
        self.renderer.get_or_try_init(|| Renderer::new(&self.templates))
    }

    /// Templates the cache compiles.
    #[must_use]
    pub const fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Whether the templates have been compiled.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.renderer.get().is_some()
    }
}

/// Output hint `"{namespace}.{name}{extension}"`, with the generic arity
/// appended to the name for generic declarations.
pub(crate) fn hint_name(key: &EmissionKey, generics: &[GenericParam], extension: &str) -> String {
    let name = if generics.is_empty() {
        key.name.clone()
    } else {
        format!("{}`{}", key.name, generics.len())
    };
    match &key.namespace {
        Some(ns) => format!("{ns}.{name}{extension}"),
        None => format!("{name}{extension}"),
    }
}
