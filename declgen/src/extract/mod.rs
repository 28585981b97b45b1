//! Metadata extraction from raw host declarations.
//!
//! Extraction is a pure function of a declaration and its context. A
//! declaration that does not apply (wrong kind, unresolvable accessibility,
//! nested union, no annotation) yields `None`; that is "not applicable",
//! not an error, and is never reported as a diagnostic.

mod method;
mod return_shape;
mod union;

pub use method::extract_method;
pub use return_shape::detect_return_shape;
pub use union::extract_union;

use crate::host::{Annotation, RawGenericParam};
use crate::model::GenericParam;
use crate::pipeline::GeneratorConfig;

/// Context shared by every extraction in one pass.
#[derive(Clone, Copy, Debug)]
pub struct ExtractionContext<'a> {
    /// Generator configuration (annotation names, wrapper shapes).
    pub config: &'a GeneratorConfig,
    /// Module-level annotations, forming the enclosing tier for unions.
    pub module_annotations: &'a [Annotation],
}

impl<'a> ExtractionContext<'a> {
    /// Build a context.
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig, module_annotations: &'a [Annotation]) -> Self {
        Self {
            config,
            module_annotations,
        }
    }

    fn module_annotation(&self, name: &str) -> Option<&'a Annotation> {
        self.module_annotations.iter().find(|a| a.is_named(name))
    }
}

fn generic_params(raw: &[RawGenericParam]) -> Vec<GenericParam> {
    raw.iter()
        .map(|g| GenericParam {
            name: g.name.clone(),
            constraint: (!g.constraints.is_empty()).then(|| g.constraints.join(", ")),
        })
        .collect()
}
