//! Core crate for the `declgen` source generation engine.
//!
//! Consumers annotate declarations in a host program (tagged unions, methods
//! on types) and the engine turns the host's already-resolved declaration
//! metadata into generated source text. Two generator families share the
//! pipeline implemented here:
//!
//! - the union family emits variant dispatch (`Match`/`Switch`), factories,
//!   conversions and serialization tags for tagged unions;
//! - the async-extension family emits wrapper methods that await a wrapped
//!   receiver before forwarding to the original method.
//!
//! The stages are exposed individually ([`extract`], [`settings`],
//! [`grouping`], [`matching`], [`render`], [`diagnostics`], [`fixes`]) and
//! wired together by [`pipeline::Generator`].

pub mod cancel;
pub mod diagnostics;
mod error;
pub mod extract;
pub mod fixes;
pub mod grouping;
pub mod host;
pub mod matching;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod render;
mod result_ext;
pub mod settings;

pub use cancel::CancellationToken;
pub use error::GenError;
pub use pipeline::{
    GeneratedSource, GenerationInput, GenerationOutput, Generator, GeneratorConfig,
    IncrementalCache,
};
pub use result_ext::GenResultExt;

/// Result alias used across the engine.
///
/// Errors are shared behind an [`Arc`](std::sync::Arc) so that fatal
/// configuration failures can be cloned into every caller that observes them.
pub type GenResult<T> = Result<T, std::sync::Arc<GenError>>;
