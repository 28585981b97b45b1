//! Fatal error types produced by the generation pipeline.
//!
//! Per-declaration problems never surface here; they are reported as
//! [`crate::diagnostics::Diagnostic`] values. A [`GenError`] means the whole
//! pass has to stop.

mod constructors;
mod types;

pub use types::GenError;
