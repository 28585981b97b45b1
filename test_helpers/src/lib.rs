//! Test helpers shared across crates in the `declgen` workspace.
//!
//! - [`decl`] builds host declarations without spelling out every field;
//! - [`host`] provides a scriptable [`declgen::host::SymbolModel`];
//! - [`source`] locates spans in literal source text so fixes can be applied;
//! - [`figment`] wraps `figment::Jail` for configuration tests.

pub mod decl;
pub mod figment;
pub mod host;
pub mod source;

pub use host::FakeHost;
pub use source::SourceFile;
