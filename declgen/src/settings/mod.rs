//! Configuration layers and their resolution.
//!
//! Settings arrive in three tiers, most specific first:
//!
//! 1. the annotation on the declaration itself;
//! 2. the annotation on the enclosing scope (containing type for methods,
//!    module-level annotation for unions);
//! 3. project-wide defaults supplied by the build configuration.
//!
//! Each tier is an optional-field record implementing [`SettingsLayer`].
//! Resolution keeps the first present value per field and fills the rest
//! from built-in defaults, so resolution is total.

mod async_ext;
mod layer;
mod project;
mod union;

pub use async_ext::{AsyncSettings, NamespaceChoice, ResolvedAsyncSettings};
pub use layer::{SettingsLayer, merge, resolve};
pub use project::{ProjectDefaults, keys};
pub use union::{ResolvedUnionSettings, UnionSettings};

pub(crate) use async_ext::arg as async_args;
pub(crate) use layer::settings_layer;
pub(crate) use union::arg as union_args;
