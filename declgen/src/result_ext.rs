//! Extensions for mapping errors to `GenResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(GenError::…(e)))`
//! patterns when converting external error types into the crate's
//! `GenResult<T>` alias (`Result<T, Arc<GenError>>`).
//!
//! # Examples
//!
//! ```
//! use declgen::{GenResult, GenResultExt};
//!
//! fn serialise() -> GenResult<serde_json::Value> {
//!     serde_json::to_value(42).into_gen()
//! }
//! # assert!(serialise().is_ok());
//! ```

use std::sync::Arc;

use crate::{GenError, GenResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<GenError>`
/// into a [`GenResult<T>`].
pub trait GenResultExt<T, E> {
    /// Convert `Result<T, E>` into `GenResult<T>` using `Into<GenError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<GenError>`.
    fn into_gen(self) -> GenResult<T>;
}

impl<T, E> GenResultExt<T, E> for Result<T, E>
where
    E: Into<GenError>,
{
    fn into_gen(self) -> GenResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
