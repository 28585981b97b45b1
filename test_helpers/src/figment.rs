//! Shared helpers for working with `figment::Jail` in tests.
//!
//! Project defaults and generator configuration are both read through
//! `figment`, so tests that exercise them need a sandboxed working directory
//! and environment. These helpers run a closure inside a jail and hand its
//! result back as an `anyhow::Result`.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when the closure
/// returns an error.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Engine errors are `Arc<GenError>`, which figment cannot wrap directly.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over owned errors from map_err closures"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
