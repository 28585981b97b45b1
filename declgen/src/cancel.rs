//! Cooperative cancellation shared between a host and a running pass.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{GenError, GenResult};

/// Cloneable cancellation signal.
///
/// Every pipeline stage calls [`CancellationToken::check`] on entry. Once the
/// token is cancelled the stage returns [`GenError::Cancelled`] instead of
/// output, so callers never observe a partially generated unit.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. All clones observe the request.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Fail with [`GenError::Cancelled`] when cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Cancelled`] if the token is cancelled.
    pub fn check(&self) -> GenResult<()> {
        if self.is_cancelled() {
            Err(GenError::cancelled())
        } else {
            Ok(())
        }
    }
}
