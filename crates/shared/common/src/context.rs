//! Per-request context carried from the transport down to storage calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};

/// Cancellation and deadline of one inbound request.
///
/// Cloning shares the cancellation token.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Derive a context that is cancelled together with this one
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Run one storage call under this context.
    ///
    /// Fails fast with a storage error when the context is cancelled or its
    /// deadline passes before `operation` completes; `operation` is dropped
    /// at that point.
    pub async fn run<F, T, E>(&self, name: &str, operation: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, E>>,
        AppError: From<E>,
    {
        if self.is_cancelled() {
            return Err(AppError::storage(format!("{name}: request cancelled")));
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::warn!(operation = name, "Request cancelled during storage call");
                Err(AppError::storage(format!("{name}: request cancelled")))
            }
            _ = expire(self.deadline) => {
                tracing::warn!(operation = name, "Request deadline exceeded during storage call");
                Err(AppError::storage(format!("{name}: deadline exceeded")))
            }
            result = operation => result.map_err(AppError::from),
        }
    }
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
