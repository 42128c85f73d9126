use std::{fmt, future::Future};

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::ApiError;

/// Handle of a long-running remote operation
pub struct Poller<T = ()> {
    completion: BoxFuture<'static, Result<T, ApiError>>,
}

/// Failure while waiting for a long-running operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("{0}")]
    Failed(ApiError),
    #[error("the operation was cancelled")]
    Cancelled,
}

impl<T: Send + 'static> Poller<T> {
    /// Track the completion of `fut`
    pub fn new<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self {
            completion: Box::pin(fut),
        }
    }

    /// Operation that already reached a terminal state
    pub fn done(result: Result<T, ApiError>) -> Self {
        Self::new(futures::future::ready(result))
    }

    /// Wait until the operation reaches a terminal state
    ///
    /// Returns [`PollError::Cancelled`] as soon as `cancel` is triggered.
    pub async fn wait(self, cancel: &CancellationToken) -> Result<T, PollError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(PollError::Cancelled),
            result = self.completion => result.map_err(PollError::Failed),
        }
    }
}

impl<T> fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn completed_operation() {
        let poller = Poller::done(Ok(3));
        assert_eq!(poller.wait(&CancellationToken::new()).await, Ok(3));
    }

    #[tokio::test]
    async fn failed_operation() {
        let poller: Poller = Poller::done(Err(ApiError::new(500, "InternalError", "boom")));
        let err = poller.wait(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, PollError::Failed(e) if e.was_status(500)));
    }

    #[tokio::test]
    async fn cancellation_interrupts_wait() {
        let cancel = CancellationToken::new();
        let poller: Poller = Poller::new(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        });
        cancel.cancel();
        assert_eq!(poller.wait(&cancel).await, Err(PollError::Cancelled));
    }
}
