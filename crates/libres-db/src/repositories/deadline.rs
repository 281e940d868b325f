//! Per-statement deadline enforcement.

use std::future::Future;
use std::time::Duration;

use libres_core::RepositoryError;
use tracing::warn;

/// The statement did not finish before its deadline.
#[derive(Debug, thiserror::Error)]
#[error("deadline of {timeout:?} elapsed")]
pub struct DeadlineExceeded {
    pub timeout: Duration,
}

/// Run a sqlx future under `timeout`.
///
/// Backend errors and deadline expiry both become
/// [`RepositoryError::Execution`] tagged with `operation`. Dropping the
/// returned future (for example under a shorter caller-side timeout) drops
/// the in-flight backend call with it.
pub async fn run_with_deadline<T, F>(
    operation: &'static str,
    timeout: Duration,
    fut: F,
) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(|e| RepositoryError::execution(operation, e)),
        Err(_) => {
            warn!("{operation} timed out after {timeout:?}");
            Err(RepositoryError::execution(
                operation,
                DeadlineExceeded { timeout },
            ))
        }
    }
}
