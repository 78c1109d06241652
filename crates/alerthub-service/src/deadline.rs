//! Bounded store round trips.

use std::future::Future;
use std::time::Duration;

use alerthub_core::result::AppResult;

/// Await `fut`, failing with `ServiceUnavailable` once `limit` elapses.
///
/// A timed-out call reports nothing about whether the write landed; callers
/// may retry.
pub(crate) async fn within<T>(limit: Duration, fut: impl Future<Output = AppResult<T>>) -> AppResult<T> {
    tokio::time::timeout(limit, fut).await?
}
