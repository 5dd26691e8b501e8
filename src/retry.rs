//! Bounded-backoff retry around retryable remote calls.
//!
//! The identity backend behind the management API is eventually
//! consistent: a freshly created IAM principal may not yet be visible to
//! the log-source provisioning path, surfacing as a transient auth
//! failure. Create and update calls are wrapped in [`retry_with_backoff`]
//! with [`is_transient_auth`] as the policy; everything else fails on the
//! first attempt.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::SourceError;

/// How long a call may keep retrying transient auth failures.
pub const TRANSIENT_AUTH_CEILING: Duration = Duration::from_secs(120);

const INITIAL_DELAY: Duration = Duration::from_millis(500);
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Retry policy for the transient-auth error class.
pub fn is_transient_auth(err: &SourceError) -> bool {
    err.is_transient_auth()
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// ceiling elapses.
///
/// Backoff starts at 500ms and doubles up to a 10s cap. The loop never
/// sleeps past the ceiling: when the next delay would cross it, the last
/// error is surfaced instead. Sleeps are awaited on the calling task;
/// there is no cancellation hook beyond dropping the future.
pub async fn retry_with_backoff<T, F, Fut>(
    ceiling: Duration,
    should_retry: impl Fn(&SourceError) -> bool,
    mut op: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let deadline = Instant::now() + ceiling;
    let mut delay = INITIAL_DELAY;
    let mut attempt: u32 = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if should_retry(&err) => {
                if Instant::now() + delay >= deadline {
                    debug!(attempt, %err, "retry ceiling reached, surfacing error");
                    return Err(err);
                }
                debug!(attempt, delay_ms = delay.as_millis() as u64, %err, "retrying");
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
