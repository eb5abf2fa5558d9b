use std::future::Future;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Repeatedly runs `probe` until it yields `Some`, sleeping `interval`
/// between attempts.
///
/// Returns `Ok(None)` once `max_attempts` probes have come back empty. An
/// error from the probe ends the polling immediately; nothing is retried.
pub async fn poll_until<T, E, Fut, F>(
    probe: F,
    interval: Duration,
    max_attempts: usize,
) -> Result<Option<T>, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;
        if let Some(value) = probe().await? {
            return Ok(Some(value));
        }
        if attempt >= max_attempts {
            return Ok(None);
        }
        debug!(
            "Condition not met yet. Checking again in {:?} (attempt {}/{})",
            interval, attempt, max_attempts
        );
        sleep(interval).await;
    }
}
