use std::{future::Future, time::Duration};

use eyre::{Result, bail};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::warn;

const MAX_ATTEMPTS: u32 = 5;
const BACKOFF_STEP_MS: u64 = 500;

/// Repeats `operation` until it succeeds, the token is cancelled, or the
/// attempt budget runs out. Backoff between attempts grows linearly and is
/// interruptible, so cancellation returns control promptly.
pub async fn retry_until_success_or_cancelled<T, F, Fut>(
    cancel: &CancellationToken,
    mut operation: F,
    desc: &str,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                bail!("'{desc}' cancelled")
            }
            result = operation() => result,
        };

        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if attempt >= MAX_ATTEMPTS {
            return Err(err.wrap_err(format!("'{desc}' failed after {attempt} attempts")));
        }

        warn!("'{desc}' attempt {attempt} failed: {err}");

        tokio::select! {
            _ = cancel.cancelled() => {
                bail!("'{desc}' cancelled")
            }
            _ = sleep(Duration::from_millis(BACKOFF_STEP_MS * attempt as u64)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn returns_first_success() {
        let cancel = CancellationToken::new();
        let attempts = AtomicU32::new(0);

        let result = retry_until_success_or_cancelled(
            &cancel,
            || {
                let attempts = &attempts;
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                }
            },
            "instant success",
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let cancel = CancellationToken::new();
        let attempts = AtomicU32::new(0);

        let result = retry_until_success_or_cancelled(
            &cancel,
            || {
                let attempts = &attempts;
                async move {
                    let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if attempt < 3 {
                        bail!("transient error")
                    }
                    Ok("done")
                }
            },
            "flaky operation",
        )
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_attempt_budget() {
        let cancel = CancellationToken::new();
        let attempts = AtomicU32::new(0);

        let result: Result<()> = retry_until_success_or_cancelled(
            &cancel,
            || {
                let attempts = &attempts;
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    bail!("persistent error")
                }
            },
            "doomed operation",
        )
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_promptly_when_cancelled() {
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result: Result<()> = retry_until_success_or_cancelled(
            &cancel,
            || std::future::pending(),
            "hanging operation",
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("cancelled"));
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_retry_after_cancellation() {
        let cancel = CancellationToken::new();
        let attempts = AtomicU32::new(0);

        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        // The first attempt fails immediately, the backoff sleep outlives the
        // cancellation trigger, so no second attempt may start.
        let result: Result<()> = retry_until_success_or_cancelled(
            &cancel,
            || {
                let attempts = &attempts;
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    bail!("transient error")
                }
            },
            "cancelled mid-backoff",
        )
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
