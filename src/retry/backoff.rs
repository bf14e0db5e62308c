//! Exponential backoff retries
//!
//! Standalone helper for caller-level operations (batches, multi-step
//! workflows). Waits `initial_delay * multiplier^attempt` after each failed
//! attempt except the last. The Transport Core does not use this; it has its
//! own constant-delay [`RetryPolicy`](super::RetryPolicy).

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Backoff policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Total attempts, including the first; 0 behaves as 1
    pub max_attempts: u32,
    /// Delay after the first failure
    pub initial_delay: Duration,
    pub multiplier: f64,
    /// Upper bound for a single delay
    pub max_delay: Option<Duration>,
    /// Maximum jitter as a fraction of the delay (0.0 disables jitter)
    pub jitter_factor: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            multiplier: 2.0,
            max_delay: None,
            jitter_factor: 0.0,
        }
    }
}

impl BackoffPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Default::default()
        }
    }

    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Enable jitter of up to `factor` (clamped to 0.0..=1.0) of each delay.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Delay after the failed attempt with zero-based index `attempt`.
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(0.0).powi(attempt.min(i32::MAX as u32) as i32);
        let nanos = self.initial_delay.as_nanos() as f64 * factor;
        let mut delay = if nanos.is_finite() && nanos < u64::MAX as f64 {
            Duration::from_nanos(nanos as u64)
        } else {
            Duration::from_nanos(u64::MAX)
        };
        if let Some(max) = self.max_delay {
            delay = delay.min(max);
        }
        if self.jitter_factor > 0.0 {
            delay = self.add_jitter(delay);
        }
        delay
    }

    fn add_jitter(&self, delay: Duration) -> Duration {
        let range = delay.as_millis() as f64 * self.jitter_factor;
        if range <= 0.0 {
            return delay;
        }
        let jitter = rand::thread_rng().gen_range(-range..=range);
        let millis = (delay.as_millis() as f64 + jitter).max(0.0);
        Duration::from_millis(millis as u64)
    }
}

/// Run `operation` up to `max_attempts` times with exponential backoff
/// (`initial_delay * 2^attempt`). The last error is returned as-is, without a
/// trailing delay.
pub async fn retry<F, Fut, T, E>(operation: F, max_attempts: u32, initial_delay: Duration) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_with_policy(operation, &BackoffPolicy::new(max_attempts, initial_delay)).await
}

/// Run `operation` under an explicit [`BackoffPolicy`].
pub async fn retry_with_policy<F, Fut, T, E>(mut operation: F, policy: &BackoffPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt + 1 >= max_attempts {
                    return Err(error);
                }
                let delay = policy.calculate_delay(attempt);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "operation failed, backing off");
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tracing_test::traced_test;

    #[test]
    fn delays_double_from_initial() {
        let policy = BackoffPolicy::new(5, Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(1), Duration::from_millis(200));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(400));
        assert_eq!(policy.calculate_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn max_delay_caps_growth() {
        let policy = BackoffPolicy::new(10, Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300));
        assert_eq!(policy.calculate_delay(5), Duration::from_millis(300));
        assert_eq!(
            BackoffPolicy::new(2, Duration::from_secs(1)).calculate_delay(200),
            Duration::from_nanos(u64::MAX)
        );
    }

    #[test]
    fn jitter_stays_within_factor() {
        let policy = BackoffPolicy::new(3, Duration::from_millis(1000)).with_jitter(0.1);
        for _ in 0..50 {
            let d = policy.calculate_delay(0);
            assert!(d >= Duration::from_millis(900) && d <= Duration::from_millis(1100));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt_after_backoff() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = tokio::time::Instant::now();

        let result = retry(
            || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 { Err(format!("failure {n}")) } else { Ok("done") }
                }
            },
            3,
            Duration::from_millis(100),
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(350), "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), String> = retry(
            || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(format!("failure {n}"))
                }
            },
            3,
            Duration::from_millis(100),
        )
        .await;

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn logs_each_backoff() {
        let calls = AtomicU32::new(0);
        let _: Result<(), &str> = retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("busy") }
            },
            2,
            Duration::from_millis(5),
        )
        .await;
        assert!(logs_contain("operation failed, backing off"));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<(), &str> = retry(
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err("nope")
                }
            },
            0,
            Duration::from_millis(10),
        )
        .await;
        assert_eq!(result, Err("nope"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
