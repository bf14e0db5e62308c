//! Transport retry policy
//!
//! Constant-delay retries used by the Transport Core: `retries + 1` attempts,
//! `delay` between attempts, no growth. This is deliberately separate from the
//! exponential helper in [`super::backoff`].

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::PhoenixError;

/// Which failures the transport retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryOn {
    /// Network errors, timeouts and every non-2xx status (4xx included).
    #[default]
    AllFailures,
    /// Network errors, timeouts, 408, 429 and 5xx.
    TransientOnly,
}

/// Constant-delay retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub retries: u32,
    /// Fixed wait between attempts
    pub delay: Duration,
    pub retry_on: RetryOn,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            delay: Duration::from_millis(1000),
            retry_on: RetryOn::AllFailures,
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self {
            retries,
            delay,
            retry_on: RetryOn::AllFailures,
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub const fn with_retry_on(mut self, retry_on: RetryOn) -> Self {
        self.retry_on = retry_on;
        self
    }

    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Delay before the attempt following `_attempt`; constant.
    pub const fn delay_for(&self, _attempt: u32) -> Duration {
        self.delay
    }

    /// Whether `error` is eligible for another attempt.
    ///
    /// Decode, serialization and configuration errors are local defects and
    /// never retried.
    pub fn should_retry(&self, error: &PhoenixError) -> bool {
        match error {
            PhoenixError::Transport(_) | PhoenixError::Timeout(_) => true,
            PhoenixError::Api { .. } => match self.retry_on {
                RetryOn::AllFailures => true,
                RetryOn::TransientOnly => error.is_transient(),
            },
            PhoenixError::Decode { .. }
            | PhoenixError::Serialization(_)
            | PhoenixError::Configuration(_)
            | PhoenixError::InvalidParameter(_) => false,
        }
    }

    /// Run `operation` under this policy. The closure receives the zero-based
    /// attempt index.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, PhoenixError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, PhoenixError>>,
    {
        self.execute_with_hook(operation, |_, _, _| {}).await
    }

    /// Like [`execute`](Self::execute), calling `on_retry(error, attempt, delay)`
    /// before each wait.
    pub async fn execute_with_hook<F, Fut, T, H>(
        &self,
        mut operation: F,
        mut on_retry: H,
    ) -> Result<T, PhoenixError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, PhoenixError>>,
        H: FnMut(&PhoenixError, u32, Duration),
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !self.should_retry(&error) {
                        return Err(error);
                    }
                    if attempt + 1 >= max_attempts {
                        tracing::warn!(target: "phoenix::http", attempts = max_attempts, err = %error, "retries exhausted");
                        return Err(error);
                    }
                    let delay = self.delay_for(attempt);
                    on_retry(&error, attempt, delay);
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
