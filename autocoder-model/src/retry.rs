//! Retries for transient provider failures.

use autocoder_core::ModelError;
use std::future::Future;
use std::time::Duration;

/// Exponential backoff applied to [`ModelError::is_transient`] failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Extra attempts after the first one. Zero turns retrying off.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Growth of the delay between retries; anything below 1 keeps it flat.
    pub backoff_multiplier: f32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the first delay and the ceiling every later delay is clamped to.
    pub fn with_delays(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_delay = initial;
        self.max_delay = max;
        self
    }

    pub fn with_backoff_multiplier(mut self, backoff_multiplier: f32) -> Self {
        self.backoff_multiplier = backoff_multiplier;
        self
    }

    /// Pause before retry number `retry`, counting from 1.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = f64::from(self.backoff_multiplier.max(1.0)).powi(exponent);
        Duration::try_from_secs_f64(self.initial_delay.as_secs_f64() * factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// Run `operation` until it succeeds, fails permanently or runs out of retries.
pub async fn execute_with_retry<T, Op, Fut>(
    config: &RetryConfig,
    mut operation: Op,
) -> Result<T, ModelError>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ModelError>>,
{
    let mut retry = 0;
    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };
        if retry >= config.max_retries || !error.is_transient() {
            return Err(error);
        }

        retry += 1;
        let delay = config.delay_for(retry);
        tracing::warn!(
            retry,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Transient provider error; retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
