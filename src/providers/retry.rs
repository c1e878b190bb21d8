//! Retry configuration, delay calculation, and the handler decorator.
//!
//! Provides [`RetryConfig`] for controlling retry behaviour and
//! [`RetryingHandler`], which wraps any [`ApiHandler`] with automatic retry
//! on transient errors.
//!
//! Retries wrap request construction only. A stream that fails part way is
//! never resumed or re-issued, since chunks have already reached the caller.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::traits::{ApiHandler, ChunkStream};
use crate::telemetry;
use crate::types::{Message, ResolvedModel};
use crate::Result;

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff, capped at `max_delay`:
///
/// ```rust
/// # use venice::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 30s.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// Uses exponential backoff: `initial_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Calculate the effective delay, respecting server `retry-after` hints.
    ///
    /// A hint (from a `RateLimited` error) takes precedence over the
    /// calculated backoff, but is still capped at `max_delay`.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after
            .map(|d| d.min(self.max_delay))
            .unwrap_or_else(|| self.delay_for_attempt(attempt))
    }
}

/// Execute an async operation with retry logic.
///
/// Retries on transient errors (as classified by [`VeniceError::is_transient()`](crate::VeniceError::is_transient))
/// up to `config.max_attempts`. Permanent errors are returned immediately.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, operation: &str, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt + 1 < attempts => {
                let delay = config.effective_delay(attempt, e.retry_after());
                metrics::counter!(telemetry::RETRIES_TOTAL, "operation" => operation.to_owned())
                    .increment(1);
                warn!(
                    operation,
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying after transient error"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Decorator that wraps an [`ApiHandler`] with retry logic.
///
/// Only the call that opens the stream is retried; errors yielded by the
/// stream itself pass through untouched.
pub struct RetryingHandler {
    inner: Arc<dyn ApiHandler>,
    config: RetryConfig,
}

impl RetryingHandler {
    /// Wrap a handler with retry logic.
    pub fn new(inner: Arc<dyn ApiHandler>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl ApiHandler for RetryingHandler {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<ChunkStream> {
        with_retry(&self.config, "create_message", || {
            self.inner.create_message(system_prompt, messages)
        })
        .await
    }

    fn model(&self) -> ResolvedModel {
        self.inner.model()
    }
}
