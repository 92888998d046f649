//! Bounded retry with a fixed delay

use crate::config::RetryConfig;
use crate::HarvestError;
use std::future::Future;
use std::time::Duration;

/// Fixed-delay retry policy
///
/// An operation is attempted at most `max_attempts` times. Only transient
/// errors (see [`HarvestError::is_transient`]) trigger another attempt; the
/// delay is slept between attempts, never after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.delay_ms))
    }

    /// Runs `operation` until it succeeds, fails permanently, or runs out of attempts
    ///
    /// # Arguments
    ///
    /// * `label` - Name of the unit of work, used in log messages
    /// * `operation` - Produces a fresh attempt each time it is called
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - An attempt succeeded
    /// * `Err(e)` - A non-transient error, returned as-is on first sight
    /// * `Err(RetriesExhausted)` - Every attempt failed transiently
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, HarvestError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, HarvestError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!("{} succeeded on attempt {}", label, attempt);
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {}",
                        label,
                        attempt,
                        self.max_attempts,
                        e
                    );

                    if attempt >= self.max_attempts {
                        return Err(HarvestError::RetriesExhausted {
                            label: label.to_string(),
                            attempts: attempt,
                            source: Box::new(e),
                        });
                    }

                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}
