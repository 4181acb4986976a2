//! Bounded retry with linear backoff
//!
//! Both page fetches and navigation discovery go through [`RetryPolicy::run`].
//! After failed attempt `n` the policy sleeps `delay * n` before trying
//! again; no sleep follows the final attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Attempt budget and backoff unit for a retried operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy; an attempt budget of zero is raised to one
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Total number of attempts
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Sleep after failed attempt `attempt` (1-based), saturating at `Duration::MAX`
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt)
    }

    /// Runs `op` until it succeeds or the attempt budget is spent
    ///
    /// `op` receives the 1-based attempt number. The error of the last
    /// attempt is returned once every attempt has failed.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.attempts => {
                    let wait = self.backoff(attempt);
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt,
                        self.attempts,
                        what,
                        e,
                        wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt,
                        self.attempts,
                        what,
                        e
                    );
                    return Err(e);
                }
            }
        }
    }
}
