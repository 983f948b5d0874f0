//! Resilience primitives for provider clients.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration};

/// Per-provider rate limiter using a token-bucket approach.
///
/// Limits throughput to a configurable request rate by combining a
/// single-permit [`Semaphore`] with a fixed sleep interval.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    interval: Duration,
}

impl RateLimiter {
    /// Creates a `RateLimiter` allowing at most `requests` per second.
    pub fn per_second(requests: u32) -> Self {
        Self::with_interval(Duration::from_millis(1000 / u64::from(requests)))
    }

    /// Creates a `RateLimiter` allowing at most `requests` per minute.
    pub fn per_minute(requests: u32) -> Self {
        Self::with_interval(Duration::from_millis(60_000 / u64::from(requests)))
    }

    fn with_interval(interval: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            interval,
        }
    }

    /// Waits until a request slot is available, then holds the slot for
    /// the configured interval to enforce the rate limit.
    pub async fn acquire(&self) {
        // `acquire` only returns `Err` when the semaphore is closed,
        // which we never do, so `expect` is safe here.
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("rate-limiter semaphore unexpectedly closed");
        sleep(self.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals() {
        assert_eq!(
            RateLimiter::per_second(5).interval,
            Duration::from_millis(200)
        );
        assert_eq!(
            RateLimiter::per_minute(100).interval,
            Duration::from_millis(600)
        );
    }

    #[tokio::test]
    async fn test_acquire_enforces_interval() {
        let limiter = RateLimiter::per_second(100);
        let start = tokio::time::Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
