//! Request pacing between product detail fetches.

use crate::config::Config;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Gate awaited by the pipeline after each product.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Suspends until the next request may be made.
    async fn wait(&self);
}

/// Sleeps a fixed delay plus optional random jitter.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay_ms: u64,
    jitter_ms: u64,
}

impl FixedDelay {
    pub fn new(delay_ms: u64, jitter_ms: u64) -> Self {
        Self { delay_ms, jitter_ms }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.delay_ms, config.delay_jitter_ms)
    }

    /// Delay for the next wait, jitter included.
    pub fn next_delay(&self) -> Duration {
        let jitter = if self.jitter_ms > 0 { rand::random_range(0..=self.jitter_ms) } else { 0 };
        Duration::from_millis(self.delay_ms + jitter)
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn wait(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }

        debug!("Delaying {}ms", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {
    async fn wait(&self) {}
}
