//! Runtime helpers for retry waits.

use std::time::Duration;

use async_trait::async_trait;

use super::RetrySleeper;

/// Tokio-based sleeper; suspends the task without holding a thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
