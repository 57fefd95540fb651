//! Bounded retry decorator for transports
//!
//! Only connection-level failures are retried. Timeouts, HTTP status errors
//! and upstream error codes are returned immediately.

use super::client::Transport;
use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

pub struct RetryTransport<T> {
    inner: T,
    retries: u32,
    delay: Duration,
}

impl<T: Transport> RetryTransport<T> {
    pub fn new(inner: T, retries: u32, delay: Duration) -> Self {
        Self {
            inner,
            retries,
            delay,
        }
    }

    pub fn from_settings(inner: T, settings: &OutgoingSettings) -> Self {
        Self::new(
            inner,
            settings.retries,
            Duration::from_millis(settings.retry_delay_ms),
        )
    }
}

#[async_trait]
impl<T: Transport> Transport for RetryTransport<T> {
    async fn execute(&self, request: EngineRequest, timeout: Duration) -> Result<EngineResponse> {
        let mut attempt = 0;
        loop {
            match self.inner.execute(request.clone(), timeout).await {
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!("Attempt {} failed: {}; retrying", attempt, err);
                    tokio::time::sleep(self.delay).await;
                }
                other => return other,
            }
        }
    }
}
