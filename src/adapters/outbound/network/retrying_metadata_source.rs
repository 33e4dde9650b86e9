use crate::ports::outbound::{MetadataSource, PackageMetadata};
use crate::shared::error::RegistryError;
use async_trait::async_trait;
use std::time::Duration;

/// Default number of extra attempts after a transport failure
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// RetryingMetadataSource wraps a MetadataSource and retries transient failures
///
/// Only `RegistryError::Network` is retried, with a linear backoff between
/// attempts. `NotFound` and `MalformedResponse` are returned immediately,
/// since asking again cannot change the answer.
pub struct RetryingMetadataSource<S: MetadataSource> {
    inner: S,
    max_retries: u32,
    backoff: Duration,
}

impl<S: MetadataSource> RetryingMetadataSource<S> {
    pub fn new(inner: S, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            backoff: Duration::from_millis(100),
        }
    }

    /// Base delay; attempt `n` waits `n * backoff`
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

#[async_trait]
impl<S: MetadataSource> MetadataSource for RetryingMetadataSource<S> {
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch_dependencies(name, version).await {
                Err(error) if error.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                result => return result,
            }
        }
    }
}
