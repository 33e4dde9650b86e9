use crate::ports::outbound::{MetadataSource, PackageMetadata};
use crate::shared::error::RegistryError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for dependency lookups
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    name: String,
    version: String,
}

impl CacheKey {
    fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// CachingMetadataSource wraps a MetadataSource and adds in-memory caching.
///
/// Successful lookups are stored under the requested version and under the
/// concrete version the source reported, so `lodash@latest` followed by
/// `lodash@4.17.21` costs one request. Failures are never cached. The cache
/// is a `DashMap` and safe for the concurrent lookups of one tree level.
pub struct CachingMetadataSource<S: MetadataSource> {
    inner: S,
    cache: Arc<DashMap<CacheKey, PackageMetadata>>,
}

impl<S: MetadataSource> CachingMetadataSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<S: MetadataSource> MetadataSource for CachingMetadataSource<S> {
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError> {
        let key = CacheKey::new(name, version);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let metadata = self.inner.fetch_dependencies(name, version).await?;

        if metadata.version != version {
            self.cache
                .insert(CacheKey::new(name, &metadata.version), metadata.clone());
        }
        self.cache.insert(key, metadata.clone());

        Ok(metadata)
    }
}
