use crate::shared::error::RegistryError;
use async_trait::async_trait;
use std::sync::Arc;

/// Dependency declarations of one package release, as listed by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Concrete version the registry resolved the request to
    pub version: String,
    /// `(dependency name, version spec)` pairs in declaration order
    pub dependencies: Vec<(String, String)>,
}

impl PackageMetadata {
    pub fn new(version: impl Into<String>, dependencies: Vec<(String, String)>) -> Self {
        Self {
            version: version.into(),
            dependencies,
        }
    }
}

/// MetadataSource port for looking up declared dependencies
///
/// This port abstracts where package metadata comes from: the live registry
/// over HTTP, or a local fixture repository in test mode. The graph builder
/// only ever talks to this trait, so swapping sources never changes how the
/// graph is built.
///
/// # Async Support
/// Implementations must be `Send + Sync` so that lookups for one level of the
/// tree can run concurrently.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetches the direct dependencies of `name@version`
    ///
    /// # Arguments
    /// * `name` - Registry package identifier (non-empty)
    /// * `version` - Exact version or dist-tag such as `latest`
    ///
    /// # Errors
    /// - `RegistryError::NotFound` if the package or version does not exist
    /// - `RegistryError::Network` on transport failure (the only retryable kind)
    /// - `RegistryError::MalformedResponse` if the document cannot be understood
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError>;
}

#[async_trait]
impl<T: MetadataSource + ?Sized> MetadataSource for Box<T> {
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError> {
        (**self).fetch_dependencies(name, version).await
    }
}

#[async_trait]
impl<T: MetadataSource + ?Sized> MetadataSource for Arc<T> {
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError> {
        (**self).fetch_dependencies(name, version).await
    }
}
