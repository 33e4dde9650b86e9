use super::registry_document::RegistryDocument;
use crate::ports::outbound::{MetadataSource, PackageMetadata};
use crate::shared::error::RegistryError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// NpmRegistryClient adapter for reading packuments over HTTP
///
/// This adapter implements the MetadataSource port against any
/// npm-compatible registry. Each lookup issues exactly one
/// `GET {base_url}/{name}` request; retries are left to
/// `RetryingMetadataSource`.
pub struct NpmRegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistryClient {
    /// Creates a client for the registry at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Registry root, e.g. `https://registry.npmjs.org`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!(
                "Registry URL must start with http:// or https:// (got '{}')",
                base_url
            );
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("npm-deptree/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the packument URL, rejecting names that could escape the path
    fn package_url(&self, name: &str) -> std::result::Result<String, &'static str> {
        if name.is_empty() {
            return Err("empty package name");
        }
        if name.contains("..") || name.contains('\\') || name.contains('#') || name.contains('?')
        {
            return Err("package name contains URL-unsafe characters");
        }

        // Scoped names keep their '@' and encode the slash: @scope%2Fname
        let path = match name.strip_prefix('@') {
            Some(scoped) => format!("@{}", urlencoding::encode(scoped)),
            None if name.contains('/') => return Err("only scoped package names may contain '/'"),
            None => urlencoding::encode(name).into_owned(),
        };

        Ok(format!("{}/{}", self.base_url, path))
    }

    async fn fetch_document(
        &self,
        name: &str,
        version: &str,
    ) -> std::result::Result<RegistryDocument, RegistryError> {
        let not_found = || RegistryError::NotFound {
            name: name.to_string(),
            version: version.to_string(),
        };
        // A name that cannot form a registry path cannot exist in the registry
        let url = self.package_url(name).map_err(|_| not_found())?;
        let network = |details: String| RegistryError::Network {
            url: url.clone(),
            details,
        };

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(not_found());
        }
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(network(format!("registry returned status code {}", status)));
        }
        if !status.is_success() {
            return Err(RegistryError::MalformedResponse {
                name: name.to_string(),
                details: format!("unexpected status code {}", status),
            });
        }

        let body = response.text().await.map_err(|e| network(e.to_string()))?;
        RegistryDocument::parse(name, &body)
    }
}

// Note: no Default implementation, since building the HTTP client can fail.

#[async_trait]
impl MetadataSource for NpmRegistryClient {
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> std::result::Result<PackageMetadata, RegistryError> {
        let document = self.fetch_document(name, version).await?;
        document.dependencies_for(name, version)
    }
}
