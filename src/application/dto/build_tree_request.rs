use crate::adapters::outbound::network::{DEFAULT_MAX_RETRIES, DEFAULT_REGISTRY_URL};
use crate::dependency_tree::domain::{PackageName, PackageRef};
use crate::dependency_tree::services::DEFAULT_CONCURRENCY;
use crate::shared::error::DeptreeError;
use crate::shared::Result;
use std::time::Duration;

pub const DEFAULT_VERSION: &str = "latest";
pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// BuildTreeRequest - the resolved configuration for one build
///
/// In test mode `registry` is the path of a fixture file rather than a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTreeRequest {
    pub package_name: PackageName,
    pub version: String,
    pub registry: String,
    pub max_depth: usize,
    pub test_mode: bool,
    pub concurrency: usize,
    pub request_timeout: Duration,
    pub max_retries: u32,
    /// Overall limit for the whole build; `None` means unbounded
    pub build_timeout: Option<Duration>,
}

impl BuildTreeRequest {
    pub fn builder(package_name: impl Into<String>) -> BuildTreeRequestBuilder {
        BuildTreeRequestBuilder::new(package_name)
    }

    /// The package/version the build starts from
    pub fn root(&self) -> PackageRef {
        PackageRef::new(self.package_name.as_str(), self.version.as_str())
    }
}

/// Builder for [`BuildTreeRequest`]; every field except the package name
/// has a default
#[derive(Debug, Clone)]
pub struct BuildTreeRequestBuilder {
    package_name: String,
    version: String,
    registry: String,
    max_depth: usize,
    test_mode: bool,
    concurrency: usize,
    request_timeout: Duration,
    max_retries: u32,
    build_timeout: Option<Duration>,
}

impl BuildTreeRequestBuilder {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            version: DEFAULT_VERSION.to_string(),
            registry: DEFAULT_REGISTRY_URL.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            test_mode: false,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            build_timeout: None,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = registry.into();
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn build_timeout(mut self, build_timeout: Option<Duration>) -> Self {
        self.build_timeout = build_timeout;
        self
    }

    /// Validates and builds the request
    ///
    /// # Errors
    /// `DeptreeError::Validation` for an invalid package name, an empty
    /// version or registry, zero concurrency or a zero timeout.
    pub fn build(self) -> Result<BuildTreeRequest> {
        let package_name =
            PackageName::new(self.package_name).map_err(|e| validation(e.to_string()))?;

        let version = self.version.trim().to_string();
        if version.is_empty() {
            return Err(validation("Version cannot be empty").into());
        }

        let registry = self.registry.trim().to_string();
        if registry.is_empty() {
            return Err(validation(if self.test_mode {
                "Test mode requires --repo to name a fixture file"
            } else {
                "Registry URL cannot be empty"
            })
            .into());
        }

        if self.concurrency == 0 {
            return Err(validation("Concurrency must be at least 1").into());
        }

        if self.request_timeout.is_zero() {
            return Err(validation("Request timeout must be greater than zero").into());
        }

        if self.build_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(validation("Build timeout must be greater than zero").into());
        }

        Ok(BuildTreeRequest {
            package_name,
            version,
            registry,
            max_depth: self.max_depth,
            test_mode: self.test_mode,
            concurrency: self.concurrency,
            request_timeout: self.request_timeout,
            max_retries: self.max_retries,
            build_timeout: self.build_timeout,
        })
    }
}

fn validation(message: impl Into<String>) -> DeptreeError {
    DeptreeError::Validation {
        message: message.into(),
    }
}
