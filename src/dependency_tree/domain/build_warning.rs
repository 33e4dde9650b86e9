use super::PackageRef;
use crate::shared::error::{RegistryError, VersionError};

/// Category of a recoverable, per-node failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    NotFound,
    Network,
    MalformedResponse,
    UnresolvableSpec,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::NotFound => write!(f, "not found"),
            WarningKind::Network => write!(f, "network error"),
            WarningKind::MalformedResponse => write!(f, "malformed response"),
            WarningKind::UnresolvableSpec => write!(f, "unresolvable spec"),
        }
    }
}

/// A failure recorded against a single package during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    package: PackageRef,
    kind: WarningKind,
    reason: String,
}

impl BuildWarning {
    pub fn new(package: PackageRef, kind: WarningKind, reason: impl Into<String>) -> Self {
        Self {
            package,
            kind,
            reason: reason.into(),
        }
    }

    pub fn from_registry_error(package: PackageRef, error: &RegistryError) -> Self {
        let kind = match error {
            RegistryError::NotFound { .. } => WarningKind::NotFound,
            RegistryError::Network { .. } => WarningKind::Network,
            RegistryError::MalformedResponse { .. } => WarningKind::MalformedResponse,
        };
        Self::new(package, kind, error.to_string())
    }

    pub fn from_version_error(package: PackageRef, error: &VersionError) -> Self {
        Self::new(package, WarningKind::UnresolvableSpec, error.to_string())
    }

    pub fn package(&self) -> &PackageRef {
        &self.package
    }

    pub fn kind(&self) -> WarningKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.package, self.kind, self.reason)
    }
}
