use crate::dependency_tree::domain::PackageRef;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A build that finishes with warnings still exits with `Success`; the
/// warnings are annotated in the rendered tree instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The graph was built and rendered
    Success = 0,
    /// The build was aborted (unreachable registry, missing root, timeout)
    BuildAborted = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config file, fixture file, output file, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error returned by the application layer
    pub fn for_error(error: &anyhow::Error) -> Self {
        if error.downcast_ref::<BuildError>().is_some() {
            ExitCode::BuildAborted
        } else {
            ExitCode::ApplicationError
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::BuildAborted => write!(f, "Build Aborted (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors produced by a metadata source for a single `(name, version)` lookup.
///
/// The variants are kept distinct so that callers can decide whether to
/// retry (`Network`), abort, or record a warning and continue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{name}@{version} was not found in the registry")]
    NotFound { name: String, version: String },

    #[error("Network error while requesting {url}: {details}")]
    Network { url: String, details: String },

    #[error("Malformed registry response for {name}: {details}")]
    MalformedResponse { name: String, details: String },
}

impl RegistryError {
    /// Only transport failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistryError::Network { .. })
    }
}

/// Errors produced while turning a declared dependency spec into a fetchable version
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Unresolvable version spec '{spec}': {reason}")]
    UnresolvableSpec { spec: String, reason: String },
}

/// Why a build could not produce any graph at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The registry could not be reached for the root package
    RegistryUnreachable(String),
    /// The root package or the requested version does not exist
    RootNotFound,
    /// The registry answered, but the root document could not be understood
    MalformedRoot(String),
    /// The requested root version is not a usable version spec
    UnresolvableRoot(String),
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::RegistryUnreachable(details) => {
                write!(f, "registry is unreachable ({})", details)
            }
            AbortReason::RootNotFound => write!(f, "package or version does not exist"),
            AbortReason::MalformedRoot(details) => {
                write!(f, "registry returned a malformed document ({})", details)
            }
            AbortReason::UnresolvableRoot(details) => {
                write!(f, "requested version is invalid ({})", details)
            }
        }
    }
}

impl AbortReason {
    fn hint(&self) -> &'static str {
        match self {
            AbortReason::RegistryUnreachable(_) => {
                "Check the --repo URL and your network connection"
            }
            AbortReason::RootNotFound => "Check the package name and --version value",
            AbortReason::MalformedRoot(_) => {
                "Make sure --repo points at an npm-compatible registry"
            }
            AbortReason::UnresolvableRoot(_) => {
                "Use an exact version (e.g. 1.2.3) or a dist-tag such as 'latest'"
            }
        }
    }
}

/// Errors that stop a graph build without returning a partial graph
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Failed to build dependency graph for {root}: {reason}\n\n💡 Hint: {}", .reason.hint())]
    FatalBuildAbort { root: PackageRef, reason: AbortReason },

    #[error("Dependency graph build was cancelled")]
    Cancelled,

    #[error("Dependency graph build timed out after {seconds}s\n\n💡 Hint: Lower --max-depth or raise build_timeout_secs in the config file")]
    TimedOut { seconds: u64 },
}

/// Application-level errors outside of the graph build itself.
#[derive(Debug, Error)]
pub enum DeptreeError {
    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to load fixture repository: {path}\nDetails: {details}\n\n💡 Hint: In test mode --repo must point at a local .txt or .json fixture file")]
    FixtureError { path: PathBuf, details: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}
