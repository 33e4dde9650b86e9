use crate::shared::Result;

/// npm caps package names at 214 characters
const MAX_PACKAGE_NAME_LENGTH: usize = 214;

/// Identity of one package release: the `(name, version)` pair.
///
/// Two refs with an equal pair are the same graph node. The version is
/// whatever was requested (an exact version or a dist-tag such as `latest`),
/// not necessarily the concrete version the registry resolved it to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageRef {
    name: String,
    version: String,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for PackageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// NewType wrapper for a user-supplied root package name with validation
///
/// Names discovered in registry documents are taken as-is; only the name the
/// user asks for is validated up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        // Scoped packages look like "@scope/name"; the slash is only valid there
        let bare = match name.strip_prefix('@') {
            Some(scoped) => {
                let (scope, rest) = scoped.split_once('/').ok_or_else(|| {
                    anyhow::anyhow!("Scoped package name '{}' must look like @scope/name", name)
                })?;
                if scope.is_empty() || rest.is_empty() {
                    anyhow::bail!("Scoped package name '{}' must look like @scope/name", name);
                }
                format!("{}{}", scope, rest)
            }
            None => name.clone(),
        };

        if bare.starts_with('.') || bare.starts_with('_') {
            anyhow::bail!("Package name cannot start with '.' or '_'");
        }

        if !bare
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
        {
            anyhow::bail!(
                "Package name contains invalid characters. Only alphanumeric, hyphens, underscores, dots and tildes are allowed."
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
