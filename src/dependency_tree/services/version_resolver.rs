use crate::shared::error::VersionError;

/// Maximum length for a version spec (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// VersionResolver service for turning a declared spec into a fetchable version
///
/// No semver range math happens here. A literal version or dist-tag passes
/// through unchanged and the registry disambiguates it; leading range
/// operators (`^1.2.3`, `~1.2.3`, `>=1.2.3`) are stripped so the remaining
/// version can be requested literally.
pub struct VersionResolver;

impl VersionResolver {
    /// Resolves `spec` to the version string used for the next lookup
    ///
    /// # Errors
    /// `VersionError::UnresolvableSpec` when the spec is empty, a compound
    /// range, a URL/git/path/alias spec, too long, or contains characters the
    /// registry cannot accept.
    pub fn resolve_version(spec: &str) -> Result<String, VersionError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(Self::unresolvable(spec, "version spec is empty"));
        }

        if trimmed.contains("||") || trimmed.contains(char::is_whitespace) {
            return Err(Self::unresolvable(spec, "compound ranges are not supported"));
        }

        if trimmed.contains(':') || trimmed.contains('/') || trimmed.contains('\\') {
            return Err(Self::unresolvable(
                spec,
                "URL, git, path and alias specs cannot be fetched from the registry",
            ));
        }

        let stripped = Self::strip_range_operators(trimmed);
        if stripped.is_empty() {
            return Err(Self::unresolvable(spec, "no version after range operator"));
        }

        if stripped.len() > MAX_VERSION_LENGTH {
            return Err(Self::unresolvable(
                spec,
                &format!("longer than {} bytes", MAX_VERSION_LENGTH),
            ));
        }

        if !stripped
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '*' | '_'))
        {
            return Err(Self::unresolvable(spec, "contains invalid characters"));
        }

        Ok(stripped.to_string())
    }

    /// `^`, `~`, `=`, `<`, `>` in any combination, then an optional `v`
    /// when it is directly followed by a digit (`v1.2.3`)
    fn strip_range_operators(spec: &str) -> &str {
        let rest = spec.trim_start_matches(['^', '~', '=', '<', '>']);
        match rest.strip_prefix('v') {
            Some(after) if after.starts_with(|c: char| c.is_ascii_digit()) => after,
            _ => rest,
        }
    }

    fn unresolvable(spec: &str, reason: &str) -> VersionError {
        VersionError::UnresolvableSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        }
    }
}
