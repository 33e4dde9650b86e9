use crate::adapters::outbound::network::RegistryDocument;
use crate::ports::outbound::{MetadataSource, PackageMetadata};
use crate::shared::error::{DeptreeError, RegistryError};
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Spec given to a dependency listed without one in the line format
const DEFAULT_DEPENDENCY_SPEC: &str = "latest";

/// One `name[@version]: deps` line of a line-format fixture
#[derive(Debug, Clone)]
struct DeclaredRelease {
    /// `None` matches any requested version
    version: Option<String>,
    dependencies: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
enum FixturePackage {
    Declared(Vec<DeclaredRelease>),
    Document(RegistryDocument),
}

/// FixtureMetadataSource adapter serving canned metadata in test mode
///
/// Two fixture formats are accepted:
///
/// ```text
/// # line format
/// express@4.19.2: body-parser@1.20.2, accepts@~1.3.8
/// accepts: mime-types negotiator
/// ```
///
/// and a JSON object mapping package names to registry documents
/// (`versions` plus optional `dist-tags`), exactly as the live registry
/// serves them. Lookups fail with `RegistryError::NotFound` like the live
/// client would.
#[derive(Debug, Clone)]
pub struct FixtureMetadataSource {
    packages: HashMap<String, FixturePackage>,
}

impl FixtureMetadataSource {
    /// Loads a fixture file; `.json` files use the JSON format, anything else
    /// the line format
    pub fn from_path(path: &Path) -> Result<Self> {
        let fixture_error = |details: String| DeptreeError::FixtureError {
            path: path.to_path_buf(),
            details,
        };

        let content = read_regular_file(path, "fixture repository")
            .map_err(|e| fixture_error(e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_lines(&content)
        };

        parsed.map_err(|details| fixture_error(details).into())
    }

    /// Parses the line format. Errors carry the 1-based line number.
    pub fn from_lines(content: &str) -> std::result::Result<Self, String> {
        let mut packages: HashMap<String, FixturePackage> = HashMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = match raw_line.split_once('#') {
                Some((before, _)) => before,
                None => raw_line,
            };
            let Some((package, declared)) = line.split_once(':') else {
                continue;
            };

            let (name, version) = split_name_version(package.trim());
            if name.is_empty() {
                return Err(format!("line {}: missing package name", index + 1));
            }
            if version.is_some_and(str::is_empty) {
                return Err(format!("line {}: empty version after '@'", index + 1));
            }

            let dependencies = declared
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| match split_name_version(token) {
                    (dependency, Some(spec)) if !spec.is_empty() => {
                        (dependency.to_string(), spec.to_string())
                    }
                    (dependency, _) => {
                        (dependency.to_string(), DEFAULT_DEPENDENCY_SPEC.to_string())
                    }
                });

            let entry = packages
                .entry(name.to_string())
                .or_insert_with(|| FixturePackage::Declared(Vec::new()));
            let FixturePackage::Declared(releases) = entry else {
                continue;
            };

            let version = version.map(str::to_string);
            match releases.iter_mut().find(|release| release.version == version) {
                Some(release) => release.dependencies.extend(dependencies),
                None => releases.push(DeclaredRelease {
                    version,
                    dependencies: dependencies.collect(),
                }),
            }
        }

        Ok(Self { packages })
    }

    /// Parses the JSON format: `{ "<name>": <registry document>, ... }`
    pub fn from_json(content: &str) -> std::result::Result<Self, String> {
        let documents: Map<String, Value> =
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;

        let packages = documents
            .into_iter()
            .map(|(name, document)| {
                serde_json::from_value::<RegistryDocument>(document)
                    .map(|document| (name.clone(), FixturePackage::Document(document)))
                    .map_err(|e| format!("package '{}': {}", name, e))
            })
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;

        Ok(Self { packages })
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    fn lookup_declared(
        releases: &[DeclaredRelease],
        version: &str,
    ) -> Option<PackageMetadata> {
        let exact = releases
            .iter()
            .find(|release| release.version.as_deref() == Some(version));
        let any_version = || releases.iter().find(|release| release.version.is_none());
        // "latest" falls back to the last release declared with a version
        let latest = || {
            (version == DEFAULT_DEPENDENCY_SPEC)
                .then(|| releases.iter().rev().find(|release| release.version.is_some()))
                .flatten()
        };

        exact.or_else(any_version).or_else(latest).map(|release| {
            let concrete = release.version.as_deref().unwrap_or(version);
            PackageMetadata::new(concrete, release.dependencies.clone())
        })
    }
}

/// Splits `name@version` at the last `@` that is not the scope marker
fn split_name_version(token: &str) -> (&str, Option<&str>) {
    match token.rfind('@') {
        Some(at) if at > 0 => (&token[..at], Some(&token[at + 1..])),
        _ => (token, None),
    }
}

#[async_trait]
impl MetadataSource for FixtureMetadataSource {
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> std::result::Result<PackageMetadata, RegistryError> {
        let not_found = || RegistryError::NotFound {
            name: name.to_string(),
            version: version.to_string(),
        };

        match self.packages.get(name) {
            None => Err(not_found()),
            Some(FixturePackage::Document(document)) => document.dependencies_for(name, version),
            Some(FixturePackage::Declared(releases)) => {
                Self::lookup_declared(releases, version).ok_or_else(not_found)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LINES: &str = "\
# sample repository
app@1.0.0: lib@^2.0.0, util
lib@2.0.0: @scope/shared@1.1.0 util@latest
util: # no dependencies
@scope/shared@1.1.0:
not a package line
";

    fn names(metadata: &PackageMetadata) -> Vec<(&str, &str)> {
        metadata
            .dependencies
            .iter()
            .map(|(n, s)| (n.as_str(), s.as_str()))
            .collect()
    }

    #[tokio::test]
    async fn test_line_format_exact_version() {
        let source = FixtureMetadataSource::from_lines(LINES).unwrap();
        assert_eq!(source.package_count(), 4);

        let app = source.fetch_dependencies("app", "1.0.0").await.unwrap();
        assert_eq!(app.version, "1.0.0");
        assert_eq!(names(&app), vec![("lib", "^2.0.0"), ("util", "latest")]);

        let lib = source.fetch_dependencies("lib", "2.0.0").await.unwrap();
        assert_eq!(
            names(&lib),
            vec![("@scope/shared", "1.1.0"), ("util", "latest")]
        );
    }

    #[tokio::test]
    async fn test_line_format_versionless_entry_matches_any_version() {
        let source = FixtureMetadataSource::from_lines(LINES).unwrap();

        let util = source.fetch_dependencies("util", "3.1.4").await.unwrap();
        assert_eq!(util.version, "3.1.4");
        assert!(util.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_line_format_latest_uses_last_declared_version() {
        let source = FixtureMetadataSource::from_lines("a@1.0.0: b\na@2.0.0: c\n").unwrap();

        let latest = source.fetch_dependencies("a", "latest").await.unwrap();
        assert_eq!(latest.version, "2.0.0");
        assert_eq!(names(&latest), vec![("c", "latest")]);
    }

    #[tokio::test]
    async fn test_line_format_unknown_is_not_found() {
        let source = FixtureMetadataSource::from_lines(LINES).unwrap();

        assert_eq!(
            source.fetch_dependencies("app", "9.9.9").await.unwrap_err(),
            RegistryError::NotFound {
                name: "app".to_string(),
                version: "9.9.9".to_string(),
            }
        );
        assert!(source.fetch_dependencies("ghost", "1.0.0").await.is_err());
    }

    #[tokio::test]
    async fn test_line_format_repeated_entry_appends() {
        let source = FixtureMetadataSource::from_lines("a@1.0.0: b\na@1.0.0: c\n").unwrap();
        let a = source.fetch_dependencies("a", "1.0.0").await.unwrap();
        assert_eq!(names(&a), vec![("b", "latest"), ("c", "latest")]);
    }

    #[test]
    fn test_line_format_rejects_missing_name() {
        let err = FixtureMetadataSource::from_lines("a: b\n: c\n").unwrap_err();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_split_name_version() {
        assert_eq!(split_name_version("a@1.0.0"), ("a", Some("1.0.0")));
        assert_eq!(split_name_version("@s/a"), ("@s/a", None));
        assert_eq!(split_name_version("@s/a@^1.0.0"), ("@s/a", Some("^1.0.0")));
        assert_eq!(split_name_version("a"), ("a", None));
    }

    #[tokio::test]
    async fn test_json_format_matches_registry_documents() {
        let json = r#"{
            "a": {
                "dist-tags": { "latest": "1.0.0" },
                "versions": { "1.0.0": { "dependencies": { "b": "1.0.0" } } }
            },
            "b": { "versions": { "1.0.0": {} } }
        }"#;
        let source = FixtureMetadataSource::from_json(json).unwrap();

        let a = source.fetch_dependencies("a", "latest").await.unwrap();
        assert_eq!(a.version, "1.0.0");
        assert_eq!(names(&a), vec![("b", "1.0.0")]);

        assert!(source.fetch_dependencies("b", "2.0.0").await.is_err());
    }

    #[test]
    fn test_json_format_rejects_document_without_versions() {
        let err = FixtureMetadataSource::from_json(r#"{"a": {"name": "a"}}"#).unwrap_err();
        assert!(err.contains("package 'a'"));
    }

    #[test]
    fn test_from_path_selects_format_by_extension() {
        let temp_dir = TempDir::new().unwrap();

        let txt = temp_dir.path().join("repo.txt");
        fs::write(&txt, "a@1.0.0: b\n").unwrap();
        assert_eq!(FixtureMetadataSource::from_path(&txt).unwrap().package_count(), 1);

        let json = temp_dir.path().join("repo.json");
        fs::write(&json, r#"{"a": {"versions": {}}, "b": {"versions": {}}}"#).unwrap();
        assert_eq!(FixtureMetadataSource::from_path(&json).unwrap().package_count(), 2);
    }

    #[test]
    fn test_from_path_missing_file_is_fixture_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = FixtureMetadataSource::from_path(&temp_dir.path().join("none.txt")).unwrap_err();

        assert!(err.downcast_ref::<DeptreeError>().is_some());
        assert!(err.to_string().contains("none.txt"));
    }
}
