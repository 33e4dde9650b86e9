//! Configuration file support for npm-deptree.
//!
//! Provides YAML-based configuration through `deptree.config.yml` files,
//! including data structures, file loading, and validation. Values from
//! the file sit between command-line flags and built-in defaults.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use npm_deptree::shared::security::read_regular_file;
use npm_deptree::shared::Result;

pub const CONFIG_FILENAME: &str = "deptree.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub registry: Option<String>,
    pub max_depth: Option<usize>,
    pub concurrency: Option<usize>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub ascii_tree: Option<bool>,
    pub output: Option<String>,
    /// Limit for the whole build in seconds
    pub build_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes to null; treat it as "no settings"
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref registry) = config.registry {
        if registry.trim().is_empty() {
            bail!(
                "Invalid config: registry must not be empty.\n\n\
                 💡 Hint: Remove the field to use https://registry.npmjs.org, or set a full URL."
            );
        }
    }
    if config.concurrency == Some(0) {
        bail!(
            "Invalid config: concurrency must be at least 1.\n\n\
             💡 Hint: Use 1 to issue registry requests one at a time."
        );
    }
    if config.timeout_secs == Some(0) {
        bail!("Invalid config: timeout_secs must be greater than 0.");
    }
    if config.build_timeout_secs == Some(0) {
        bail!(
            "Invalid config: build_timeout_secs must be greater than 0.\n\n\
             💡 Hint: Remove the field to let the build run without an overall limit."
        );
    }
    if let Some(ref output) = config.output {
        if output.trim().is_empty() {
            bail!("Invalid config: output must not be empty.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            "config.yml",
            r#"
registry: https://registry.example.com
max_depth: 4
concurrency: 16
timeout_secs: 30
max_retries: 5
ascii_tree: true
output: graph.dot
build_timeout_secs: 120
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.registry.as_deref(), Some("https://registry.example.com"));
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.concurrency, Some(16));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.max_retries, Some(5));
        assert_eq!(config.ascii_tree, Some(true));
        assert_eq!(config.output.as_deref(), Some("graph.dot"));
        assert_eq!(config.build_timeout_secs, Some(120));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, CONFIG_FILENAME, "max_depth: 2\n");

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.max_depth, Some(2));
        assert!(config.registry.is_none());
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_empty_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "empty.yml", "\n");

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.max_depth.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "bad.yml", "invalid: yaml: [[[broken");

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "config.yml", "max_depth: deep\n");

        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_zero_concurrency_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "config.yml", "concurrency: 0\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("concurrency must be at least 1"));
    }

    #[test]
    fn test_empty_registry_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "config.yml", "registry: \"  \"\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("registry must not be empty"));
    }

    #[test]
    fn test_zero_timeouts_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "a.yml", "timeout_secs: 0\n");
        assert!(load_config_from_path(&config_path).is_err());

        let config_path = write_config(&dir, "b.yml", "build_timeout_secs: 0\n");
        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "config.yml", "max_depth: 3\ncolour: blue\n");

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.max_depth, Some(3));
        assert!(config.unknown_fields.contains_key("colour"));
    }
}
