use crate::ports::outbound::PackageMetadata;
use crate::shared::error::RegistryError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Packument returned by `GET {registry}/{name}`
///
/// Only the fields needed to list dependencies are read. `versions` must be
/// present; `dist-tags` is optional. Maps keep document order (serde_json's
/// `preserve_order`), which is what makes dependency order deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryDocument {
    versions: Map<String, Value>,
    #[serde(default, rename = "dist-tags")]
    dist_tags: HashMap<String, String>,
}

impl RegistryDocument {
    /// Parses a response body for package `name`
    pub fn parse(name: &str, body: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(body).map_err(|e| RegistryError::MalformedResponse {
            name: name.to_string(),
            details: e.to_string(),
        })
    }

    /// Extracts the dependencies of `name@version`
    ///
    /// `version` is looked up as a version key first, then as a dist-tag.
    pub fn dependencies_for(
        &self,
        name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError> {
        let (concrete, manifest) = self.select(version).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
            version: version.to_string(),
        })?;

        let malformed = |details: String| RegistryError::MalformedResponse {
            name: name.to_string(),
            details,
        };

        let manifest = manifest
            .as_object()
            .ok_or_else(|| malformed(format!("versions[\"{}\"] is not an object", concrete)))?;

        let dependencies = match manifest.get("dependencies") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(declared)) => declared
                .iter()
                .map(|(dependency, spec)| match spec {
                    Value::String(spec) => Ok((dependency.clone(), spec.clone())),
                    other => Err(malformed(format!(
                        "dependency '{}' of {} has a non-string spec: {}",
                        dependency, concrete, other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(malformed(format!(
                    "versions[\"{}\"].dependencies is not an object",
                    concrete
                )))
            }
        };

        Ok(PackageMetadata::new(concrete, dependencies))
    }

    fn select(&self, version: &str) -> Option<(&str, &Value)> {
        if let Some((key, manifest)) = self.versions.get_key_value(version) {
            return Some((key.as_str(), manifest));
        }
        let tagged = self.dist_tags.get(version)?;
        self.versions
            .get_key_value(tagged.as_str())
            .map(|(key, manifest)| (key.as_str(), manifest))
    }
}
