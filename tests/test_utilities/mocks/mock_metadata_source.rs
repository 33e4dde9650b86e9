use async_trait::async_trait;
use npm_deptree::prelude::*;
use npm_deptree::shared::error::RegistryError;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Mock MetadataSource serving canned responses and recording every lookup
#[derive(Default)]
pub struct MockMetadataSource {
    responses: HashMap<(String, String), std::result::Result<PackageMetadata, RegistryError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, version: &str, deps: &[(&str, &str)]) -> Self {
        let deps = deps
            .iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect();
        self.responses.insert(
            (name.to_string(), version.to_string()),
            Ok(PackageMetadata::new(version, deps)),
        );
        self
    }

    /// Registers `name@tag` answering with the dependencies of `name@concrete`
    pub fn with_tag(
        mut self,
        name: &str,
        tag: &str,
        concrete: &str,
        deps: &[(&str, &str)],
    ) -> Self {
        let deps = deps
            .iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect();
        self.responses.insert(
            (name.to_string(), tag.to_string()),
            Ok(PackageMetadata::new(concrete, deps)),
        );
        self
    }

    pub fn with_error(mut self, name: &str, version: &str, error: RegistryError) -> Self {
        self.responses
            .insert((name.to_string(), version.to_string()), Err(error));
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Every lookup as `name@version`, in issue order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str, version: &str) -> usize {
        let key = format!("{}@{}", name, version);
        self.calls().iter().filter(|call| **call == key).count()
    }
}

#[async_trait]
impl MetadataSource for MockMetadataSource {
    async fn fetch_dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> std::result::Result<PackageMetadata, RegistryError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}@{}", name, version));

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }

        self.responses
            .get(&(name.to_string(), version.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(RegistryError::NotFound {
                    name: name.to_string(),
                    version: version.to_string(),
                })
            })
    }
}
