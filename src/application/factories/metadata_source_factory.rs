use crate::adapters::outbound::filesystem::FixtureMetadataSource;
use crate::adapters::outbound::network::{
    CachingMetadataSource, NpmRegistryClient, RetryingMetadataSource,
};
use crate::application::dto::BuildTreeRequest;
use crate::ports::outbound::MetadataSource;
use crate::shared::Result;
use std::path::Path;

/// Factory selecting where package metadata comes from
///
/// The choice is made once, at construction time: test mode loads a local
/// fixture file, otherwise the live registry client is wrapped in retry and
/// cache decorators. The graph builder sees the same `MetadataSource` port
/// either way.
pub struct MetadataSourceFactory;

impl MetadataSourceFactory {
    /// Creates the metadata source described by `request`
    ///
    /// # Errors
    /// Returns an error if the fixture file cannot be loaded or the registry
    /// URL is not an http(s) URL.
    pub fn create(request: &BuildTreeRequest) -> Result<Box<dyn MetadataSource>> {
        if request.test_mode {
            let fixture = FixtureMetadataSource::from_path(Path::new(&request.registry))?;
            return Ok(Box::new(fixture));
        }

        let client = NpmRegistryClient::new(&request.registry, request.request_timeout)?;
        let retrying = RetryingMetadataSource::new(client, request.max_retries);
        Ok(Box::new(CachingMetadataSource::new(retrying)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_fixture_source_in_test_mode() {
        let temp_dir = TempDir::new().unwrap();
        let fixture = temp_dir.path().join("repo.txt");
        fs::write(&fixture, "a@1.0.0: b@2.0.0\n").unwrap();

        let request = BuildTreeRequest::builder("a")
            .version("1.0.0")
            .registry(fixture.to_string_lossy())
            .test_mode(true)
            .build()
            .unwrap();

        let source = MetadataSourceFactory::create(&request).unwrap();
        let metadata = source.fetch_dependencies("a", "1.0.0").await.unwrap();
        assert_eq!(metadata.dependencies, vec![("b".to_string(), "2.0.0".to_string())]);
    }

    #[test]
    fn test_create_fails_for_missing_fixture() {
        let request = BuildTreeRequest::builder("a")
            .registry("/nonexistent/repo.txt")
            .test_mode(true)
            .build()
            .unwrap();

        assert!(MetadataSourceFactory::create(&request).is_err());
    }

    #[test]
    fn test_create_live_source() {
        let request = BuildTreeRequest::builder("a").build().unwrap();
        assert!(MetadataSourceFactory::create(&request).is_ok());
    }

    #[test]
    fn test_create_rejects_non_url_registry_outside_test_mode() {
        let request = BuildTreeRequest::builder("a")
            .registry("tests/fixtures/repo.txt")
            .build()
            .unwrap();

        assert!(MetadataSourceFactory::create(&request).is_err());
    }
}
