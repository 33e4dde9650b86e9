/// Network adapters for registry access
mod caching_metadata_source;
mod npm_registry_client;
mod registry_document;
mod retrying_metadata_source;

pub use caching_metadata_source::CachingMetadataSource;
pub use npm_registry_client::{NpmRegistryClient, DEFAULT_REGISTRY_URL};
pub use registry_document::RegistryDocument;
pub use retrying_metadata_source::{RetryingMetadataSource, DEFAULT_MAX_RETRIES};
