/// Dependency tree core - domain model and pure services
///
/// Nothing in here performs I/O directly; registry access goes through the
/// `MetadataSource` port.
pub mod domain;
pub mod services;
