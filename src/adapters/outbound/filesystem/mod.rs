/// Filesystem adapters for fixture input and rendered output
mod file_writer;
mod fixture_source;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use fixture_source::FixtureMetadataSource;
