use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size for fixture repositories and config files (16 MB)
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Reads a local input file after checking that it is a regular file of sane size
///
/// # Security
/// Uses `symlink_metadata()` so that a symbolic link is rejected instead of
/// being followed to an arbitrary target.
///
/// # Arguments
/// * `path` - The file to read
/// * `file_description` - Human readable name for error messages (e.g. "fixture repository")
///
/// # Errors
/// Returns an error if the path does not exist, is a symlink or a directory,
/// exceeds [`MAX_FILE_SIZE`], or is not valid UTF-8.
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} {}: {}", file_description, path.display(), e))
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repo.txt");
        fs::write(&path, "a: b c").unwrap();

        let content = read_regular_file(&path, "fixture repository").unwrap();
        assert_eq!(content, "a: b c");
    }

    #[test]
    fn test_read_regular_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let err = read_regular_file(&path, "fixture repository").unwrap_err();
        assert!(err.to_string().contains("Failed to read fixture repository metadata"));
    }

    #[test]
    fn test_read_regular_file_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = read_regular_file(temp_dir.path(), "fixture repository").unwrap_err();
        assert!(err.to_string().contains("is not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_regular_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.txt");
        let link = temp_dir.path().join("link.txt");
        fs::write(&target, "a:").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = read_regular_file(&link, "fixture repository").unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_file_size_limits() {
        let path = Path::new("repo.json");
        assert!(validate_file_size(10, path, 10).is_ok());

        let err = validate_file_size(11, path, 10).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
