use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::SpliceConfig;
use crate::error::{map_io_err, SpliceResult};

/// Read a file's contents as string
pub fn read_file_to_string(path: impl AsRef<Path>) -> SpliceResult<String> {
    let path = path.as_ref();
    debug!("Reading file: {}", path.display());

    fs::read_to_string(path).map_err(map_io_err(path))
}

/// Overwrite a file with `content`, either in place or through a temp file and rename
pub fn write_file(path: impl AsRef<Path>, content: &str, config: &SpliceConfig) -> SpliceResult<()> {
    let path = path.as_ref();
    if config.atomic_writes {
        write_file_atomic(path, content, config.file_mode)
    } else {
        write_file_in_place(path, content, config.file_mode)
    }
}

fn write_file_in_place(path: &Path, content: &str, mode: u32) -> SpliceResult<()> {
    debug!("Writing file in place: {} ({} bytes)", path.display(), content.len());

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        // Only takes effect when the file is created
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path).map_err(map_io_err(path))?;
    file.write_all(content.as_bytes()).map_err(map_io_err(path))?;
    Ok(())
}

fn write_file_atomic(path: &Path, content: &str, mode: u32) -> SpliceResult<()> {
    debug!("Writing file atomically: {} ({} bytes)", path.display(), content.len());

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropped (and removed) on any early return
    let mut temp = NamedTempFile::new_in(dir).map_err(map_io_err(dir))?;
    temp.write_all(content.as_bytes()).map_err(map_io_err(temp.path()))?;
    temp.as_file().sync_all().map_err(map_io_err(temp.path()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(mode))
            .map_err(map_io_err(temp.path()))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    temp.persist(path).map_err(|e| map_io_err(path)(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpliceError;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.go");

        let err = read_file_to_string(&path).unwrap_err();
        assert!(matches!(err, SpliceError::Io { .. }));
        assert_eq!(err.path(), Some(&path));
    }

    #[test]
    fn test_write_in_place_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "a much longer original body").unwrap();

        write_file(&path, "short", &SpliceConfig::default()).unwrap();
        assert_eq!(read_file_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "old").unwrap();

        let config = SpliceConfig {
            atomic_writes: true,
            ..SpliceConfig::default()
        };
        write_file(&path, "new", &config).unwrap();

        assert_eq!(read_file_to_string(&path).unwrap(), "new");
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("webhook.go");
        fs::write(&path, "old").unwrap();

        let config = SpliceConfig {
            atomic_writes: true,
            file_mode: 0o600,
            ..SpliceConfig::default()
        };
        write_file(&path, "new", &config).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/main.go");

        for atomic_writes in [false, true] {
            let config = SpliceConfig {
                atomic_writes,
                ..SpliceConfig::default()
            };
            let err = write_file(&path, "x", &config).unwrap_err();
            assert!(matches!(err, SpliceError::Io { .. }));
        }
    }
}
