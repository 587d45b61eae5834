//! I/O utility functions

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while a file is being written
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file using the write-then-rename pattern.
///
/// The simulator never sees a half-written input file: the content goes to
/// `<name>.tmp` next to the target, which is then renamed over it.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("INPUTS/usrinp"), &input.render())?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = temp_path(path);
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("usrinp");

        atomic_write(&path, "nt = 1\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "nt = 1\n");

        // Temp file should not exist
        assert!(!dir.path().join("usrinp.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("usrinp");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_atomic_write_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("INPUTS").join("usrinp");
        assert!(atomic_write(&path, "x").is_err());
    }
}
