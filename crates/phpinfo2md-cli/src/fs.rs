use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes `content` to a temp file next to `path`, then renames it over
/// `path`. On failure the temp file is removed and `path` is untouched.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("PHPINFO.md");
        fs::write(&file_path, "old").unwrap();

        write_atomic(&file_path, "# PHP Version 8.1.0\n\n").unwrap();

        assert_eq!(
            fs::read_to_string(&file_path).unwrap(),
            "# PHP Version 8.1.0\n\n"
        );
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn missing_parent_directory_fails() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing").join("PHPINFO.md");

        let err = write_atomic(&file_path, "content").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!file_path.exists());
    }
}
