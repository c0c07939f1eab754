use std::fs;
use std::path::{Path, PathBuf};

use phpinfo2md_config::OutputSettings;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid input file: {}", .path.display())]
pub struct InvalidInput {
    pub path: PathBuf,
}

/// Resolves `input` against `working_dir` and checks it is a regular file.
pub fn resolve_input(input: &Path, working_dir: &Path) -> Result<PathBuf, InvalidInput> {
    let path = make_absolute(input, working_dir);
    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => Ok(path),
        _ => Err(InvalidInput { path }),
    }
}

/// Picks the Markdown destination for an already resolved input.
///
/// Without `output` the input's extension is swapped for the configured one.
/// An existing directory receives the configured default file name; any
/// other path is used as given.
pub fn resolve_output(
    input: &Path,
    output: Option<&Path>,
    settings: &OutputSettings,
    working_dir: &Path,
) -> PathBuf {
    let candidate = match output {
        Some(path) => make_absolute(path, working_dir),
        None => input.with_extension(&settings.extension),
    };

    if candidate.is_dir() {
        candidate.join(&settings.default_file_name)
    } else {
        candidate
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
