//! Configuration loader for phpinfo2md.
//!
//! Built-in defaults sit at the bottom, then `.phpinfo2md.toml` in the
//! working directory, then an explicit override file. Keys a file leaves out
//! fall through to the layer below.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".phpinfo2md.toml";

/// Fully resolved settings.
#[derive(Clone, Debug)]
pub struct Config {
    pub output: OutputSettings,
    pub render: RenderSettings,
    pub working_dir: PathBuf,
    /// Config files that were applied, lowest precedence first.
    pub sources: Vec<PathBuf>,
}

/// Settings used when resolving where the Markdown file goes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputSettings {
    /// File name used when the output argument is a directory.
    pub default_file_name: String,
    /// Extension swapped onto the input path when no output is given.
    pub extension: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            default_file_name: "PHPINFO.md".to_string(),
            extension: "md".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RenderSettings {
    pub hide_empty_cells: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            hide_empty_cells: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Highest-precedence config file; relative paths resolve against the
    /// working directory.
    pub override_path: Option<PathBuf>,
    /// Defaults to the process working directory.
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {}", .problems.join("; "))]
    Invalid { path: PathBuf, problems: Vec<String> },
}

impl Config {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options.override_path.map(|path| working_dir.join(path));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let mut files = Vec::new();
        let local_path = working_dir.join(CONFIG_FILE_NAME);
        if local_path.is_file() && override_path.as_ref() != Some(&local_path) {
            files.push(local_path);
        }
        files.extend(override_path);

        let mut config = Config {
            output: OutputSettings::default(),
            render: RenderSettings::default(),
            working_dir,
            sources: Vec::with_capacity(files.len()),
        };
        for path in files {
            let layer = read_layer(&path)?;
            let problems = layer.problems();
            if !problems.is_empty() {
                return Err(ConfigError::Invalid { path, problems });
            }
            config.apply(layer);
            config.sources.push(path);
        }

        Ok(config)
    }

    fn apply(&mut self, layer: Layer) {
        if let Some(name) = layer.output.default_file_name {
            self.output.default_file_name = name;
        }
        if let Some(extension) = layer.output.extension {
            self.output.extension = extension;
        }
        if let Some(hide) = layer.render.hide_empty_cells {
            self.render.hide_empty_cells = hide;
        }
    }
}

fn resolve_working_dir(dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn read_layer(path: &Path) -> Result<Layer, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })
}

/// One config file as written; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Layer {
    output: OutputLayer,
    render: RenderLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OutputLayer {
    default_file_name: Option<String>,
    extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RenderLayer {
    hide_empty_cells: Option<bool>,
}

impl Layer {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(name) = &self.output.default_file_name {
            if name.trim().is_empty() {
                problems.push("output.default_file_name cannot be empty".to_string());
            } else if name.contains(['/', '\\']) {
                problems.push(format!(
                    "output.default_file_name must be a bare file name (received {name})"
                ));
            }
        }

        if let Some(extension) = &self.output.extension {
            if extension.trim().is_empty() {
                problems.push("output.extension cannot be empty".to_string());
            } else if extension.starts_with('.') {
                problems.push(format!(
                    "output.extension must not start with '.' (received {extension})"
                ));
            }
        }

        problems
    }
}
