//! Operator configuration for the `bizdesk` binary.
//!
//! Values come from an optional `bizdesk.toml`; command line flags win over the file.

use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "bizdesk.toml";
pub const DEFAULT_DB_FILE: &str = "bizdesk.db";

/// Contents of `bizdesk.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

/// Effective settings after merging file and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Reads `path`. A missing file yields the empty config only when `required` is false.
pub fn load_file_config(path: &Path, required: bool) -> Result<FileConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(FileConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(file: FileConfig, flags: FlagOverrides, default_level: &str) -> Self {
        Self {
            db_path: flags
                .db_path
                .or(file.db_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
            log_level: flags
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| default_level.to_string()),
            log_dir: flags.log_dir.or(file.log_dir),
        }
    }
}
