//! Optional TOML settings file (`~/.pscan.toml` unless `--config` names another).
//!
//! ```toml
//! hosts-file = "/srv/pscan/hosts"
//! ports = "22,80,8000-8010"
//! timeout-ms = 500
//! concurrency = 128
//! ```
//!
//! Every key is optional. Values here only apply when neither a flag nor an
//! environment variable supplied the setting.

use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::network::ports::{PortList, PortListError};

pub const CONFIG_FILE_NAME: &str = ".pscan.toml";

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid `ports` in config file: {0}")]
    Ports(#[from] PortListError),
    #[error("invalid `{0}` in config file: must be at least 1")]
    Zero(&'static str),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub hosts_file: Option<PathBuf>,
    pub ports: Option<String>,
    pub timeout_ms: Option<u64>,
    pub concurrency: Option<usize>,
}

impl FileConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigFileError> {
        let cfg: FileConfig = toml::from_str(content).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        // Catch bad values here rather than halfway through a command.
        cfg.port_list()?;
        if cfg.timeout_ms == Some(0) {
            return Err(ConfigFileError::Zero("timeout-ms"));
        }
        if cfg.concurrency == Some(0) {
            return Err(ConfigFileError::Zero("concurrency"));
        }
        Ok(cfg)
    }

    /// Reads `path`, which must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path: &Path = path.as_ref();
        let content: String = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("using config file {}", path.display());
        Self::from_toml_str(&content, path)
    }

    /// Reads `path` when given, otherwise the default file in the home directory if
    /// one exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn port_list(&self) -> Result<Option<PortList>, PortListError> {
        self.ports.as_deref().map(str::parse).transpose()
    }
}

pub fn default_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
}
