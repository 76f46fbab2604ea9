use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by [`HostSet`](crate::hosts::HostSet) mutations and the host store.
#[derive(Debug, Error)]
pub enum HostsError {
    #[error("host already in the list: {0}")]
    AlreadyExists(String),

    #[error("host not in the list: {0}")]
    NotFound(String),

    #[error("failed to access hosts file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HostsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
