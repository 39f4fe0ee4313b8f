use std::path::PathBuf;

use thiserror::Error;

/// Store error kinds.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `add` targeted a nickname that already exists
    #[error("nickname already exists: {0}")]
    Duplicate(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// No per-user configuration directory on this platform
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file exists but is not a nickname -> record mapping
    #[error("malformed store file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize connections: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
