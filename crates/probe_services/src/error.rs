use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading settings or profiles.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
