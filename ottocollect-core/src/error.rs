use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the configuration and file boundaries of the engine.
/// The pipeline itself never fails; it defaults instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unknown sort rule '{0}'")]
    UnknownSortRule(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid collection JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
