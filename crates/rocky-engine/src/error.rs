use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read rule table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("rule table is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rule '{id}' is incomplete: {reason}")]
    InvalidRule { id: String, reason: String },
}
