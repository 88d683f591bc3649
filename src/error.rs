use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PanelError>;

/// Document-level failures. Per-tile problems never surface here; they only
/// shrink the output.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid host {0:?}: expected an absolute URL")]
    InvalidHost(String),

    #[error("document {0} is empty")]
    EmptyDocument(PathBuf),

    #[error("input directory {0} does not exist")]
    NotFound(PathBuf),
}

impl PanelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PanelError::Io {
            path: path.into(),
            source,
        }
    }
}
