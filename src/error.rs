use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepareError>;

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("dataset not found at {}", path.display())]
    DatasetNotFound { path: PathBuf },
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PrepareError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepareError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        PrepareError::Json {
            path: path.into(),
            source,
        }
    }
}
