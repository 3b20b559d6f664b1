use std::path::PathBuf;

/// Errors surfaced by the blur engines, the counter benchmark and config loading
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("malformed buffer: row {row} has {actual} pixels, expected {expected}")]
    MalformedBuffer {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("size mismatch: expected {expected} pixels, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("failed to spawn worker {worker}: {source}")]
    SpawnFailed {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("{strategy} counter lost updates: expected {expected}, got {actual}")]
    LostUpdates {
        strategy: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("failed to read config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }
}
