use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a file from being parsed at all. Problems inside the
/// source are diagnostics, not errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    #[error("'{path}' is {len} bytes; sources must be smaller than 4 GiB")]
    TooLarge { path: PathBuf, len: usize },

    #[error("cannot start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
