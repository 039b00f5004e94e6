//! Error types for loading execution metadata.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for reading an executions file.
#[derive(Debug, Error)]
pub enum ExecutionFileError {
    /// Failed to read the file.
    #[error("Failed to read executions file '{}': {source}", path.display())]
    Read {
        /// Path to the executions file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid execution JSON.
    #[error("Failed to parse executions: {0}")]
    Parse(#[from] serde_json::Error),
}
