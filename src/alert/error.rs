//! Error taxonomy of the alert pipeline.

use thiserror::Error;

use crate::render::RenderError;
use crate::transport::HttpError;

/// Caller mistakes detected before any network I/O.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The target URL is missing or blank.
    #[error("Alert URL is missing or blank")]
    MissingUrl,

    /// The target URL is not an absolute HTTP(S) URI.
    #[error("Invalid alert URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Neither an explicit nor a current execution id is available.
    #[error("No execution id given and the run has no current execution")]
    MissingExecutionId,

    /// The referenced execution is unknown to the provider.
    #[error("Execution '{0}' not found")]
    ExecutionNotFound(String),

    /// A connection header could not be encoded.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeader {
        /// Header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Error type for one alert invocation.
///
/// Every variant aborts the invocation. Non-200 responses only appear here
/// under [`Strictness::Strict`](super::Strictness::Strict).
#[derive(Debug, Error)]
pub enum AlertError {
    /// Invalid input, raised before any network I/O.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The payload could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The request could not be delivered.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The remote API answered with a status other than 200.
    #[error("Alert rejected with status {status}: {body}")]
    RemoteRejection {
        /// Response status
        status: http::StatusCode,
        /// Response body, captured for diagnostics
        body: String,
    },
}
