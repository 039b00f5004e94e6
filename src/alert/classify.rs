//! Classification of the remote API's answer.

use http::StatusCode;

use super::AlertError;
use crate::transport::HttpResponse;

/// A response the remote API did not answer with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Response status
    pub status: StatusCode,
    /// Response body, kept for diagnostics
    pub body: String,
}

/// Result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The remote API answered 200.
    Success,
    /// The remote API answered anything else.
    Failure(Rejection),
}

impl DispatchOutcome {
    /// Returns true for [`DispatchOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// How a [`DispatchOutcome::Failure`] is reported to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Log the rejection and complete normally.
    #[default]
    Permissive,
    /// Turn the rejection into [`AlertError::RemoteRejection`].
    Strict,
}

impl Strictness {
    /// Applies this policy to an outcome.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::RemoteRejection`] for a failure under
    /// [`Strictness::Strict`].
    pub fn enforce(self, outcome: DispatchOutcome) -> Result<DispatchOutcome, AlertError> {
        match (self, outcome) {
            (Self::Strict, DispatchOutcome::Failure(Rejection { status, body })) => {
                Err(AlertError::RemoteRejection { status, body })
            }
            (_, outcome) => Ok(outcome),
        }
    }
}

/// Classifies a response: exactly 200 is success, anything else is a
/// rejection carrying the body.
#[must_use]
pub fn classify(response: &HttpResponse) -> DispatchOutcome {
    let body = response.body_lossy();
    tracing::debug!("Response: {body}");

    if response.status == StatusCode::OK {
        tracing::info!("Request succeeded");
        return DispatchOutcome::Success;
    }

    DispatchOutcome::Failure(Rejection {
        status: response.status,
        body,
    })
}
