//! Alert pipeline.
//!
//! This module provides:
//! - The alert input ([`AlertSource`], [`ExecutionAlert`])
//! - Request construction ([`AlertRequest`], [`TargetUrl`])
//! - Response classification ([`classify`], [`DispatchOutcome`], [`Strictness`])
//! - The sequential pipeline tying them together ([`AlertPipeline`])

mod classify;
mod error;
mod payload;
mod pipeline;
mod request;
mod source;


pub use classify::{DispatchOutcome, Rejection, Strictness, classify};
pub use error::{AlertError, ConfigurationError};
pub use payload::{execution_context, raw_body, severity_for};
pub use pipeline::{AlertPipeline, AlertStage};
pub use request::{AlertRequest, TargetUrl};
pub use source::{AlertSource, ExecutionAlert};
