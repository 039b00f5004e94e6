//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.
//! Transport defaults live on [`ConnectionOptions`](crate::transport::ConnectionOptions).

/// Default PagerDuty event action.
pub const EVENT_ACTION: &str = "trigger";

/// Default base URL of the workflow engine UI.
pub const UI_BASE_URL: &str = "http://localhost:8080";
