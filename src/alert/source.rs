//! What an alert is built from.

use serde_json::{Map, Value};

use crate::execution::RunContext;

/// Input of one alert invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertSource {
    /// A payload already resolved by the caller, sent verbatim.
    Raw {
        /// Request body; `None` or blank sends an empty body
        payload: Option<String>,
    },
    /// A payload rendered from an execution's metadata.
    ExecutionDerived(ExecutionAlert),
}

impl AlertSource {
    /// Creates a raw source from a payload string.
    #[must_use]
    pub fn raw(payload: impl Into<String>) -> Self {
        Self::Raw {
            payload: Some(payload.into()),
        }
    }

    /// Returns a short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Raw { .. } => "raw",
            Self::ExecutionDerived(_) => "execution",
        }
    }
}

/// Fields of an execution-derived alert.
///
/// # Example
///
/// ```
/// use pagerduty_alert::alert::ExecutionAlert;
///
/// let alert = ExecutionAlert::new("R0UT1NG", "trigger", "Nightly ETL failed")
///     .with_custom_field("env", "prod")
///     .with_custom_message("Page the data team");
/// assert!(alert.execution_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionAlert {
    /// Execution to report; defaults to the run's current execution.
    pub execution_id: Option<String>,
    /// PagerDuty integration routing key
    pub routing_key: String,
    /// PagerDuty event action (`trigger`, `acknowledge`, `resolve`)
    pub event_action: String,
    /// Summary line of the incident
    pub summary: String,
    /// Extra fields reported under `custom_details.custom_fields`
    pub custom_fields: Map<String, Value>,
    /// Optional free-text message
    pub custom_message: Option<String>,
}

impl ExecutionAlert {
    /// Creates an alert about the current execution.
    #[must_use]
    pub fn new(
        routing_key: impl Into<String>,
        event_action: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            execution_id: None,
            routing_key: routing_key.into(),
            event_action: event_action.into(),
            summary: summary.into(),
            custom_fields: Map::new(),
            custom_message: None,
        }
    }

    /// Targets an explicit execution instead of the current one.
    #[must_use]
    pub fn with_execution_id(mut self, id: impl Into<String>) -> Self {
        self.execution_id = Some(id.into());
        self
    }

    /// Adds a custom field, replacing any previous value for `name`.
    #[must_use]
    pub fn with_custom_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_fields.insert(name.into(), value.into());
        self
    }

    /// Sets the free-text message.
    #[must_use]
    pub fn with_custom_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    /// Returns the id of the execution to report.
    ///
    /// The explicit id wins; otherwise the run's current execution is used.
    #[must_use]
    pub fn resolve_execution_id<'a>(&'a self, run: &'a RunContext) -> Option<&'a str> {
        self.execution_id
            .as_deref()
            .or_else(|| run.current_execution_id())
    }
}
