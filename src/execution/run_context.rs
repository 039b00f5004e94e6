//! Facts about the run that invokes the alert pipeline.

use url::Url;

/// Context of the workflow run invoking the pipeline.
///
/// Supplied by the host per invocation; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    current_execution_id: Option<String>,
    ui_base_url: Url,
}

impl RunContext {
    /// Creates a context for a run with no known execution.
    #[must_use]
    pub const fn new(ui_base_url: Url) -> Self {
        Self {
            current_execution_id: None,
            ui_base_url,
        }
    }

    /// Sets the identifier of the execution this run belongs to.
    #[must_use]
    pub fn with_current_execution(mut self, id: impl Into<String>) -> Self {
        self.current_execution_id = Some(id.into());
        self
    }

    /// Returns the identifier of the current execution, if any.
    #[must_use]
    pub fn current_execution_id(&self) -> Option<&str> {
        self.current_execution_id.as_deref()
    }

    /// Returns the base URL of the engine UI used to build execution links.
    #[must_use]
    pub const fn ui_base_url(&self) -> &Url {
        &self.ui_base_url
    }
}
