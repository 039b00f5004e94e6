//! The render → build → dispatch → classify pipeline.

use std::fmt;

use crate::execution::{ExecutionProvider, InMemoryExecutions, RunContext};
use crate::render::{HandlebarsRenderer, PAGERDUTY_TEMPLATE, Renderer, TemplateContext, TemplateSource};
use crate::time::{Clock, SystemClock};
use crate::transport::{ConnectionOptions, Connector, HttpClient};

use super::payload::{execution_context, raw_body};
use super::{
    AlertError, AlertRequest, AlertSource, ConfigurationError, DispatchOutcome, ExecutionAlert,
    Strictness, classify,
};

/// Stage of one alert invocation, traced at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStage {
    Idle,
    Rendering,
    Building,
    Dispatching,
    Classifying,
    Done,
}

impl fmt::Display for AlertStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Rendering => "rendering",
            Self::Building => "building",
            Self::Dispatching => "dispatching",
            Self::Classifying => "classifying",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Sends one alert per [`send`](Self::send) call.
///
/// Each invocation renders the payload, builds exactly one POST request,
/// dispatches it over a freshly connected client and classifies the
/// response. There is no retry: a transport fault ends the invocation.
///
/// # Type Parameters
///
/// - `C`: opens the HTTP client for each invocation
/// - `R`: payload renderer (defaults to [`HandlebarsRenderer`])
/// - `P`: execution lookup (defaults to [`InMemoryExecutions`])
/// - `K`: clock for running executions (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use pagerduty_alert::alert::AlertPipeline;
/// use pagerduty_alert::transport::{ConnectionOptions, ReqwestConnector};
///
/// let pipeline = AlertPipeline::new(ReqwestConnector, ConnectionOptions::new());
/// assert!(pipeline.options().auth.is_none());
/// ```
#[derive(Debug)]
pub struct AlertPipeline<C, R = HandlebarsRenderer, P = InMemoryExecutions, K = SystemClock> {
    connector: C,
    renderer: R,
    executions: P,
    clock: K,
    options: ConnectionOptions,
    strictness: Strictness,
    template: Option<String>,
}

impl<C> AlertPipeline<C> {
    /// Creates a permissive pipeline using the built-in PagerDuty template,
    /// no known executions and the system clock.
    #[must_use]
    pub fn new(connector: C, options: ConnectionOptions) -> Self {
        Self {
            connector,
            renderer: HandlebarsRenderer::new(),
            executions: InMemoryExecutions::new(),
            clock: SystemClock,
            options,
            strictness: Strictness::default(),
            template: None,
        }
    }
}

impl<C, R, P, K> AlertPipeline<C, R, P, K> {
    /// Replaces the payload renderer.
    #[must_use]
    pub fn with_renderer<R2>(self, renderer: R2) -> AlertPipeline<C, R2, P, K> {
        AlertPipeline {
            connector: self.connector,
            renderer,
            executions: self.executions,
            clock: self.clock,
            options: self.options,
            strictness: self.strictness,
            template: self.template,
        }
    }

    /// Replaces the execution lookup.
    #[must_use]
    pub fn with_executions<P2>(self, executions: P2) -> AlertPipeline<C, R, P2, K> {
        AlertPipeline {
            connector: self.connector,
            renderer: self.renderer,
            executions,
            clock: self.clock,
            options: self.options,
            strictness: self.strictness,
            template: self.template,
        }
    }

    /// Replaces the clock.
    ///
    /// This is primarily useful for testing durations of running executions.
    #[must_use]
    pub fn with_clock<K2>(self, clock: K2) -> AlertPipeline<C, R, P, K2> {
        AlertPipeline {
            connector: self.connector,
            renderer: self.renderer,
            executions: self.executions,
            clock,
            options: self.options,
            strictness: self.strictness,
            template: self.template,
        }
    }

    /// Sets how non-200 responses are reported.
    #[must_use]
    pub const fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Renders execution-derived alerts with `template` instead of the
    /// built-in PagerDuty template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Returns the connection options.
    #[must_use]
    pub const fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Returns the strictness policy.
    #[must_use]
    pub const fn strictness(&self) -> Strictness {
        self.strictness
    }
}

impl<C, R, P, K> AlertPipeline<C, R, P, K>
where
    C: Connector,
    R: Renderer,
    P: ExecutionProvider,
    K: Clock,
{
    /// Sends one alert to `url`.
    ///
    /// Returns the classified outcome. A non-200 answer is
    /// [`DispatchOutcome::Failure`] unless the pipeline is
    /// [`Strictness::Strict`].
    ///
    /// # Errors
    ///
    /// - [`AlertError::Configuration`] for an invalid URL or unknown
    ///   execution, before any network I/O
    /// - [`AlertError::Render`] if the payload cannot be rendered
    /// - [`AlertError::Transport`] if the request cannot be delivered
    /// - [`AlertError::RemoteRejection`] for a non-200 answer in strict mode
    pub async fn send(
        &self,
        run: &RunContext,
        url: &str,
        source: &AlertSource,
    ) -> Result<DispatchOutcome, AlertError> {
        enter(AlertStage::Idle);
        tracing::debug!("Sending {} alert", source.kind());

        let result = self.dispatch(run, url, source).await;
        match &result {
            Ok(_) => enter(AlertStage::Done),
            Err(e) => tracing::debug!(stage = %AlertStage::Done, "Alert aborted: {e}"),
        }
        result
    }

    async fn dispatch(
        &self,
        run: &RunContext,
        url: &str,
        source: &AlertSource,
    ) -> Result<DispatchOutcome, AlertError> {
        enter(AlertStage::Rendering);
        let body = self.render(run, source)?;

        enter(AlertStage::Building);
        let request = AlertRequest::build(url, &self.options, body)?;

        enter(AlertStage::Dispatching);
        let client = self.connector.connect(&self.options)?;
        let response = client.request(request.into_http_request()).await?;
        drop(client);

        enter(AlertStage::Classifying);
        self.strictness.enforce(classify(&response))
    }

    fn render(&self, run: &RunContext, source: &AlertSource) -> Result<Option<String>, AlertError> {
        match source {
            AlertSource::Raw { payload } => {
                let rendered = payload
                    .as_deref()
                    .map(|text| {
                        self.renderer
                            .render(TemplateSource::Literal(text), &TemplateContext::empty())
                    })
                    .transpose()?;
                Ok(raw_body(rendered.as_deref()))
            }
            AlertSource::ExecutionDerived(alert) => self.render_execution(run, alert).map(Some),
        }
    }

    fn render_execution(&self, run: &RunContext, alert: &ExecutionAlert) -> Result<String, AlertError> {
        let id = alert
            .resolve_execution_id(run)
            .ok_or(ConfigurationError::MissingExecutionId)?;
        let execution = self
            .executions
            .find(id)
            .ok_or_else(|| ConfigurationError::ExecutionNotFound(id.to_string()))?;

        let context = execution_context(alert, execution, run.ui_base_url(), self.clock.now_utc())?;
        let template = self
            .template
            .as_deref()
            .map_or(TemplateSource::Named(PAGERDUTY_TEMPLATE), TemplateSource::Inline);

        Ok(self.renderer.render(template, &context)?)
    }
}

fn enter(stage: AlertStage) {
    tracing::debug!(%stage, "Alert stage");
}
