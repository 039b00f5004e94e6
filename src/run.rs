//! Application execution logic.
//!
//! This module wires a validated configuration into an alert pipeline
//! and sends exactly one alert.

use thiserror::Error;

use pagerduty_alert::alert::{
    AlertError, AlertPipeline, AlertSource, DispatchOutcome, Rejection,
};
use pagerduty_alert::config::{ExecutionMode, Mode, ValidatedConfig};
use pagerduty_alert::execution::{
    ExecutionFileError, ExecutionProvider, InMemoryExecutions, RunContext,
};
use pagerduty_alert::render::Renderer;
use pagerduty_alert::time::Clock;
use pagerduty_alert::transport::{Connector, ReqwestConnector};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Errors that can occur while sending the alert.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to load the executions file.
    #[error("Failed to load executions: {0}")]
    Executions(#[source] ExecutionFileError),

    /// The pipeline aborted.
    #[error(transparent)]
    Alert(#[from] AlertError),
}

impl RunError {
    /// Whether the error stems from user input rather than the network.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Executions(_) | Self::Alert(AlertError::Configuration(_))
        )
    }
}

/// Sends the alert described by `config`.
///
/// # Errors
///
/// Returns an error if the executions file cannot be loaded or the
/// pipeline aborts.
pub async fn execute(config: ValidatedConfig) -> Result<DispatchOutcome, RunError> {
    let run = RunContext::new(config.ui_base_url);
    let pipeline =
        AlertPipeline::new(ReqwestConnector, config.connection).with_strictness(config.strictness);

    match config.mode {
        Mode::Raw { payload } => {
            dispatch(&pipeline, &run, config.url.as_str(), &AlertSource::Raw { payload }).await
        }
        Mode::Execution(mode) => {
            let ExecutionMode {
                alert,
                executions_file,
                current_execution_id,
                template,
            } = mode;

            let executions =
                InMemoryExecutions::load(&executions_file).map_err(RunError::Executions)?;
            tracing::debug!(
                "Loaded {} execution(s) from {}",
                executions.len(),
                executions_file.display()
            );

            let run = match current_execution_id {
                Some(id) => run.with_current_execution(id),
                None => run,
            };
            let mut pipeline = pipeline.with_executions(executions);
            if let Some(template) = template {
                pipeline = pipeline.with_template(template);
            }

            let source = AlertSource::ExecutionDerived(alert);
            dispatch(&pipeline, &run, config.url.as_str(), &source).await
        }
    }
}

async fn dispatch<C, R, P, K>(
    pipeline: &AlertPipeline<C, R, P, K>,
    run: &RunContext,
    url: &str,
    source: &AlertSource,
) -> Result<DispatchOutcome, RunError>
where
    C: Connector,
    R: Renderer,
    P: ExecutionProvider,
    K: Clock,
{
    let outcome = pipeline.send(run, url, source).await?;

    if let DispatchOutcome::Failure(Rejection { status, ref body }) = outcome {
        tracing::warn!(%status, "Alert answered with a status other than 200: {body}");
    }

    Ok(outcome)
}
