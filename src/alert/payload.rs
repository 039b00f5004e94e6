//! Variables exposed to execution-derived templates.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use super::ExecutionAlert;
use crate::execution::{Execution, StateType, TaskRun, format_iso8601};
use crate::render::{RenderError, TemplateContext};

/// Maps an execution state to a PagerDuty severity.
#[must_use]
pub const fn severity_for(state: StateType) -> &'static str {
    match state {
        StateType::Failed | StateType::Killed => "error",
        StateType::Warning => "warning",
        _ => "info",
    }
}

/// Template data for an execution-derived alert.
///
/// Optional values serialize as `null` so strict templates can test them
/// with `{{#if}}`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionData<'a> {
    routing_key: &'a str,
    event_action: &'a str,
    summary: &'a str,
    severity: &'static str,
    execution: ExecutionRef<'a>,
    link: String,
    start_date: String,
    duration: String,
    first_failed: Option<FailedTask<'a>>,
    custom_fields: &'a Map<String, Value>,
    custom_message: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionRef<'a> {
    id: &'a str,
    namespace: &'a str,
    flow_id: &'a str,
    state: StateType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailedTask<'a> {
    id: &'a str,
    task_id: &'a str,
}

impl<'a> From<&'a TaskRun> for FailedTask<'a> {
    fn from(run: &'a TaskRun) -> Self {
        Self {
            id: &run.id,
            task_id: &run.task_id,
        }
    }
}

/// Builds the template context for `alert` about `execution`.
///
/// Variables: `routingKey`, `eventAction`, `summary`, `severity`,
/// `execution.{id,namespace,flowId,state}`, `link`, `startDate`, `duration`,
/// `firstFailed.{id,taskId}`, `customFields`, `customMessage`.
///
/// `now` bounds the duration of executions that have not ended.
///
/// # Errors
///
/// Returns [`RenderError::Context`] if the data cannot be serialized.
pub fn execution_context(
    alert: &ExecutionAlert,
    execution: &Execution,
    ui_base_url: &Url,
    now: DateTime<Utc>,
) -> Result<TemplateContext, RenderError> {
    let data = ExecutionData {
        routing_key: &alert.routing_key,
        event_action: &alert.event_action,
        summary: &alert.summary,
        severity: severity_for(execution.state.current),
        execution: ExecutionRef {
            id: &execution.id,
            namespace: &execution.namespace,
            flow_id: &execution.flow_id,
            state: execution.state.current,
        },
        link: execution.link(ui_base_url),
        start_date: execution
            .state
            .start_date
            .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        duration: format_iso8601(execution.duration(now)),
        first_failed: execution.first_failed().map(FailedTask::from),
        custom_fields: &alert.custom_fields,
        custom_message: alert.custom_message.as_deref(),
    };

    TemplateContext::from_serializable(&data)
}

/// Normalizes a raw payload: empty text means no body.
///
/// Any other text, whitespace included, is sent unchanged.
#[must_use]
pub fn raw_body(payload: Option<&str>) -> Option<String> {
    match payload {
        Some(text) if !text.is_empty() => {
            if text.trim().is_empty() {
                tracing::warn!("Raw payload is only whitespace, sending it unchanged");
            }
            Some(text.to_string())
        }
        _ => {
            tracing::warn!("Raw payload is empty, sending an empty body");
            None
        }
    }
}
