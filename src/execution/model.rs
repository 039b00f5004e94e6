//! Execution metadata supplied by the host workflow engine.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Lifecycle state of an execution or task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateType {
    Created,
    Submitted,
    Queued,
    Running,
    Paused,
    Breakpoint,
    Restarted,
    Resubmitted,
    Retrying,
    Retried,
    Killing,
    Killed,
    Cancelled,
    Skipped,
    Success,
    Warning,
    Failed,
    /// Any state this crate does not know; never a failure.
    #[serde(other)]
    Unknown,
}

impl StateType {
    /// Returns the wire name of the state, e.g. `FAILED`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Submitted => "SUBMITTED",
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Breakpoint => "BREAKPOINT",
            Self::Restarted => "RESTARTED",
            Self::Resubmitted => "RESUBMITTED",
            Self::Retrying => "RETRYING",
            Self::Retried => "RETRIED",
            Self::Killing => "KILLING",
            Self::Killed => "KILLED",
            Self::Cancelled => "CANCELLED",
            Self::Skipped => "SKIPPED",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Failed => "FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns true for states that mean the work did not complete.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Killed)
    }

    /// Returns true for failure states and [`StateType::Warning`].
    #[must_use]
    pub const fn is_failure_or_warning(self) -> bool {
        self.is_failure() || matches!(self, Self::Warning)
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of an execution and its time bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionState {
    pub current: StateType,
    pub start_date: DateTime<Utc>,
    /// Absent while the execution is still running.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// State of a single task run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRunState {
    pub current: StateType,
}

/// One run of a task inside an execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRun {
    pub id: String,
    pub task_id: String,
    pub state: TaskRunState,
}

/// A flow execution as reported by the host engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    pub namespace: String,
    pub flow_id: String,
    pub state: ExecutionState,
    #[serde(default)]
    pub task_run_list: Vec<TaskRun>,
}

impl Execution {
    /// Returns the task run responsible for a failed or warning execution.
    ///
    /// Always `None` when the execution itself is neither failed nor in
    /// warning, even if some task runs failed and were recovered.
    #[must_use]
    pub fn first_failed(&self) -> Option<&TaskRun> {
        if !self.state.current.is_failure_or_warning() {
            return None;
        }

        self.task_run_list
            .iter()
            .find(|run| run.state.current.is_failure_or_warning())
    }

    /// Returns how long the execution ran.
    ///
    /// Running executions are measured up to `now`. Negative spans (clock
    /// skew between hosts) are clamped to zero.
    #[must_use]
    pub fn duration(&self, now: DateTime<Utc>) -> TimeDelta {
        let end = self.state.end_date.unwrap_or(now);
        (end - self.state.start_date).max(TimeDelta::zero())
    }

    /// Returns the UI link of this execution below `ui_base_url`.
    ///
    /// Layout: `{base}/ui/executions/{namespace}/{flowId}/{id}`.
    #[must_use]
    pub fn link(&self, ui_base_url: &Url) -> String {
        let mut link = ui_base_url.clone();
        if let Ok(mut segments) = link.path_segments_mut() {
            segments.pop_if_empty().extend([
                "ui",
                "executions",
                self.namespace.as_str(),
                self.flow_id.as_str(),
                self.id.as_str(),
            ]);
        }
        link.to_string()
    }
}

/// Formats a duration as ISO-8601, e.g. `PT1H2M3.5S`.
///
/// Precision is milliseconds; negative values format as `PT0S`.
#[must_use]
pub fn format_iso8601(duration: TimeDelta) -> String {
    let total_ms = duration.num_milliseconds().max(0);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if millis > 0 {
        let fraction = format!("{millis:03}");
        out.push_str(&format!("{seconds}.{}S", fraction.trim_end_matches('0')));
    } else if seconds > 0 || (hours == 0 && minutes == 0) {
        out.push_str(&format!("{seconds}S"));
    }
    out
}
