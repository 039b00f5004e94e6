//! Tests for the execution model.

use chrono::{DateTime, TimeDelta, Utc};
use url::Url;

use super::{Execution, ExecutionState, StateType, TaskRun, TaskRunState, format_iso8601};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

fn task_run(id: &str, task_id: &str, state: StateType) -> TaskRun {
    TaskRun {
        id: id.to_string(),
        task_id: task_id.to_string(),
        state: TaskRunState { current: state },
    }
}

fn execution(state: StateType, task_runs: Vec<TaskRun>) -> Execution {
    Execution {
        id: "exec-1".to_string(),
        namespace: "company.team".to_string(),
        flow_id: "nightly".to_string(),
        state: ExecutionState {
            current: state,
            start_date: at("2024-05-01T10:00:00Z"),
            end_date: Some(at("2024-05-01T10:01:05Z")),
        },
        task_run_list: task_runs,
    }
}

mod state_type {
    use super::*;

    #[test]
    fn failure_states() {
        assert!(StateType::Failed.is_failure());
        assert!(StateType::Killed.is_failure());
        assert!(!StateType::Warning.is_failure());
        assert!(!StateType::Success.is_failure());
    }

    #[test]
    fn warning_counts_as_failure_or_warning() {
        assert!(StateType::Warning.is_failure_or_warning());
        assert!(StateType::Failed.is_failure_or_warning());
        assert!(!StateType::Running.is_failure_or_warning());
    }

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(StateType::Failed.to_string(), "FAILED");
        assert_eq!(StateType::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn deserializes_screaming_case() {
        let state: StateType = serde_json::from_str(r#""WARNING""#).unwrap();
        assert_eq!(state, StateType::Warning);
    }
}

mod first_failed {
    use super::*;

    #[test]
    fn failed_execution_reports_first_failed_task() {
        let exec = execution(
            StateType::Failed,
            vec![
                task_run("tr-1", "download", StateType::Success),
                task_run("tr-2", "transform", StateType::Failed),
                task_run("tr-3", "upload", StateType::Failed),
            ],
        );

        let failed = exec.first_failed().unwrap();
        assert_eq!(failed.task_id, "transform");
        assert_eq!(failed.id, "tr-2");
    }

    #[test]
    fn warning_execution_reports_warning_task() {
        let exec = execution(
            StateType::Warning,
            vec![
                task_run("tr-1", "download", StateType::Success),
                task_run("tr-2", "lint", StateType::Warning),
            ],
        );

        assert_eq!(exec.first_failed().unwrap().task_id, "lint");
    }

    #[test]
    fn successful_execution_reports_nothing() {
        // A recovered failure must not surface on a successful execution
        let exec = execution(
            StateType::Success,
            vec![task_run("tr-1", "flaky", StateType::Failed)],
        );

        assert!(exec.first_failed().is_none());
    }

    #[test]
    fn failed_execution_without_failed_task_reports_nothing() {
        let exec = execution(
            StateType::Failed,
            vec![task_run("tr-1", "download", StateType::Success)],
        );

        assert!(exec.first_failed().is_none());
    }
}

mod duration {
    use super::*;

    #[test]
    fn ended_execution_uses_end_date() {
        let exec = execution(StateType::Success, vec![]);

        let duration = exec.duration(at("2030-01-01T00:00:00Z"));

        assert_eq!(duration, TimeDelta::seconds(65));
    }

    #[test]
    fn running_execution_measures_up_to_now() {
        let mut exec = execution(StateType::Running, vec![]);
        exec.state.end_date = None;

        let duration = exec.duration(at("2024-05-01T10:00:30Z"));

        assert_eq!(duration, TimeDelta::seconds(30));
    }

    #[test]
    fn negative_span_is_clamped() {
        let mut exec = execution(StateType::Running, vec![]);
        exec.state.end_date = None;

        let duration = exec.duration(at("2024-05-01T09:00:00Z"));

        assert_eq!(duration, TimeDelta::zero());
    }
}

mod link {
    use super::*;

    #[test]
    fn builds_execution_link_below_root() {
        let exec = execution(StateType::Failed, vec![]);
        let base = Url::parse("http://localhost:8080").unwrap();

        assert_eq!(
            exec.link(&base),
            "http://localhost:8080/ui/executions/company.team/nightly/exec-1"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let exec = execution(StateType::Failed, vec![]);
        let base = Url::parse("https://ops.example.com/kestra/").unwrap();

        assert_eq!(
            exec.link(&base),
            "https://ops.example.com/kestra/ui/executions/company.team/nightly/exec-1"
        );
    }
}

mod iso8601 {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_iso8601(TimeDelta::zero()), "PT0S");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_iso8601(TimeDelta::seconds(65)), "PT1M5S");
    }

    #[test]
    fn formats_whole_hours() {
        assert_eq!(format_iso8601(TimeDelta::hours(2)), "PT2H");
    }

    #[test]
    fn formats_fractional_seconds() {
        assert_eq!(format_iso8601(TimeDelta::milliseconds(3_723_500)), "PT1H2M3.5S");
        assert_eq!(format_iso8601(TimeDelta::milliseconds(42)), "PT0.042S");
    }

    #[test]
    fn negative_formats_as_zero() {
        assert_eq!(format_iso8601(TimeDelta::seconds(-5)), "PT0S");
    }
}

mod serde_format {
    use super::*;

    #[test]
    fn parses_engine_json() {
        let json = r#"{
            "id": "exec-9",
            "namespace": "prod.etl",
            "flowId": "daily",
            "state": {"current": "FAILED", "startDate": "2024-05-01T10:00:00Z"},
            "taskRunList": [
                {"id": "tr-1", "taskId": "load", "state": {"current": "FAILED"}}
            ]
        }"#;

        let exec: Execution = serde_json::from_str(json).unwrap();

        assert_eq!(exec.flow_id, "daily");
        assert_eq!(exec.state.current, StateType::Failed);
        assert!(exec.state.end_date.is_none());
        assert_eq!(exec.task_run_list[0].task_id, "load");
    }

    #[test]
    fn task_run_list_defaults_to_empty() {
        let json = r#"{
            "id": "exec-9",
            "namespace": "prod.etl",
            "flowId": "daily",
            "state": {"current": "SUCCESS", "startDate": "2024-05-01T10:00:00Z"}
        }"#;

        let exec: Execution = serde_json::from_str(json).unwrap();

        assert!(exec.task_run_list.is_empty());
    }
}
