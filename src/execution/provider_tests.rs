//! Tests for execution providers.

use std::io::Write;

use super::{ExecutionFileError, ExecutionProvider, InMemoryExecutions, StateType};

const ONE: &str = r#"{
    "id": "exec-1",
    "namespace": "company.team",
    "flowId": "nightly",
    "state": {"current": "FAILED", "startDate": "2024-05-01T10:00:00Z"}
}"#;

const MANY: &str = r#"[
    {
        "id": "exec-1",
        "namespace": "company.team",
        "flowId": "nightly",
        "state": {"current": "FAILED", "startDate": "2024-05-01T10:00:00Z"}
    },
    {
        "id": "exec-2",
        "namespace": "company.team",
        "flowId": "alerting",
        "state": {"current": "RUNNING", "startDate": "2024-05-01T10:02:00Z"}
    }
]"#;

mod parsing {
    use super::*;

    #[test]
    fn parses_single_object() {
        let executions = InMemoryExecutions::parse(ONE).unwrap();

        assert_eq!(executions.len(), 1);
        assert_eq!(executions.find("exec-1").unwrap().flow_id, "nightly");
    }

    #[test]
    fn parses_array() {
        let executions = InMemoryExecutions::parse(MANY).unwrap();

        assert_eq!(executions.len(), 2);
        assert_eq!(executions.find("exec-2").unwrap().flow_id, "alerting");
    }

    #[test]
    fn unknown_id_is_none() {
        let executions = InMemoryExecutions::parse(MANY).unwrap();

        assert!(executions.find("exec-404").is_none());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = InMemoryExecutions::parse(r#"{"id": "exec-1"}"#);

        assert!(matches!(result, Err(ExecutionFileError::Parse(_))));
    }

    #[test]
    fn engine_states_outside_the_common_set_are_accepted() {
        let content = r#"{
            "id": "exec-1",
            "namespace": "company.team",
            "flowId": "nightly",
            "state": {"current": "FAILED", "startDate": "2024-05-01T10:00:00Z"},
            "taskRunList": [
                {"id": "tr-1", "taskId": "extract", "state": {"current": "SUBMITTED"}},
                {"id": "tr-2", "taskId": "debug", "state": {"current": "BREAKPOINT"}},
                {"id": "tr-3", "taskId": "notify", "state": {"current": "SOMETHING_NEW"}},
                {"id": "tr-4", "taskId": "load", "state": {"current": "FAILED"}}
            ]
        }"#;

        let executions = InMemoryExecutions::parse(content).unwrap();
        let execution = executions.find("exec-1").unwrap();

        assert_eq!(execution.task_run_list[0].state.current, StateType::Submitted);
        assert_eq!(execution.task_run_list[1].state.current, StateType::Breakpoint);
        assert_eq!(execution.task_run_list[2].state.current, StateType::Unknown);
        assert_eq!(execution.first_failed().unwrap().task_id, "load");
    }

    #[test]
    fn parse_error_names_the_offending_field() {
        let content = r#"[{"id": "exec-1", "namespace": "n", "state": {"current": "FAILED", "startDate": "2024-05-01T10:00:00Z"}}]"#;

        let error = InMemoryExecutions::parse(content).unwrap_err();

        assert!(matches!(error, ExecutionFileError::Parse(_)));
        assert!(error.to_string().contains("flowId"), "{error}");
    }

    #[test]
    fn empty_provider() {
        let executions = InMemoryExecutions::new();

        assert!(executions.is_empty());
        assert!(executions.find("exec-1").is_none());
    }
}

mod loading {
    use super::*;

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANY.as_bytes()).unwrap();

        let executions = InMemoryExecutions::load(file.path()).unwrap();

        assert_eq!(executions.len(), 2);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let result = InMemoryExecutions::load(&path);

        assert!(matches!(result, Err(ExecutionFileError::Read { .. })));
        assert!(result.unwrap_err().to_string().contains("missing.json"));
    }
}
