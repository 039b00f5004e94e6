//! Tests for CLI argument parsing.

use clap::{CommandFactory, Parser};

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_raw_with_payload() {
        let cli = Cli::parse_from_iter([
            "pagerduty-alert",
            "raw",
            "--url",
            "https://events.pagerduty.com/v2/enqueue",
            "--payload",
            r#"{"routing_key":"R0UT1NG"}"#,
        ]);

        assert_eq!(
            cli.url.as_deref(),
            Some("https://events.pagerduty.com/v2/enqueue")
        );
        match cli.command {
            Some(Command::Raw {
                payload,
                payload_file,
            }) => {
                assert_eq!(payload.as_deref(), Some(r#"{"routing_key":"R0UT1NG"}"#));
                assert!(payload_file.is_none());
            }
            other => panic!("Expected Raw command, got {other:?}"),
        }
    }

    #[test]
    fn payload_and_payload_file_conflict() {
        let result = Cli::try_parse_from([
            "pagerduty-alert",
            "raw",
            "--payload",
            "{}",
            "--payload-file",
            "alert.json",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn parse_execution_options() {
        let cli = Cli::parse_from_iter([
            "pagerduty-alert",
            "execution",
            "--routing-key",
            "R0UT1NG",
            "--event-action",
            "resolve",
            "--summary",
            "Nightly failed",
            "--executions",
            "executions.json",
            "--current-execution-id",
            "exec-1",
            "--execution-id",
            "exec-2",
            "--custom-field",
            "env=prod",
            "--custom-field",
            "team=data",
            "--custom-message",
            "Check the load",
        ]);

        match cli.command {
            Some(Command::Execution {
                routing_key,
                event_action,
                summary,
                executions,
                current_execution_id,
                execution_id,
                custom_fields,
                custom_message,
                template_file,
            }) => {
                assert_eq!(routing_key.as_deref(), Some("R0UT1NG"));
                assert_eq!(event_action.as_deref(), Some("resolve"));
                assert_eq!(summary.as_deref(), Some("Nightly failed"));
                assert_eq!(executions.unwrap().to_str(), Some("executions.json"));
                assert_eq!(current_execution_id.as_deref(), Some("exec-1"));
                assert_eq!(execution_id.as_deref(), Some("exec-2"));
                assert_eq!(custom_fields, vec!["env=prod", "team=data"]);
                assert_eq!(custom_message.as_deref(), Some("Check the load"));
                assert!(template_file.is_none());
            }
            other => panic!("Expected Execution command, got {other:?}"),
        }
    }

    #[test]
    fn parse_connection_options() {
        let cli = Cli::parse_from_iter([
            "pagerduty-alert",
            "--connect-timeout",
            "5",
            "--timeout",
            "20",
            "--proxy",
            "http://proxy:3128",
            "--header",
            "X-Api-Key=secret",
            "--header",
            "X-Team: data",
            "--basic-auth",
            "user:pass",
            "raw",
        ]);

        assert_eq!(cli.connect_timeout, Some(5));
        assert_eq!(cli.timeout, Some(20));
        assert_eq!(cli.proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(cli.headers, vec!["X-Api-Key=secret", "X-Team: data"]);
        assert_eq!(cli.basic_auth.as_deref(), Some("user:pass"));
        assert!(cli.bearer.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "pagerduty-alert",
            "raw",
            "--strict",
            "--verbose",
            "--bearer",
            "token123",
            "--config",
            "/path/to/config.toml",
        ]);

        assert!(cli.strict);
        assert!(cli.verbose);
        assert_eq!(cli.bearer.as_deref(), Some("token123"));
        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/path/to/config.toml")
        );
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from_iter(["pagerduty-alert"]);

        // Optional fields have no defaults in CLI - None when not specified
        assert!(cli.command.is_none());
        assert!(cli.url.is_none());
        assert!(cli.connect_timeout.is_none());
        assert!(cli.timeout.is_none());
        assert!(cli.ui_base_url.is_none());
        // Boolean flags default to false
        assert!(!cli.strict);
        assert!(!cli.verbose);
        // Vec fields default to empty
        assert!(cli.headers.is_empty());
    }
}

mod init_command {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["pagerduty-alert", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("pagerduty-alert.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter([
            "pagerduty-alert",
            "init",
            "--output",
            "/custom/path/config.toml",
        ]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/custom/path/config.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn is_init_false_for_alert_modes() {
        let cli = Cli::parse_from_iter(["pagerduty-alert", "raw", "--url", "https://example.com"]);

        assert!(!cli.is_init());
    }
}

mod help {
    use super::*;

    #[test]
    fn strict_help_warns_about_accepted_answers() {
        let command = Cli::command();
        let strict = command
            .get_arguments()
            .find(|arg| arg.get_id() == "strict")
            .unwrap();

        let help = strict.get_long_help().unwrap().to_string();

        assert!(help.contains("202"), "{help}");
    }
}
