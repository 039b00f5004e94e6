//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [alert]
            url = "https://events.pagerduty.com/v2/enqueue"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(
            config.alert.url.as_deref(),
            Some("https://events.pagerduty.com/v2/enqueue")
        );
        assert!(!config.alert.strict);
    }

    #[test]
    fn parse_connection_section() {
        let toml = r#"
            [connection]
            connect_timeout = 5
            timeout = 15
            user_agent = "alerts/1.0"
            bearer = "secret-token"

            [connection.basic_auth]
            username = "user"
            password = "pass"

            [connection.headers]
            X-Custom-Header = "custom-value"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let connection = &config.connection;

        assert_eq!(connection.connect_timeout, Some(5));
        assert_eq!(connection.timeout, Some(15));
        assert_eq!(connection.user_agent.as_deref(), Some("alerts/1.0"));
        assert_eq!(connection.bearer.as_deref(), Some("secret-token"));
        let basic = connection.basic_auth.as_ref().unwrap();
        assert_eq!(basic.username, "user");
        assert_eq!(basic.password.as_deref(), Some("pass"));
        assert_eq!(
            connection.headers.get("X-Custom-Header").map(String::as_str),
            Some("custom-value")
        );
    }

    #[test]
    fn parse_proxy_section() {
        let toml = r#"
            [proxy]
            url = "http://proxy:3128"
            username = "user"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.proxy.url.as_deref(), Some("http://proxy:3128"));
        assert_eq!(config.proxy.username.as_deref(), Some("user"));
        assert!(config.proxy.password.is_none());
    }

    #[test]
    fn parse_execution_section() {
        let toml = r#"
            [execution]
            routing_key = "R0UT1NG"
            event_action = "acknowledge"
            summary = "Nightly failed"
            custom_message = "Check the load"
            ui_base_url = "https://kestra.internal"
            executions_file = "executions.json"

            [execution.custom_fields]
            env = "prod"
            attempt = 2
            critical = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let execution = &config.execution;

        assert_eq!(execution.routing_key.as_deref(), Some("R0UT1NG"));
        assert_eq!(execution.event_action.as_deref(), Some("acknowledge"));
        assert_eq!(execution.summary.as_deref(), Some("Nightly failed"));
        assert_eq!(execution.custom_message.as_deref(), Some("Check the load"));
        assert_eq!(execution.ui_base_url.as_deref(), Some("https://kestra.internal"));
        assert_eq!(
            execution.executions_file.as_ref().unwrap().to_str(),
            Some("executions.json")
        );
        assert_eq!(execution.custom_fields["env"], "prod");
        assert_eq!(execution.custom_fields["attempt"], 2);
        assert_eq!(execution.custom_fields["critical"], true);
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.alert.url.is_none());
        assert!(config.connection.headers.is_empty());
        assert!(config.execution.custom_fields.is_empty());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [alert]
            url = "https://example.com"
            retries = 3
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(TomlConfig::parse("[notifier]\nurl = \"x\"").is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let template = default_config_template();

        let config = TomlConfig::parse(&template).unwrap();

        assert!(config.alert.url.is_none());
        assert!(!config.alert.strict);
    }

    #[test]
    fn template_has_all_sections() {
        let template = default_config_template();

        for section in ["[alert]", "[connection]", "[proxy]", "[execution]"] {
            assert!(template.contains(section), "Template should contain {section}");
        }
    }

    #[test]
    fn template_documents_variables() {
        let template = default_config_template();

        assert!(template.contains("{{firstFailed.taskId}}"));
        assert!(template.contains("{{{json customFields}}}"));
    }
}

mod file_loading {
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [alert]
            url = "https://example.com"
        "#
        )
        .unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.alert.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let path = Path::new("nonexistent_config_file_12345.toml");
        let result = TomlConfig::load(path);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_file_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = TomlConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}
