//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Alert destination and policy
    #[serde(default)]
    pub alert: AlertSection,

    /// Transport configuration
    #[serde(default)]
    pub connection: ConnectionSection,

    /// Outbound proxy configuration
    #[serde(default)]
    pub proxy: ProxySection,

    /// Execution-derived alert configuration
    #[serde(default)]
    pub execution: ExecutionSection,
}

/// Alert configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertSection {
    /// Events API URL
    pub url: Option<String>,

    /// Fail on non-200 answers
    #[serde(default)]
    pub strict: bool,

    /// Handlebars template replacing the built-in PagerDuty one
    pub template_file: Option<PathBuf>,
}

/// Connection configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSection {
    /// Connect timeout in seconds
    pub connect_timeout: Option<u64>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// User agent override
    pub user_agent: Option<String>,

    /// Bearer token for Authorization header
    pub bearer: Option<String>,

    /// Basic authentication credentials
    pub basic_auth: Option<BasicAuthSection>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Basic authentication credentials.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicAuthSection {
    /// User name
    pub username: String,

    /// Password
    pub password: Option<String>,
}

/// Proxy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySection {
    /// Proxy URL
    pub url: Option<String>,

    /// Proxy user name
    pub username: Option<String>,

    /// Proxy password
    pub password: Option<String>,
}

/// Execution alert configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionSection {
    /// PagerDuty integration routing key
    pub routing_key: Option<String>,

    /// Event action (default: trigger)
    pub event_action: Option<String>,

    /// Incident summary
    pub summary: Option<String>,

    /// Free-text message
    pub custom_message: Option<String>,

    /// Base URL of the workflow engine UI
    pub ui_base_url: Option<String>,

    /// JSON file holding the executions
    pub executions_file: Option<PathBuf>,

    /// Extra fields reported with the incident
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# pagerduty-alert configuration file

[alert]
# Events API URL (required, can be overridden by --url)
# url = "https://events.pagerduty.com/v2/enqueue"

# Fail with exit code 2 when the API answers anything other than 200
# strict = false

# Handlebars template replacing the built-in PagerDuty template
# Available variables: {{routingKey}}, {{eventAction}}, {{summary}}, {{severity}},
# {{execution.id}}, {{execution.namespace}}, {{execution.flowId}}, {{execution.state}},
# {{link}}, {{startDate}}, {{duration}}, {{firstFailed.taskId}}, {{firstFailed.id}},
# {{customMessage}}, {{{json customFields}}}
# template_file = "alert.hbs"

[connection]
# Connect timeout in seconds (default: 10)
# connect_timeout = 10

# Request timeout in seconds (default: 30)
# timeout = 30

# User agent (default: pagerduty-alert/<version>)
# user_agent = "pagerduty-alert"

# Bearer token for Authorization header (exclusive with basic_auth)
# bearer = "your-token-here"

# Basic authentication (exclusive with bearer)
# [connection.basic_auth]
# username = "user"
# password = "secret"

# HTTP headers
# [connection.headers]
# X-Custom-Header = "value"

[proxy]
# Proxy URL (http, https or socks5)
# url = "http://proxy.internal:3128"
# username = "user"
# password = "secret"

[execution]
# PagerDuty integration routing key (required for execution alerts)
# routing_key = "your-routing-key"

# Event action: trigger, acknowledge or resolve (default: trigger)
# event_action = "trigger"

# Incident summary (required for execution alerts)
# summary = "Flow execution failed"

# Free-text message added to the incident details
# custom_message = "Check the nightly load"

# Base URL of the workflow engine UI (default: http://localhost:8080)
# ui_base_url = "http://localhost:8080"

# JSON file holding one execution or an array of them
# executions_file = "executions.json"

# Extra fields reported with the incident
# [execution.custom_fields]
# env = "prod"
"#
    .to_string()
}
