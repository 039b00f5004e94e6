//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use serde_json::Value;
use url::Url;

use crate::alert::{ConfigurationError, ExecutionAlert, Strictness, TargetUrl};
use crate::render::HandlebarsRenderer;
use crate::transport::{Auth, ConnectionOptions, ConnectionOverrides, ProxyOptions};

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// What the invocation sends.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Send a caller-supplied payload verbatim.
    Raw {
        /// Request body, if any
        payload: Option<String>,
    },
    /// Render an alert from an execution.
    Execution(ExecutionMode),
}

/// Inputs of an execution-derived alert.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionMode {
    /// Alert fields
    pub alert: ExecutionAlert,
    /// JSON file holding the executions
    pub executions_file: PathBuf,
    /// Execution the invoking run belongs to
    pub current_execution_id: Option<String>,
    /// Template replacing the built-in one
    pub template: Option<String>,
}

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Events API URL (required)
    pub url: Url,

    /// Raw or execution-derived alert
    pub mode: Mode,

    /// Transport options
    pub connection: ConnectionOptions,

    /// Base URL of the workflow engine UI, used for execution links
    pub ui_base_url: Url,

    /// How non-200 answers are reported
    pub strictness: Strictness,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            Mode::Raw { .. } => "raw",
            Mode::Execution(_) => "execution",
        };
        let auth = match self.connection.auth {
            Some(Auth::Basic { .. }) => "basic",
            Some(Auth::Bearer(_)) => "bearer",
            None => "none",
        };
        let proxy = self
            .connection
            .proxy
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| redacted(&p.url));

        write!(
            f,
            "Config {{ url: {}, mode: {mode}, strict: {}, connect_timeout: {}s, timeout: {}s, \
             proxy: {proxy}, auth: {auth}, headers: {} }}",
            redacted(&self.url),
            self.strictness == Strictness::Strict,
            self.connection.connect_timeout.as_secs(),
            self.connection.request_timeout.as_secs(),
            self.connection.headers.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No alert subcommand was given, or a required field is missing
    /// - A URL is invalid
    /// - Duration values are zero
    /// - Header or custom field format is invalid
    /// - Basic auth and a bearer token are both given at the same level
    /// - A payload, template or the template syntax is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        // Mode first so a missing subcommand is reported before anything else
        let mode = Self::resolve_mode(cli, toml)?;

        let url = Self::resolve_url(cli, toml)?;

        let ui_base_url = Self::resolve_ui_base_url(cli, toml)?;

        // Defaults, then TOML, then CLI
        let connection = ConnectionOptions::new()
            .with_overrides(Self::toml_overrides(toml)?)
            .with_overrides(Self::cli_overrides(cli)?);

        // Flags only enable: true in either source wins
        let strict = cli.strict || toml.is_some_and(|t| t.alert.strict);
        let strictness = if strict {
            Strictness::Strict
        } else {
            Strictness::Permissive
        };

        Ok(Self {
            url,
            mode,
            connection,
            ui_base_url,
            strictness,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_mode(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Mode, ConfigError> {
        match cli.command {
            Some(Command::Raw {
                ref payload,
                ref payload_file,
            }) => {
                let payload = match (payload, payload_file) {
                    (Some(text), _) => Some(text.clone()),
                    (None, Some(path)) => Some(read_file(path)?),
                    (None, None) => None,
                };
                Ok(Mode::Raw { payload })
            }
            Some(Command::Execution { .. }) => {
                Self::resolve_execution(cli, toml).map(Mode::Execution)
            }
            Some(Command::Init { .. }) | None => Err(ConfigError::missing(
                field::MODE,
                "Use the 'raw' or 'execution' subcommand",
            )),
        }
    }

    fn resolve_execution(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ExecutionMode, ConfigError> {
        let Some(Command::Execution {
            ref routing_key,
            ref event_action,
            ref summary,
            ref executions,
            ref current_execution_id,
            ref execution_id,
            ref custom_fields,
            ref custom_message,
            ref template_file,
        }) = cli.command
        else {
            return Err(ConfigError::missing(
                field::MODE,
                "Use the 'execution' subcommand",
            ));
        };
        let section = toml.map(|t| &t.execution);

        let routing_key = routing_key
            .clone()
            .or_else(|| section.and_then(|s| s.routing_key.clone()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::ROUTING_KEY,
                    "Use --routing-key or set execution.routing_key in config file",
                )
            })?;

        let summary = summary
            .clone()
            .or_else(|| section.and_then(|s| s.summary.clone()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SUMMARY,
                    "Use --summary or set execution.summary in config file",
                )
            })?;

        // Priority: CLI explicit > TOML > default
        let event_action = event_action
            .clone()
            .or_else(|| section.and_then(|s| s.event_action.clone()))
            .unwrap_or_else(|| defaults::EVENT_ACTION.to_string());

        let executions_file = executions
            .clone()
            .or_else(|| section.and_then(|s| s.executions_file.clone()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::EXECUTIONS,
                    "Use --executions or set execution.executions_file in config file",
                )
            })?;

        let mut alert = ExecutionAlert::new(routing_key, event_action, summary);
        alert.execution_id.clone_from(execution_id);
        alert.custom_message = custom_message
            .clone()
            .or_else(|| section.and_then(|s| s.custom_message.clone()));

        // TOML fields first, CLI fields override per key
        if let Some(section) = section {
            alert.custom_fields.extend(section.custom_fields.clone());
        }
        for entry in custom_fields {
            let (name, value) = parse_custom_field(entry)?;
            alert.custom_fields.insert(name, Value::String(value));
        }

        let template_path = template_file
            .clone()
            .or_else(|| toml.and_then(|t| t.alert.template_file.clone()));
        let template = template_path.as_deref().map(load_template).transpose()?;

        Ok(ExecutionMode {
            alert,
            executions_file,
            current_execution_id: current_execution_id.clone(),
            template,
        })
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.alert.url.as_deref()))
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set alert.url in config file")
            })?;

        TargetUrl::parse(url_str)
            .map(|target| target.as_url().clone())
            .map_err(|e| ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: match e {
                    ConfigurationError::InvalidUrl { reason, .. } => reason,
                    other => other.to_string(),
                },
            })
    }

    fn resolve_ui_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .ui_base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.execution.ui_base_url.as_deref()))
            .unwrap_or(defaults::UI_BASE_URL);

        Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })
    }

    fn toml_overrides(toml: Option<&TomlConfig>) -> Result<ConnectionOverrides, ConfigError> {
        let Some(toml) = toml else {
            return Ok(ConnectionOverrides::default());
        };
        let connection = &toml.connection;

        let mut headers = HeaderMap::new();
        for (name, value) in &connection.headers {
            headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
        }

        let basic = connection.basic_auth.as_ref().map(|b| Auth::Basic {
            username: b.username.clone(),
            password: b.password.clone(),
        });
        let bearer = connection.bearer.clone().map(Auth::Bearer);

        let proxy = toml
            .proxy
            .url
            .as_deref()
            .map(|url| {
                parse_proxy(url).map(|proxy| match toml.proxy.username {
                    Some(ref username) => {
                        proxy.with_credentials(username.clone(), toml.proxy.password.clone())
                    }
                    None => proxy,
                })
            })
            .transpose()?;

        Ok(ConnectionOverrides {
            connect_timeout: connection
                .connect_timeout
                .map(|secs| seconds("connect_timeout", secs))
                .transpose()?,
            request_timeout: connection
                .timeout
                .map(|secs| seconds("timeout", secs))
                .transpose()?,
            proxy,
            auth: exclusive_auth(basic, bearer)?,
            headers,
            user_agent: connection.user_agent.clone(),
        })
    }

    fn cli_overrides(cli: &Cli) -> Result<ConnectionOverrides, ConfigError> {
        let mut headers = HeaderMap::new();
        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            headers.append(parse_header_name(&name)?, parse_header_value(&name, &value)?);
        }

        let basic = cli.basic_auth.as_deref().map(|pair| match pair.split_once(':') {
            Some((username, password)) => Auth::Basic {
                username: username.to_string(),
                password: Some(password.to_string()),
            },
            None => Auth::Basic {
                username: pair.to_string(),
                password: None,
            },
        });
        let bearer = cli.bearer.clone().map(Auth::Bearer);

        Ok(ConnectionOverrides {
            connect_timeout: cli
                .connect_timeout
                .map(|secs| seconds("connect_timeout", secs))
                .transpose()?,
            request_timeout: cli
                .timeout
                .map(|secs| seconds("timeout", secs))
                .transpose()?,
            proxy: cli.proxy.as_deref().map(parse_proxy).transpose()?,
            auth: exclusive_auth(basic, bearer)?,
            headers,
            user_agent: None,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn load_template(path: &Path) -> Result<String, ConfigError> {
    let template = read_file(path)?;
    HandlebarsRenderer::validate(&template).map_err(|e| ConfigError::InvalidTemplate {
        reason: e.to_string(),
    })?;
    Ok(template)
}

fn seconds(field: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn exclusive_auth(basic: Option<Auth>, bearer: Option<Auth>) -> Result<Option<Auth>, ConfigError> {
    match (basic, bearer) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingAuth),
        (basic, bearer) => Ok(basic.or(bearer)),
    }
}

/// Parses a proxy URL, lifting embedded `user:pass@` credentials out of it.
fn parse_proxy(raw: &str) -> Result<ProxyOptions, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidProxy {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https" | "socks5" | "socks5h") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    let username = url.username().to_string();
    let password = url.password().map(ToString::to_string);
    // Credentials travel separately from the URL
    let _ = url.set_username("");
    let _ = url.set_password(None);

    let proxy = ProxyOptions::new(url);
    if username.is_empty() {
        Ok(proxy)
    } else {
        Ok(proxy.with_credentials(username, password))
    }
}

/// Returns `url` with any password replaced, for logging.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    if url.password().is_some() {
        let _ = url.set_password(Some("***"));
    }
    url.to_string()
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_custom_field(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidCustomField {
            value: s.to_string(),
        }),
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
