//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pagerduty-alert: PagerDuty alert dispatcher
///
/// Sends one alert to the PagerDuty Events API, either from a raw payload
/// or rendered from a workflow execution.
#[derive(Debug, Parser)]
#[command(name = "pagerduty-alert")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Events API URL (e.g. <https://events.pagerduty.com/v2/enqueue>)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Fail when the API answers anything other than 200
    ///
    /// PagerDuty Events v2 usually answers 202 Accepted when it enqueues an
    /// event; with this flag that answer also exits with status 2.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Connect timeout in seconds
    #[arg(long = "connect-timeout", global = true, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Proxy URL (credentials may be embedded as user:pass@)
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Basic authentication credentials
    #[arg(long = "basic-auth", value_name = "USER:PASS", global = true)]
    pub basic_auth: Option<String>,

    /// Bearer token for Authorization header
    #[arg(long, global = true)]
    pub bearer: Option<String>,

    /// Base URL of the workflow engine UI, used for execution links
    #[arg(long = "ui-base-url", global = true)]
    pub ui_base_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for pagerduty-alert
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a payload as-is
    Raw {
        /// JSON payload sent as the request body
        #[arg(long, conflicts_with = "payload_file")]
        payload: Option<String>,

        /// File whose contents are sent as the request body
        #[arg(long = "payload-file")]
        payload_file: Option<PathBuf>,
    },

    /// Render an alert from an execution's metadata
    Execution {
        /// PagerDuty integration routing key
        #[arg(long = "routing-key")]
        routing_key: Option<String>,

        /// Event action: trigger, acknowledge or resolve
        #[arg(long = "event-action")]
        event_action: Option<String>,

        /// Incident summary
        #[arg(long)]
        summary: Option<String>,

        /// JSON file holding one execution or an array of them
        #[arg(long, value_name = "PATH")]
        executions: Option<PathBuf>,

        /// Execution the invoking run belongs to
        #[arg(long = "current-execution-id", value_name = "ID")]
        current_execution_id: Option<String>,

        /// Execution to report (defaults to the current execution)
        #[arg(long = "execution-id", value_name = "ID")]
        execution_id: Option<String>,

        /// Custom field in 'Key=Value' format (can be specified multiple times)
        #[arg(long = "custom-field", value_name = "K=V")]
        custom_fields: Vec<String>,

        /// Free-text message added to the incident details
        #[arg(long = "custom-message")]
        custom_message: Option<String>,

        /// Handlebars template replacing the built-in PagerDuty one
        #[arg(long = "template-file", value_name = "PATH")]
        template_file: Option<PathBuf>,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "pagerduty-alert.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
