//! Process-level glue for the binary: exit codes, operator hints and
//! logging setup.

use pagerduty_alert::alert::DispatchOutcome;
use pagerduty_alert::config::{ConfigError, field};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// The alert was sent. A non-200 answer in permissive mode lands here too.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Nothing was sent: bad flags or config file, unreadable executions
    /// file, unknown execution id.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Sending failed: template rendering, network, or a non-200 answer
    /// under `--strict`.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Where a finished run lands among the exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Sent,
    Misconfigured,
    Failed,
}

impl RunStatus {
    /// Classifies the result of [`crate::run::execute`].
    pub fn of(result: &Result<DispatchOutcome, RunError>) -> Self {
        match result {
            Ok(_) => Self::Sent,
            Err(e) if e.is_configuration() => Self::Misconfigured,
            Err(_) => Self::Failed,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Sent => exit_code::SUCCESS,
            Self::Misconfigured => exit_code::CONFIG_ERROR,
            Self::Failed => exit_code::runtime_error(),
        }
    }
}

const INIT_HINT: &str = "Run 'pagerduty-alert init' to generate a configuration template.";

/// Returns an operator hint for configuration errors that have an obvious fix.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::MODE => {
            Some("Pick one: 'pagerduty-alert raw ...' or 'pagerduty-alert execution ...'.")
        }
        ConfigError::MissingRequired { field: f, .. } if *f == field::URL => Some(INIT_HINT),
        ConfigError::FileRead { .. } => Some(INIT_HINT),
        ConfigError::ConflictingAuth => {
            Some("Drop --basic-auth or --bearer (or one of the [connection] credentials).")
        }
        ConfigError::InvalidTemplate { .. } => {
            Some("Templates use Handlebars syntax; the init template lists the variables.")
        }
        _ => None,
    }
}

/// Prints the hint for `error`, if any, to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
