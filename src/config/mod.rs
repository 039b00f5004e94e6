//! Configuration layer for pagerduty-alert.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`], [`Mode`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Connection options are layered the same way: defaults, then the TOML
//! `[connection]`/`[proxy]` sections, then CLI flags. Headers merge per name.
//! Custom fields merge per key, CLI winning.
//!
//! # Boolean Flag Semantics
//!
//! `--strict` uses OR semantics: once set `true` in TOML, the CLI cannot
//! turn it off.
//!
//! # Credentials
//!
//! Basic auth and a bearer token are mutually exclusive within one source.
//! A CLI credential replaces a TOML one of either kind.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ExecutionMode, Mode, ValidatedConfig, write_default_config};
