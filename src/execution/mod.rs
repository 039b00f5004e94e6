//! Execution metadata from the host workflow engine.
//!
//! This module provides:
//! - The execution model ([`Execution`], [`StateType`], [`TaskRun`])
//! - Lookup by identifier ([`ExecutionProvider`], [`InMemoryExecutions`])
//! - The invoking run's context ([`RunContext`])

mod error;
mod model;
mod provider;
mod run_context;

#[cfg(test)]
mod model_tests;
#[cfg(test)]
mod provider_tests;

pub use error::ExecutionFileError;
pub use model::{
    Execution, ExecutionState, StateType, TaskRun, TaskRunState, format_iso8601,
};
pub use provider::{ExecutionProvider, InMemoryExecutions};
pub use run_context::RunContext;
