//! Lookup of executions by identifier.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use super::{Execution, ExecutionFileError};

/// Source of execution metadata.
///
/// In production the host engine answers these lookups; the CLI reads a
/// JSON export through [`InMemoryExecutions::load`].
pub trait ExecutionProvider: Send + Sync {
    /// Returns the execution with the given identifier, if known.
    fn find(&self, id: &str) -> Option<&Execution>;
}

/// Executions held in memory, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutions {
    executions: HashMap<String, Execution>,
}

impl InMemoryExecutions {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an execution, replacing any previous one with the same id.
    #[must_use]
    pub fn with(mut self, execution: Execution) -> Self {
        self.executions.insert(execution.id.clone(), execution);
        self
    }

    /// Returns the number of executions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    /// Returns true if no executions are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    /// Loads executions from a JSON file holding one execution object or an
    /// array of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ExecutionFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ExecutionFileError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses executions from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not describe
    /// executions.
    pub fn parse(content: &str) -> Result<Self, ExecutionFileError> {
        // One object or an array of them; decode by shape so errors name the field
        let value: Value = serde_json::from_str(content)?;
        let executions: Vec<Execution> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };

        Ok(executions.into_iter().collect())
    }
}

impl FromIterator<Execution> for InMemoryExecutions {
    fn from_iter<I: IntoIterator<Item = Execution>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl ExecutionProvider for InMemoryExecutions {
    fn find(&self, id: &str) -> Option<&Execution> {
        self.executions.get(id)
    }
}
