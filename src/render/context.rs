//! Variables available to templates.

use serde::Serialize;
use serde_json::{Map, Value};

use super::RenderError;

/// Mapping from variable name to value handed to a [`Renderer`].
///
/// Values are strings, scalars or nested mappings. A context is built once
/// per invocation and read-only afterwards.
///
/// [`Renderer`]: super::Renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext(Map<String, Value>);

impl TemplateContext {
    /// Creates an empty context.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a context from any value serializing to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Context`] if `data` fails to serialize or
    /// does not serialize to an object.
    pub fn from_serializable<T: Serialize>(data: &T) -> Result<Self, RenderError> {
        match serde_json::to_value(data) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(RenderError::Context(format!(
                "expected an object, got {}",
                kind_of(&other)
            ))),
            Err(e) => Err(RenderError::Context(e.to_string())),
        }
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns true if no variables are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
