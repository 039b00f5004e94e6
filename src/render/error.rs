//! Error types for payload rendering.

use thiserror::Error;

/// Error type for template rendering.
///
/// Rendering errors are configuration problems; retrying cannot fix them.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A named template is not registered.
    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    /// The template failed to compile or referenced a missing variable.
    #[error("Failed to render template: {0}")]
    Render(String),

    /// The render context could not be converted into a JSON object.
    #[error("Invalid template context: {0}")]
    Context(String),
}
