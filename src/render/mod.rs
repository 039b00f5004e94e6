//! Payload rendering.
//!
//! A [`Renderer`] turns a [`TemplateSource`] and a [`TemplateContext`] into
//! the final request body. The production implementation is
//! [`HandlebarsRenderer`]; the templating technology stays behind the trait.

mod context;
mod engine;
mod error;
mod templates;


pub use context::TemplateContext;
pub use engine::HandlebarsRenderer;
pub use error::RenderError;
pub use templates::{PAGERDUTY_TEMPLATE, builtin_template};

/// Where the text to render comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource<'a> {
    /// Text already resolved by the caller; used verbatim as the body.
    Literal(&'a str),
    /// A built-in template looked up by identifier.
    Named(&'a str),
    /// A caller-supplied template rendered against the context.
    Inline(&'a str),
}

/// Renders alert payloads.
///
/// Implementations must be pure: the same source and context always
/// produce the same output.
pub trait Renderer: Send + Sync {
    /// Renders `source` against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] for an unknown named
    /// template and [`RenderError::Render`] for syntax errors or
    /// placeholders the context cannot resolve.
    fn render(
        &self,
        source: TemplateSource<'_>,
        context: &TemplateContext,
    ) -> Result<String, RenderError>;
}
