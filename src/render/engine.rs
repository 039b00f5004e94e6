//! Handlebars-backed renderer.

use std::fmt;

use handlebars::{Handlebars, handlebars_helper};

use super::{RenderError, Renderer, TemplateContext, TemplateSource, builtin_template};

handlebars_helper!(json: |value: Json| value.to_string());

/// Renderer using Handlebars syntax.
///
/// # Behavior
///
/// - Strict mode: a placeholder the context cannot resolve is an error,
///   never an empty string.
/// - String values are JSON-escaped when substituted with `{{name}}`, so a
///   JSON template stays valid JSON whatever the values contain.
/// - The `json` helper emits a value as compact JSON; use it with the
///   triple-stash form, e.g. `{{{json customFields}}}`.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Creates a renderer with the built-in templates available.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(escape_json);
        registry.register_helper("json", Box::new(json));
        Self { registry }
    }

    /// Checks that `template` compiles, without rendering it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Render`] describing the syntax error.
    pub fn validate(template: &str) -> Result<(), RenderError> {
        handlebars::Template::compile(template)
            .map(drop)
            .map_err(|e| RenderError::Render(e.to_string()))
    }

    fn render_text(&self, template: &str, context: &TemplateContext) -> Result<String, RenderError> {
        self.registry
            .render_template(template, context)
            .map_err(|e| RenderError::Render(e.to_string()))
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsRenderer").finish_non_exhaustive()
    }
}

impl Renderer for HandlebarsRenderer {
    fn render(
        &self,
        source: TemplateSource<'_>,
        context: &TemplateContext,
    ) -> Result<String, RenderError> {
        match source {
            TemplateSource::Literal(text) => Ok(text.to_string()),
            TemplateSource::Named(id) => {
                let template = builtin_template(id)
                    .ok_or_else(|| RenderError::TemplateNotFound(id.to_string()))?;
                self.render_text(template, context)
            }
            TemplateSource::Inline(template) => self.render_text(template, context),
        }
    }
}

/// Escapes a substituted value for inclusion inside a JSON string literal.
fn escape_json(value: &str) -> String {
    let quoted = serde_json::Value::from(value).to_string();
    // Serialized form is always `"..."`; keep only the escaped contents
    quoted[1..quoted.len() - 1].to_string()
}
