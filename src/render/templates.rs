//! Built-in payload templates.

/// Identifier of the built-in PagerDuty Events API v2 template.
pub const PAGERDUTY_TEMPLATE: &str = "pagerduty-template";

const BUILTIN: &[(&str, &str)] = &[(
    PAGERDUTY_TEMPLATE,
    include_str!("templates/pagerduty-template.hbs"),
)];

/// Returns the source of the built-in template registered under `id`.
#[must_use]
pub fn builtin_template(id: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, source)| *source)
}
