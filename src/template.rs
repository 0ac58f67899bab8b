use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Flat variable mapping used to render message and tag
/// templates. Keys with no value are simply not stored; they
/// render as the empty string like any unknown name.
#[derive(Debug, Default, Clone)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a variable. A `None` value leaves the name
    /// undefined, which renders as `""`.
    pub fn set(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.vars.insert(name.to_string(), value.to_string());
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Substitute every `{{ name }}` placeholder with its context
/// value, or the empty string when the name is undefined.
/// Text without placeholders passes through unchanged.
#[must_use]
pub fn render(template: &str, ctx: &TemplateContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            ctx.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}
