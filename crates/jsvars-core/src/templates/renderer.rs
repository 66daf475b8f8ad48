//! Handlebars-based template renderer.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled, so any
//! `{{variable}}` referenced in a template must be present in the data context.
//! The templates produce JavaScript; a silently empty global name would only
//! surface as a syntax error in the browser.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "function": "p", "storage": "__phptojavascript" });
//! let output = renderer.render(embedded::ACCESSOR_JS, &data)?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{Error, Result};

/// Template renderer using Handlebars in strict mode.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| Error::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::embedded;
    use serde_json::json;

    #[test]
    fn test_render_substitutes_variables() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("var {{storage}}; {{function}}();", &json!({ "function": "p", "storage": "s" }))
            .unwrap();
        assert_eq!(out, "var s; p();");
    }

    #[test]
    fn test_strict_mode_rejects_missing_variable() {
        let renderer = TemplateRenderer::new();
        let result = renderer.render("{{function}}", &json!({ "storage": "s" }));
        assert!(matches!(result, Err(Error::TemplateRender(_))));
    }

    #[test]
    fn test_embedded_accessor_renders() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render(embedded::ACCESSOR_JS, &json!({ "function": "vars", "storage": "__store" }))
            .unwrap();
        assert!(out.contains("root.vars = function (key)"));
        assert!(out.contains("root.__store = root.__store || {};"));
        assert!(!out.contains("{{"));
    }
}
