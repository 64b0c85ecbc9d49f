//! Template rendering engines for stencil.
//! The engine evaluates template source against a JSON context and returns
//! the text it produces.
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template source with the given context.
    ///
    /// # Arguments
    /// * `name` - Name the template is reported under in errors
    /// * `template` - Template source to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Everything the template wrote
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer.
    ///
    /// Undefined variables render as empty text and a trailing newline in the
    /// source is kept, so the output matches the file byte for byte outside of
    /// its expressions. Output is not escaped.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }

    /// Enables or disables HTML escaping of every expression.
    pub fn with_auto_escape(mut self, enabled: bool) -> Self {
        if enabled {
            self.env.set_auto_escape_callback(|_| AutoEscape::Html);
        } else {
            self.env.set_auto_escape_callback(|_| AutoEscape::None);
        }
        self
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders template source using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the source fails to parse or evaluate
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_named_str(name, template, context).map_err(Error::MinijinjaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_variables() {
        let renderer = MiniJinjaRenderer::new();
        let context = json!({"name": "test", "value": 42});

        let result = renderer.render("hello", "Hello {{ name }}!", &context).unwrap();
        assert_eq!(result, "Hello test!");

        let result = renderer.render("value", "Value: {{ value }}", &context).unwrap();
        assert_eq!(result, "Value: 42");
    }

    #[test]
    fn test_undefined_variable_renders_empty() {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render("t", "[{{ missing }}]", &json!({})).unwrap();
        assert_eq!(result, "[]");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render("t", "line\n", &json!({})).unwrap();
        assert_eq!(result, "line\n");
    }

    #[test]
    fn test_auto_escape() {
        let context = json!({"html": "<b>"});

        let plain = MiniJinjaRenderer::new();
        assert_eq!(plain.render("t.html", "{{ html }}", &context).unwrap(), "<b>");

        let escaping = MiniJinjaRenderer::new().with_auto_escape(true);
        assert_eq!(escaping.render("t", "{{ html }}", &context).unwrap(), "&lt;b&gt;");
    }

    #[test]
    fn test_syntax_error() {
        let renderer = MiniJinjaRenderer::new();
        match renderer.render("broken", "{% if %}", &json!({})) {
            Err(Error::MinijinjaError(_)) => (),
            other => panic!("Expected MinijinjaError, got {:?}", other),
        }
    }
}
