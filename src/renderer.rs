//! Template rendering for Scribe.
//! Resolves named templates against a generator's template directory and
//! renders inline template strings, both through MiniJinja.

use crate::error::{Error, Result};
use minijinja::Environment;
use std::path::Path;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders the named template with the given context.
    ///
    /// # Arguments
    /// * `name` - Template identifier, resolved by the engine
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String>;

    /// Renders a literal template string with the given context.
    fn render_inline(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with no named templates, for inline rendering only.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Generated files keep the template's final newline.
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Creates a renderer that resolves template names against files under
    /// `templates_dir`.
    pub fn from_dir(templates_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_loader(minijinja::path_loader(templates_dir));
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a named template using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if:
    ///   - Template lookup fails
    ///   - Template rendering fails
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        let template = self.env.get_template(name).map_err(Error::MinijinjaError)?;
        template.render(context).map_err(Error::MinijinjaError)
    }

    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if:
    ///   - Template addition fails
    ///   - Template retrieval fails
    ///   - Template rendering fails
    fn render_inline(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template("inline", template)
            .map_err(Error::MinijinjaError)?;

        let tmpl = env.get_template("inline").map_err(Error::MinijinjaError)?;

        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}
