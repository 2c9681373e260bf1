//! Template rendering using the Tera template engine
//!
//! Templates are user content, looked up by file name from the site's
//! `_templates/` directory. The renderer is constructed once at startup
//! and passed explicitly into the generator; there is no module-level
//! template cache.

use anyhow::{anyhow, Result};
use std::path::Path;
use tera::{Context, Tera};

/// Template renderer over a `_templates/` directory.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with all `*.html` templates under `templates_dir`
    /// loaded. Template names are paths relative to the directory.
    pub fn new(templates_dir: &Path) -> Result<Self> {
        let pattern = templates_dir.join("**").join("*.html");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| anyhow!("template directory path is not valid UTF-8"))?;

        let mut tera = Tera::new(pattern)?;

        // Disable autoescaping: converted bodies are already HTML and
        // URLs/paths must not be escaped.
        tera.autoescape_on(vec![]);

        Ok(Self { tera })
    }

    /// Render a template with the given context. A missing template or
    /// a missing context field is a render failure, which is fatal for
    /// the build.
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}
