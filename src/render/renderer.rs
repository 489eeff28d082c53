//! Tera-backed implementation of [`TemplateRenderer`].

use std::path::Path;
use std::sync::Arc;

use tera::{Context, Tera};
use tracing::{debug, error};

use super::TemplateRenderer;
use crate::core::error::{Error, Result};

/// Renders templates with a cached Tera instance
#[derive(Debug, Clone)]
pub struct TeraRenderer {
    tera: Arc<Tera>,
}

impl TeraRenderer {
    /// Load every template under `template_dir`; template ids are paths
    /// relative to that directory.
    pub fn from_dir(template_dir: &Path) -> Result<Self> {
        let dir = template_dir.to_str().ok_or_else(|| {
            Error::template(format!(
                "Template path contains invalid UTF-8: {}",
                template_dir.display()
            ))
        })?;

        let pattern = format!("{dir}/**/*");
        debug!(pattern = %pattern, "Loading templates");
        let tera = Tera::new(&pattern).map_err(|e| {
            error!("Failed to create Tera instance: {}", e);
            e
        })?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Build a renderer from in-memory `(id, source)` pairs
    pub fn from_raw<I, N, C>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn has_template(&self, template: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template)
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<String> {
        if !self.has_template(template) {
            return Err(Error::template(format!("Template '{template}' not found")));
        }
        Ok(self.tera.render(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_raw_template() {
        let renderer =
            TeraRenderer::from_raw([("routes.tera", "GET {{ path }} controllers.{{ classname }}")])
                .unwrap();
        let mut context = Context::new();
        context.insert("path", "/pet/:petId");
        context.insert("classname", "PetController");

        let output = renderer.render("routes.tera", &context).unwrap();
        assert_eq!(output, "GET /pet/:petId controllers.PetController");
    }

    #[test]
    fn test_missing_template() {
        let renderer = TeraRenderer::from_raw([("a.tera", "a")]).unwrap();
        let err = renderer.render("b.tera", &Context::new()).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
        assert!(err.to_string().contains("Template 'b.tera' not found"));
    }

    #[test]
    fn test_invalid_template_source() {
        let result = TeraRenderer::from_raw([("bad.tera", "{% if %}")]);
        assert!(matches!(result, Err(Error::Tera(_))));
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let renderer = TeraRenderer::from_raw([("a.tera", "{{ missing }}")]).unwrap();
        let err = renderer.render("a.tera", &Context::new()).unwrap_err();
        assert!(matches!(err, Error::Tera(_)));
    }

    #[test]
    fn test_from_dir() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("conf")).unwrap();
        std::fs::write(dir.path().join("README.tera"), "# {{ title }}").unwrap();
        std::fs::write(dir.path().join("conf/routes.tera"), "routes").unwrap();

        let renderer = TeraRenderer::from_dir(dir.path()).unwrap();
        assert!(renderer.has_template("README.tera"));
        assert!(renderer.has_template("conf/routes.tera"));

        let mut context = Context::new();
        context.insert("title", "petstore");
        assert_eq!(renderer.render("README.tera", &context).unwrap(), "# petstore");
    }
}
