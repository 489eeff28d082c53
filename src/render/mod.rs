//! Hand-off to the template renderer.
//!
//! The transformation layer only needs one thing from a renderer: turn a
//! template id and a context into text. [`TemplateRenderer`] is that seam;
//! [`TeraRenderer`] is the implementation shipped with the crate. Writing the
//! results to disk is left to the caller.

pub mod context;
pub mod renderer;

pub use context::{GENERATOR_KIND, GENERATOR_NAME, api_context, global_context};
pub use renderer::TeraRenderer;

use std::collections::BTreeMap;

use tera::Context;
use tracing::{debug, info};

use crate::core::error::Result;
use crate::transform::GenerationBundle;

/// Renders a template id with a context
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Context) -> Result<String>;
}

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub template: &'static str,
    /// Destination relative to the output root
    pub path: String,
    pub content: String,
}

/// Render every binding of the bundle's plan, in plan order.
///
/// # Errors
///
/// Stops at the first template that is missing or fails to render.
pub fn render_bundle(
    bundle: &GenerationBundle,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<RenderedArtifact>> {
    let global = global_context(bundle)?;
    let mut class_contexts: BTreeMap<String, Context> = BTreeMap::new();
    let bindings = bundle.bindings();
    let mut rendered = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let content = match &binding.api_class {
            None => renderer.render(binding.template, &global)?,
            Some(class) => {
                let context = class_contexts
                    .entry(class.clone())
                    .or_insert_with(|| api_context(bundle, &global, class));
                renderer.render(binding.template, context)?
            }
        };
        debug!(
            template = binding.template,
            path = %binding.destination,
            bytes = content.len(),
            "Rendered artifact"
        );
        rendered.push(RenderedArtifact {
            template: binding.template,
            path: binding.destination,
            content,
        });
    }

    info!(artifacts = rendered.len(), "Rendered generation plan");
    Ok(rendered)
}
