//! Server-side HTML views.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Rendering is deterministic for a given template and context; all output
//! is HTML-escaped.

use minijinja::Environment;
use serde::Serialize;

pub const INDEX: &str = "fruits/index.html";
pub const NEW: &str = "fruits/new.html";
pub const EDIT: &str = "fruits/edit.html";
pub const SHOW: &str = "fruits/show.html";

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../templates/layout.html")),
    (INDEX, include_str!("../templates/fruits/index.html")),
    (NEW, include_str!("../templates/fruits/new.html")),
    (EDIT, include_str!("../templates/fruits/edit.html")),
    (SHOW, include_str!("../templates/fruits/show.html")),
];

/// A template failed to compile or render.
#[derive(Debug, thiserror::Error)]
#[error("failed to render {template}: {source}")]
pub struct RenderError {
    template: String,
    #[source]
    source: minijinja::Error,
}

impl RenderError {
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// The template registry.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compiles every bundled template.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source).map_err(|source| RenderError {
                template: name.to_string(),
                source,
            })?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, RenderError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|source| RenderError {
                template: name.to_string(),
                source,
            })
    }
}
