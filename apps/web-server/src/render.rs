//! Handlebars renderer with a shared layout.
//!
//! Page templates and the layout live in the views directory as
//! `<name>.html`. A page renders in two passes: the page template first, then
//! `main_layout` with the page output available as the raw `body` field.
//! Every `{{ }}` expansion is HTML-escaped by handlebars.

use std::path::{Path, PathBuf};

use handlebars::{handlebars_helper, Handlebars, JsonValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RenderError, StartupError};
use crate::views::PageView;

pub const LAYOUT: &str = "main_layout";
pub const PAGE_TEMPLATES: &[&str] = &["index", "about", "services", "contact", "404"];
const TEMPLATE_EXT: &str = "html";

pub struct Renderer {
    hb: Handlebars<'static>,
    // Set in dev mode: templates missing at startup are read from here on demand.
    reload_dir: Option<PathBuf>,
}

impl Renderer {
    /// Register the layout and page templates found in `views_dir`.
    ///
    /// An unreadable directory is fatal. A missing template file only logs a
    /// warning; rendering that page later fails with `MissingTemplate`, unless
    /// `reload` is on and the file has appeared since.
    pub fn new(views_dir: &Path, reload: bool) -> Result<Self, StartupError> {
        std::fs::read_dir(views_dir).map_err(|source| StartupError::TemplateDir {
            path: views_dir.to_path_buf(),
            source,
        })?;

        let mut hb = Handlebars::new();
        hb.set_dev_mode(reload);

        handlebars_helper!(eq: |a: JsonValue, b: JsonValue| a == b);
        hb.register_helper("eq", Box::new(eq));

        for name in std::iter::once(LAYOUT).chain(PAGE_TEMPLATES.iter().copied()) {
            let path = template_path(views_dir, name);
            if !path.is_file() {
                warn!(template = name, path = %path.display(), "template file missing");
                continue;
            }
            hb.register_template_file(name, &path)
                .map_err(|source| StartupError::Template {
                    name: name.to_string(),
                    source: Box::new(source),
                })?;
            debug!(template = name, "template registered");
        }

        Ok(Self {
            hb,
            reload_dir: reload.then(|| views_dir.to_path_buf()),
        })
    }

    /// Render a page inside the shared layout.
    pub fn render_page(&self, view: &PageView<'_>) -> Result<String, RenderError> {
        let mut context = serde_json::to_value(view)?;
        let body = self.render(view.template(), &context)?;
        if let Value::Object(map) = &mut context {
            map.insert("body".into(), Value::String(body));
        }
        self.render(LAYOUT, &context)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        if self.hb.has_template(name) {
            return Ok(self.hb.render(name, data)?);
        }
        if let Some(dir) = &self.reload_dir {
            if let Ok(source) = std::fs::read_to_string(template_path(dir, name)) {
                debug!(template = name, "rendering template added after startup");
                return Ok(self.hb.render_template(&source, data)?);
            }
        }
        Err(RenderError::MissingTemplate(name.to_string()))
    }
}

pub fn template_path(views_dir: &Path, name: &str) -> PathBuf {
    views_dir.join(format!("{}.{}", name, TEMPLATE_EXT))
}

/// Presence of the view files, reported by `/check-static`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticCheck {
    pub views_exists: bool,
    pub layout_exists: bool,
    pub index_exists: bool,
    pub about_exists: bool,
    pub services_exists: bool,
    pub contact_exists: bool,
}

impl StaticCheck {
    pub fn probe(views_dir: &Path) -> Self {
        let exists = |name: &str| template_path(views_dir, name).exists();
        Self {
            views_exists: views_dir.exists(),
            layout_exists: exists(LAYOUT),
            index_exists: exists("index"),
            about_exists: exists("about"),
            services_exists: exists("services"),
            contact_exists: exists("contact"),
        }
    }
}
