//! HTML rendering for partsite, backed by Tera templates.
//!
//! The core hands this crate a finished context and gets HTML text back;
//! no business rules live here. Three built-in templates cover the
//! product page, the section index, and the homepage. Any of them can be
//! overridden by dropping a file with the same name into the configured
//! templates directory.

use std::path::Path;

use serde::Serialize;
use tera::Tera;
use tracing::debug;

use partsite_shared::{IndexEntry, PageContext, PartsiteError, Result};

/// Product detail page template name.
pub const PAGE_TEMPLATE: &str = "page.html";
/// Section listing page template name.
pub const SECTION_TEMPLATE: &str = "section.html";
/// Homepage template name.
pub const HOME_TEMPLATE: &str = "home.html";

/// One homepage card: a section with its item count.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    /// URL path segment of the section.
    pub name: String,
    /// Display title (capitalized name).
    pub title: String,
    /// Number of product pages in the section.
    pub count: usize,
}

/// Template engine wrapper. Built once per run, then pure per call.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Set up the engine with built-in templates, then apply overrides
    /// found in `templates_dir` (matched by file name).
    pub fn new(templates_dir: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (PAGE_TEMPLATE, include_str!("../templates/page.html")),
            (SECTION_TEMPLATE, include_str!("../templates/section.html")),
            (HOME_TEMPLATE, include_str!("../templates/home.html")),
        ])
        .map_err(|e| PartsiteError::Render(format!("built-in templates: {e}")))?;

        if let Some(dir) = templates_dir {
            for name in [PAGE_TEMPLATE, SECTION_TEMPLATE, HOME_TEMPLATE] {
                let path = dir.join(name);
                if path.is_file() {
                    let source =
                        std::fs::read_to_string(&path).map_err(|e| PartsiteError::io(&path, e))?;
                    tera.add_raw_template(name, &source)
                        .map_err(|e| PartsiteError::Render(format!("{}: {e}", path.display())))?;
                    debug!(template = name, "template override loaded");
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render one product detail page.
    pub fn render_product(&self, ctx: &PageContext) -> Result<String> {
        let context = tera::Context::from_serialize(ctx)
            .map_err(|e| PartsiteError::Render(format!("page context: {e}")))?;
        self.render(PAGE_TEMPLATE, &context)
    }

    /// Render a section listing page. Cards are sorted case-insensitively
    /// by title; the incoming entry order (row order) is not disturbed
    /// for the caller.
    pub fn render_section_index(
        &self,
        site_name: &str,
        base_url: &str,
        section: &str,
        section_title: &str,
        entries: &[IndexEntry],
        date: &str,
    ) -> Result<String> {
        let mut sorted: Vec<&IndexEntry> = entries.iter().collect();
        sorted.sort_by_key(|entry| entry.title.to_lowercase());

        let mut context = tera::Context::new();
        context.insert("site_name", site_name);
        context.insert("base_url", base_url);
        context.insert("section", section);
        context.insert("section_title", section_title);
        context.insert("items", &sorted);
        context.insert("count", &entries.len());
        context.insert("date", date);

        self.render(SECTION_TEMPLATE, &context)
    }

    /// Render the homepage listing all sections with item counts.
    /// `sections` is expected in display (name) order.
    pub fn render_homepage(
        &self,
        site_name: &str,
        base_url: &str,
        sections: &[SectionSummary],
        date: &str,
    ) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("site_name", site_name);
        context.insert("base_url", base_url);
        context.insert("sections", sections);
        context.insert("date", date);

        self.render(HOME_TEMPLATE, &context)
    }

    fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(template, context)
            .map_err(|e| PartsiteError::Render(format!("{template}: {e}")))
    }
}
