//! The site build pipeline.
//!
//! Orchestrates the full run: load product rows, load curated offers,
//! derive one page context per row, render and write every product page,
//! then the section listings, the homepage, the sitemap, and robots.txt.
//! The run is sequential and deterministic; two builds over the same
//! inputs on the same day produce byte-identical output.

use tracing::{info, instrument};

use partsite_catalog::{
    AssembleOptions, SlugRegistry, assemble_context, derive_slug, page_url, section_title,
};
use partsite_ingest::{load_offers, load_products};
use partsite_render::{Renderer, SectionSummary};
use partsite_shared::{BuildConfig, Result, SectionIndex};

use crate::publish::{page_path, robots_txt, section_index_path, sitemap_xml, write_text};

// ---------------------------------------------------------------------------
// Result and progress reporting
// ---------------------------------------------------------------------------

/// Summary of a completed build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Product pages written.
    pub pages_written: usize,
    /// Section listing pages written.
    pub sections_written: usize,
    /// Total URLs in the sitemap (homepage included).
    pub sitemap_urls: usize,
    /// Output root, for display.
    pub output_dir: std::path::PathBuf,
}

/// Callback interface the CLI uses to show progress.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline phase started.
    fn phase(&self, name: &str);
    /// A product page was written.
    fn page_written(&self, slug: &str, current: usize, total: usize);
    /// The build finished.
    fn done(&self, result: &BuildResult);
}

/// No-op reporter for tests and library use.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_written(&self, _slug: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run a full site build.
#[instrument(skip_all, fields(products = %config.products_csv.display(), out = %config.output_dir.display()))]
pub fn build_site(config: &BuildConfig, progress: &dyn ProgressReporter) -> Result<BuildResult> {
    let run_date = chrono::Local::now().format("%Y-%m-%d").to_string();
    build_site_dated(config, progress, &run_date)
}

/// [`build_site`] with an explicit run date, so tests can pin the stamp.
pub fn build_site_dated(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
    run_date: &str,
) -> Result<BuildResult> {
    progress.phase("Loading products");
    let rows = load_products(&config.products_csv, config.row_limit)?;

    progress.phase("Loading offers");
    let curated_offers = match &config.offers_csv {
        Some(path) => load_offers(path)?,
        None => Default::default(),
    };

    let renderer = Renderer::new(config.templates_dir.as_deref())?;

    let opts = AssembleOptions {
        site_name: &config.site_name,
        base_url: &config.base_url,
        section: &config.section,
        currency: &config.currency,
        amazon_tag: &config.amazon_tag,
        curated_offers: &curated_offers,
        run_date,
    };

    progress.phase("Rendering pages");
    let mut registry = SlugRegistry::new();
    let mut index = SectionIndex::new();
    let mut page_urls = Vec::with_capacity(rows.len());
    let total = rows.len();

    for (i, row) in rows.iter().enumerate() {
        let slug = registry.claim(&derive_slug(row));
        let (context, entry) = assemble_context(row, &slug, &opts);

        let html = renderer.render_product(&context)?;
        write_text(&page_path(&config.output_dir, &config.section, &slug), &html)?;

        page_urls.push(page_url(&config.base_url, &config.section, &slug));
        index.push(&config.section, entry);
        progress.page_written(&slug, i + 1, total);
    }
    let pages_written = page_urls.len();

    // An empty input still produces a browsable (empty) section listing.
    index.ensure_section(&config.section);

    progress.phase("Writing section indexes");
    let mut sections_written = 0;
    for (section, entries) in index.iter() {
        let html = renderer.render_section_index(
            &config.site_name,
            &config.base_url,
            section,
            &section_title(section),
            entries,
            run_date,
        )?;
        write_text(&section_index_path(&config.output_dir, section), &html)?;
        sections_written += 1;
    }

    progress.phase("Writing homepage");
    let summaries: Vec<SectionSummary> = index
        .iter()
        .map(|(section, entries)| SectionSummary {
            name: section.clone(),
            title: section_title(section),
            count: entries.len(),
        })
        .collect();
    let html = renderer.render_homepage(&config.site_name, &config.base_url, &summaries, run_date)?;
    write_text(&config.output_dir.join("index.html"), &html)?;

    progress.phase("Writing sitemap");
    let sitemap = sitemap_xml(&config.base_url, &page_urls, run_date);
    write_text(&config.output_dir.join("sitemap.xml"), &sitemap)?;
    write_text(
        &config.output_dir.join("robots.txt"),
        &robots_txt(&config.base_url),
    )?;

    let result = BuildResult {
        pages_written,
        sections_written,
        sitemap_urls: page_urls.len() + 1,
        output_dir: config.output_dir.clone(),
    };

    info!(
        pages = result.pages_written,
        sections = result.sections_written,
        sitemap_urls = result.sitemap_urls,
        "site build complete"
    );
    progress.done(&result);

    Ok(result)
}
