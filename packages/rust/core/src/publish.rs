//! Output publication: page paths, file writes, sitemap, and robots.
//!
//! Writes are fail-fast with no retries; a failure mid-run leaves the
//! files already written in place.

use std::path::{Path, PathBuf};

use tracing::debug;

use partsite_shared::{PartsiteError, Result};

/// Path of a product page: `{out}/{section}/{slug}/index.html`.
pub fn page_path(output_dir: &Path, section: &str, slug: &str) -> PathBuf {
    output_dir.join(section).join(slug).join("index.html")
}

/// Path of a section listing page: `{out}/{section}/index.html`.
pub fn section_index_path(output_dir: &Path, section: &str) -> PathBuf {
    output_dir.join(section).join("index.html")
}

/// Write a text file, creating parent directories. Overwrites silently.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PartsiteError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| PartsiteError::io(path, e))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Build `sitemap.xml`: the homepage first, then every product page URL
/// in build order, each stamped with the run date. Section listing pages
/// are not included.
pub fn sitemap_xml(base_url: &str, urls: &[String], lastmod: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    push_url_entry(&mut xml, &format!("{base_url}/"), lastmod);
    for url in urls {
        push_url_entry(&mut xml, url, lastmod);
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url_entry(xml: &mut String, loc: &str, lastmod: &str) {
    xml.push_str(&format!(
        "<url><loc>{}</loc><lastmod>{lastmod}</lastmod></url>\n",
        xml_escape(loc)
    ));
}

/// Build `robots.txt`: allow all crawlers, point at the sitemap.
pub fn robots_txt(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap.xml\n")
}

/// Minimal escaping for text nodes in the sitemap.
fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
