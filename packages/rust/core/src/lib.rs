//! The partsite build orchestrator.
//!
//! [`build_site`] runs the whole pipeline against a [`BuildConfig`]; the
//! [`publish`] module holds the output-side helpers (paths, sitemap,
//! robots).
//!
//! [`BuildConfig`]: partsite_shared::BuildConfig

pub mod pipeline;
pub mod publish;

pub use pipeline::{BuildResult, ProgressReporter, SilentProgress, build_site, build_site_dated};
pub use publish::{page_path, robots_txt, section_index_path, sitemap_xml};
