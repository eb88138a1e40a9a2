//! Shared types, error model, and configuration for partsite.
//!
//! This crate is the foundation depended on by all other partsite crates.
//! It provides:
//! - [`PartsiteError`] — the unified error type
//! - Domain types ([`ProductRow`], [`Offer`], [`PageContext`], [`SectionIndex`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, AffiliateConfig, BuildConfig, BuildKnobs, CONFIG_FILE_NAME, PathsConfig,
    SiteConfig, init_config, load_config, load_config_from, validate_config,
};
pub use error::{PartsiteError, Result};
pub use types::{Breadcrumb, Faq, IndexEntry, Offer, PageContext, ProductRow, SectionIndex};
