//! Application configuration for partsite.
//!
//! Site config lives in `partsite.toml` next to the data files.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PartsiteError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "partsite.toml";

// ---------------------------------------------------------------------------
// Config structs (matching partsite.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site identity.
    #[serde(default)]
    pub site: SiteConfig,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Affiliate settings.
    #[serde(default)]
    pub affiliate: AffiliateConfig,

    /// Build knobs.
    #[serde(default)]
    pub build: BuildKnobs,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Display name used in page titles and the topbar.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Public base URL the site is served from (no trailing slash needed).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// URL section all product pages live under (e.g. `cartridges`).
    #[serde(default = "default_section")]
    pub section: String,

    /// ISO 4217 currency code for displayed prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            base_url: default_base_url(),
            section: default_section(),
            currency: default_currency(),
        }
    }
}

fn default_site_name() -> String {
    "PartLookup".into()
}
fn default_base_url() -> String {
    "https://example.github.io/partsite".into()
}
fn default_section() -> String {
    "cartridges".into()
}
fn default_currency() -> String {
    "USD".into()
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Output directory the site is generated into.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Product rows CSV. Required at build time.
    #[serde(default = "default_products_csv")]
    pub products_csv: String,

    /// Curated offers CSV. A missing file means "no curated offers".
    #[serde(default = "default_offers_csv")]
    pub offers_csv: String,

    /// Directory with template overrides. Built-ins are used when absent.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            products_csv: default_products_csv(),
            offers_csv: default_offers_csv(),
            templates_dir: default_templates_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "docs".into()
}
fn default_products_csv() -> String {
    "data/products.csv".into()
}
fn default_offers_csv() -> String {
    "data/offers.csv".into()
}
fn default_templates_dir() -> String {
    "templates".into()
}

/// `[affiliate]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffiliateConfig {
    /// Amazon Associates tracking tag. Empty disables tagging and the
    /// search fallback.
    #[serde(default)]
    pub amazon_tag: String,
}

/// `[build]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildKnobs {
    /// Cap on product rows for test runs. 0 means no cap.
    #[serde(default)]
    pub row_limit: usize,
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Site display name.
    pub site_name: String,
    /// Base URL, trailing slash stripped.
    pub base_url: String,
    /// Section all product pages live under.
    pub section: String,
    /// Currency code for prices.
    pub currency: String,
    /// Output root directory.
    pub output_dir: PathBuf,
    /// Product rows CSV path.
    pub products_csv: PathBuf,
    /// Curated offers CSV path, if configured.
    pub offers_csv: Option<PathBuf>,
    /// Template override directory, if configured.
    pub templates_dir: Option<PathBuf>,
    /// Amazon partner tag (empty string disables).
    pub amazon_tag: String,
    /// Optional row cap for test runs.
    pub row_limit: Option<usize>,
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| PathBuf::from(s))
        };
        Self {
            site_name: config.site.name.clone(),
            base_url: config.site.base_url.trim_end_matches('/').to_string(),
            section: config.site.section.clone(),
            currency: config.site.currency.clone(),
            output_dir: PathBuf::from(&config.paths.output_dir),
            products_csv: PathBuf::from(&config.paths.products_csv),
            offers_csv: non_empty(&config.paths.offers_csv),
            templates_dir: non_empty(&config.paths.templates_dir),
            amazon_tag: config.affiliate.amazon_tag.trim().to_string(),
            row_limit: (config.build.row_limit > 0).then_some(config.build.row_limit),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config from disk. Returns defaults if the file
/// does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PartsiteError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| PartsiteError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file at `dir/partsite.toml`.
/// Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| PartsiteError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PartsiteError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PartsiteError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the config can produce working URLs.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let base = config.site.base_url.trim();
    if base.is_empty() {
        return Err(PartsiteError::config("site.base_url must not be empty"));
    }
    Url::parse(base)
        .map_err(|e| PartsiteError::config(format!("site.base_url '{base}' is not a URL: {e}")))?;

    if config.site.section.trim().is_empty() {
        return Err(PartsiteError::config("site.section must not be empty"));
    }
    if config.paths.output_dir.trim().is_empty() {
        return Err(PartsiteError::config("paths.output_dir must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("products_csv"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.site.section, "cartridges");
        assert_eq!(parsed.site.currency, "USD");
        assert_eq!(parsed.paths.output_dir, "docs");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[site]
name = "TonerIndex"
base_url = "https://toner.example.com/"

[affiliate]
amazon_tag = "toner-20"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.site.name, "TonerIndex");
        assert_eq!(config.paths.products_csv, "data/products.csv");
        assert_eq!(config.affiliate.amazon_tag, "toner-20");
        assert_eq!(config.build.row_limit, 0);
    }

    #[test]
    fn build_config_from_app_config() {
        let mut config = AppConfig::default();
        config.site.base_url = "https://toner.example.com/".into();
        config.build.row_limit = 5;

        let build = BuildConfig::from(&config);
        assert_eq!(build.base_url, "https://toner.example.com");
        assert_eq!(build.row_limit, Some(5));
        assert!(build.offers_csv.is_some());
    }

    #[test]
    fn empty_optional_paths_become_none() {
        let mut config = AppConfig::default();
        config.paths.offers_csv = "".into();
        config.paths.templates_dir = "  ".into();

        let build = BuildConfig::from(&config);
        assert!(build.offers_csv.is_none());
        assert!(build.templates_dir.is_none());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.site.base_url = "not a url".into();
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }
}
