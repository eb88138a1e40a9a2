//! Core domain types for the partsite catalog pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProductRow
// ---------------------------------------------------------------------------

/// A raw product CSV row. Fields hold trimmed strings; a missing column
/// is an empty string. No uniqueness is guaranteed across rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRow {
    pub product_name: String,
    pub model_number: String,
    pub price: String,
    pub page_yield: String,
    pub affiliate_url: String,
    pub compatible_models: String,
}

impl ProductRow {
    /// Normalized SKU: trimmed, uppercased model number. The join key
    /// against the curated offers table.
    pub fn sku(&self) -> String {
        self.model_number.trim().to_uppercase()
    }
}

// ---------------------------------------------------------------------------
// Offer
// ---------------------------------------------------------------------------

/// A single purchase link shown on a product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Merchant label ("Amazon", "Online", or a curated merchant name).
    pub merchant: String,
    /// Outbound purchase URL.
    pub url: String,
    /// Displayed price. Absent for marketplace offers regardless of the
    /// known price.
    #[serde(default)]
    pub price: Option<f64>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Stock flag from the curated feed; assumed true for generated offers.
    pub in_stock: bool,
}

// ---------------------------------------------------------------------------
// PageContext
// ---------------------------------------------------------------------------

/// A question/answer pair rendered in the FAQ section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// One link in the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

/// The derived, template-ready record for one product page.
///
/// Everything a template needs is here; rendering never reaches back
/// into config or raw rows.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    // identity
    pub product_name: String,
    pub model_number: String,
    pub brand: Option<String>,

    // pricing
    pub price: Option<f64>,
    pub price_currency: String,
    pub page_yield: Option<u32>,
    pub cost_per_page_display: Option<String>,

    // relations
    pub compatible_models: Vec<String>,
    pub affiliate_offers: Vec<Offer>,

    // generated text
    pub faqs: Vec<Faq>,
    pub key_points: Vec<String>,

    // addressing
    pub slug: String,
    pub canonical_url: String,
    pub breadcrumbs: Vec<Breadcrumb>,

    // metadata
    pub last_updated: String,
    pub indexable: bool,

    // presentation passthrough
    pub site_name: String,
    pub base_url: String,
    pub section: String,
}

// ---------------------------------------------------------------------------
// SectionIndex
// ---------------------------------------------------------------------------

/// A `(slug, title)` listing entry for the section index pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub slug: String,
    pub title: String,
}

/// Accumulator mapping section name to its listing entries, in row order.
///
/// Built explicitly by the pipeline (one push per rendered page) and read
/// once by the index builders. Sections iterate in name order.
#[derive(Debug, Default)]
pub struct SectionIndex {
    sections: BTreeMap<String, Vec<IndexEntry>>,
}

impl SectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a section's listing, creating the section on
    /// first use.
    pub fn push(&mut self, section: &str, entry: IndexEntry) {
        self.sections.entry(section.to_string()).or_default().push(entry);
    }

    /// Make sure a section exists even if no rows landed in it, so an
    /// empty build still yields an index page.
    pub fn ensure_section(&mut self, section: &str) {
        self.sections.entry(section.to_string()).or_default();
    }

    /// Iterate sections in name order, entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<IndexEntry>)> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
