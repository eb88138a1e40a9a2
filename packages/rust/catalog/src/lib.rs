//! The partsite derivation core: raw CSV rows → template-ready page contexts.
//!
//! Everything in this crate is pure and filesystem-free. The pieces:
//! - [`fields`] — lenient scalar coercion and compatible-models parsing
//! - [`slug`] — deterministic slug generation and collision tracking
//! - [`metrics`] — the cost-per-page metric
//! - [`offers`] — the affiliate offer priority chain
//! - [`context`] — assembly of one [`PageContext`] per row
//!
//! [`PageContext`]: partsite_shared::PageContext

pub mod context;
pub mod fields;
pub mod metrics;
pub mod offers;
pub mod slug;

pub use context::{AssembleOptions, assemble_context, derive_slug, page_url, section_title};
pub use fields::{coerce_float, coerce_int, parse_compatible_models};
pub use metrics::cost_per_page;
pub use offers::{OfferInputs, amazon_search_url, resolve_offers};
pub use slug::{SlugRegistry, slugify};
