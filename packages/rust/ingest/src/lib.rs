//! CSV ingestion for partsite: product rows and the curated offers table.

pub mod offers;
pub mod products;

pub use offers::{OffersBySku, load_offers, parse_in_stock};
pub use products::load_products;
