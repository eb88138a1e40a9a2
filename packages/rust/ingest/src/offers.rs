//! Curated offers CSV ingestion.
//!
//! The offers file is optional: absence means "no curated offers", never
//! an error. The delimiter is auto-detected between comma and semicolon
//! from the header line; anything unclear falls back to comma.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{info, warn};

use partsite_catalog::coerce_float;
use partsite_shared::{Offer, PartsiteError, Result};

use crate::products::field;

/// Offers grouped by normalized SKU, in source order.
pub type OffersBySku = HashMap<String, Vec<Offer>>;

/// Load the curated offers table. A missing file yields an empty map.
///
/// Rows lacking a `sku` or a `url` are dropped; malformed rows are
/// skipped with a warning rather than failing the build.
pub fn load_offers(path: &Path) -> Result<OffersBySku> {
    if !path.exists() {
        info!(path = %path.display(), "no offers file, skipping curated offers");
        return Ok(OffersBySku::new());
    }

    let raw = std::fs::read_to_string(path).map_err(|e| PartsiteError::io(path, e))?;
    let delimiter = sniff_delimiter(&raw);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| PartsiteError::ingest(format!("bad header in {}: {e}", path.display())))?
        .clone();

    let mut by_sku = OffersBySku::new();
    let mut total = 0usize;

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping malformed offer row");
                continue;
            }
        };

        let sku = field(&headers, &record, "sku").to_uppercase();
        if sku.is_empty() {
            continue;
        }
        let url = field(&headers, &record, "url");
        if url.is_empty() {
            continue;
        }

        let merchant = field(&headers, &record, "merchant");
        let currency = field(&headers, &record, "currency");

        let offer = Offer {
            merchant: if merchant.is_empty() {
                "Online".to_string()
            } else {
                merchant
            },
            url,
            price: coerce_float(&field(&headers, &record, "price")),
            currency: if currency.is_empty() {
                "USD".to_string()
            } else {
                currency
            },
            in_stock: parse_in_stock(&field(&headers, &record, "in_stock")),
        };

        by_sku.entry(sku).or_default().push(offer);
        total += 1;
    }

    info!(
        offers = total,
        skus = by_sku.len(),
        path = %path.display(),
        "loaded curated offers"
    );
    Ok(by_sku)
}

/// `"0"`, `"false"`, `"False"`, and empty read as false; anything else
/// is in stock.
pub fn parse_in_stock(raw: &str) -> bool {
    !matches!(raw.trim(), "" | "0" | "false" | "False")
}

/// Pick `;` only when the header row clearly favors it; comma otherwise.
fn sniff_delimiter(raw: &str) -> u8 {
    let header = raw.lines().next().unwrap_or("");
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("offers.csv");
        std::fs::write(&path, content).expect("write csv");
        (dir, path)
    }

    #[test]
    fn missing_file_means_no_curated_offers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let offers = load_offers(&dir.path().join("absent.csv")).expect("load");
        assert!(offers.is_empty());
    }

    #[test]
    fn groups_by_uppercased_sku_in_source_order() {
        let (_dir, path) = write_csv(
            "sku,merchant,url,price,currency,in_stock\n\
             tn760,Acme Supplies,https://a.example.com/1,39.99,USD,1\n\
             TN760,Toner Depot,https://b.example.com/2,,EUR,0\n",
        );

        let offers = load_offers(&path).expect("load");
        let entries = &offers["TN760"];
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].merchant, "Acme Supplies");
        assert_eq!(entries[0].price, Some(39.99));
        assert!(entries[0].in_stock);
        assert_eq!(entries[1].merchant, "Toner Depot");
        assert_eq!(entries[1].price, None);
        assert_eq!(entries[1].currency, "EUR");
        assert!(!entries[1].in_stock);
    }

    #[test]
    fn semicolon_dialect_is_detected() {
        let (_dir, path) = write_csv(
            "sku;merchant;url;price\n\
             TN760;Acme Supplies;https://a.example.com/1;39.99\n",
        );

        let offers = load_offers(&path).expect("load");
        assert_eq!(offers["TN760"][0].url, "https://a.example.com/1");
        assert_eq!(offers["TN760"][0].price, Some(39.99));
    }

    #[test]
    fn rows_without_url_or_sku_are_dropped() {
        let (_dir, path) = write_csv(
            "sku,merchant,url\n\
             TN760,Acme Supplies,\n\
             ,Acme Supplies,https://a.example.com/1\n\
             TN770,Acme Supplies,https://a.example.com/2\n",
        );

        let offers = load_offers(&path).expect("load");
        assert_eq!(offers.len(), 1);
        assert!(offers.contains_key("TN770"));
    }

    #[test]
    fn defaults_for_merchant_and_currency() {
        let (_dir, path) = write_csv(
            "sku,url\n\
             TN760,https://a.example.com/1\n",
        );

        let offers = load_offers(&path).expect("load");
        let offer = &offers["TN760"][0];
        assert_eq!(offer.merchant, "Online");
        assert_eq!(offer.currency, "USD");
        // in_stock column absent reads as empty, which is out of stock
        assert!(!offer.in_stock);
    }

    #[test]
    fn in_stock_parsing() {
        assert!(!parse_in_stock("0"));
        assert!(!parse_in_stock("false"));
        assert!(!parse_in_stock("False"));
        assert!(!parse_in_stock(""));
        assert!(parse_in_stock("1"));
        assert!(parse_in_stock("yes"));
        assert!(parse_in_stock("true"));
    }
}
