//! Affiliate offer resolution.
//!
//! Strict priority chain, first non-empty result wins:
//! 1. curated offers table (pre-vetted purchase links, used verbatim)
//! 2. the row's own affiliate URL (tag-normalized when it points at Amazon)
//! 3. an Amazon search fallback for the SKU
//! 4. an empty list — templates must render zero offers without failing
//!
//! Marketplace offers never carry a displayed price: the resolver cannot
//! guarantee a current one, and showing a stale price violates the
//! associates program terms.

use std::collections::HashMap;

use tracing::debug;

use partsite_shared::Offer;

/// Per-row inputs plus the process-wide affiliate configuration.
pub struct OfferInputs<'a> {
    /// Normalized SKU (may be empty).
    pub sku: &'a str,
    /// Raw per-row affiliate URL (may be empty).
    pub affiliate_url: &'a str,
    /// Known price, passed through only for non-marketplace offers.
    pub price: Option<f64>,
    /// Currency code stamped on generated offers.
    pub currency: &'a str,
    /// Partner tracking tag; empty disables tagging and the fallback.
    pub amazon_tag: &'a str,
    /// Curated offers grouped by SKU.
    pub curated: &'a HashMap<String, Vec<Offer>>,
}

/// Resolve the ordered offer list for one product.
pub fn resolve_offers(inputs: &OfferInputs<'_>) -> Vec<Offer> {
    // 1) curated offers win outright, cloned so per-product contexts
    //    never alias the shared table
    if !inputs.sku.is_empty() {
        if let Some(entries) = inputs.curated.get(inputs.sku) {
            if !entries.is_empty() {
                debug!(sku = inputs.sku, count = entries.len(), "using curated offers");
                return entries.clone();
            }
        }
    }

    // 2) the row's own URL as a single offer
    let raw_url = inputs.affiliate_url.trim();
    if !raw_url.is_empty() {
        return vec![row_url_offer(raw_url, inputs)];
    }

    // 3) Amazon search fallback
    if !inputs.amazon_tag.is_empty() && !inputs.sku.is_empty() {
        debug!(sku = inputs.sku, "falling back to Amazon search offer");
        return vec![Offer {
            merchant: "Amazon".into(),
            url: amazon_search_url(inputs.sku, inputs.amazon_tag),
            price: None,
            currency: inputs.currency.to_string(),
            in_stock: true,
        }];
    }

    Vec::new()
}

/// Build an offer from an author-supplied URL, appending the tracking
/// tag to untagged Amazon links.
fn row_url_offer(raw_url: &str, inputs: &OfferInputs<'_>) -> Offer {
    let is_marketplace = raw_url.contains("amazon.");

    let mut url = raw_url.to_string();
    if is_marketplace && !url.contains("tag=") && !inputs.amazon_tag.is_empty() {
        let sep = if url.contains('?') { '&' } else { '?' };
        url = format!("{url}{sep}tag={}", inputs.amazon_tag);
    }

    Offer {
        merchant: if is_marketplace { "Amazon" } else { "Online" }.into(),
        url,
        price: if is_marketplace { None } else { inputs.price },
        currency: inputs.currency.to_string(),
        in_stock: true,
    }
}

/// Amazon search link for a query, URL-encoded and carrying the partner tag.
pub fn amazon_search_url(query: &str, tag: &str) -> String {
    format!(
        "https://www.amazon.com/s?k={}&tag={tag}",
        urlencoding::encode(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curated_table() -> HashMap<String, Vec<Offer>> {
        let mut table = HashMap::new();
        table.insert(
            "TN760".to_string(),
            vec![
                Offer {
                    merchant: "Acme Supplies".into(),
                    url: "https://shop.example.com/tn760".into(),
                    price: Some(39.99),
                    currency: "USD".into(),
                    in_stock: true,
                },
                Offer {
                    merchant: "Toner Depot".into(),
                    url: "https://depot.example.com/tn760".into(),
                    price: None,
                    currency: "USD".into(),
                    in_stock: false,
                },
            ],
        );
        table
    }

    fn inputs<'a>(
        sku: &'a str,
        affiliate_url: &'a str,
        curated: &'a HashMap<String, Vec<Offer>>,
    ) -> OfferInputs<'a> {
        OfferInputs {
            sku,
            affiliate_url,
            price: Some(45.0),
            currency: "USD",
            amazon_tag: "partsite-20",
            curated,
        }
    }

    #[test]
    fn curated_offers_win_over_row_url() {
        let table = curated_table();
        let offers = resolve_offers(&inputs(
            "TN760",
            "https://www.amazon.com/dp/B01234",
            &table,
        ));

        assert_eq!(offers, table["TN760"]);
    }

    #[test]
    fn amazon_row_url_gets_tag_and_hides_price() {
        let table = HashMap::new();
        let offers = resolve_offers(&inputs("TN760", "https://www.amazon.com/dp/B01234", &table));

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].merchant, "Amazon");
        assert_eq!(offers[0].url, "https://www.amazon.com/dp/B01234?tag=partsite-20");
        assert_eq!(offers[0].price, None);
        assert!(offers[0].in_stock);
    }

    #[test]
    fn amazon_row_url_with_query_appends_with_ampersand() {
        let table = HashMap::new();
        let offers = resolve_offers(&inputs(
            "TN760",
            "https://www.amazon.com/s?k=tn760",
            &table,
        ));

        assert_eq!(offers[0].url, "https://www.amazon.com/s?k=tn760&tag=partsite-20");
    }

    #[test]
    fn already_tagged_amazon_url_is_left_alone() {
        let table = HashMap::new();
        let url = "https://www.amazon.com/dp/B01234?tag=other-20";
        let offers = resolve_offers(&inputs("TN760", url, &table));

        assert_eq!(offers[0].url, url);
    }

    #[test]
    fn non_marketplace_url_keeps_price() {
        let table = HashMap::new();
        let offers = resolve_offers(&inputs("TN760", "https://shop.example.com/tn760", &table));

        assert_eq!(offers[0].merchant, "Online");
        assert_eq!(offers[0].price, Some(45.0));
        assert_eq!(offers[0].url, "https://shop.example.com/tn760");
    }

    #[test]
    fn search_fallback_encodes_sku_and_carries_tag() {
        let table = HashMap::new();
        let offers = resolve_offers(&inputs("TN 760/X", "", &table));

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].merchant, "Amazon");
        assert!(offers[0].url.contains("k=TN%20760%2FX"));
        assert!(offers[0].url.contains("tag=partsite-20"));
        assert_eq!(offers[0].price, None);
        assert!(offers[0].in_stock);
    }

    #[test]
    fn no_resolution_path_yields_empty_list() {
        let table = HashMap::new();
        let mut input = inputs("", "", &table);
        input.amazon_tag = "";

        assert!(resolve_offers(&input).is_empty());

        // tag configured but no SKU still resolves nothing
        assert!(resolve_offers(&inputs("", "", &table)).is_empty());
    }
}
