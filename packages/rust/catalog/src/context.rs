//! Page context assembly: one derived, template-ready record per row.

use std::collections::HashMap;

use partsite_shared::{Breadcrumb, Faq, IndexEntry, Offer, PageContext, ProductRow};

use crate::fields::{coerce_float, coerce_int, parse_compatible_models};
use crate::metrics::cost_per_page;
use crate::offers::{OfferInputs, resolve_offers};
use crate::slug::slugify;

/// Process-wide inputs shared by every row of a build.
pub struct AssembleOptions<'a> {
    pub site_name: &'a str,
    /// Base URL without a trailing slash.
    pub base_url: &'a str,
    pub section: &'a str,
    pub currency: &'a str,
    pub amazon_tag: &'a str,
    pub curated_offers: &'a HashMap<String, Vec<Offer>>,
    /// ISO date stamped into `last_updated`.
    pub run_date: &'a str,
}

/// Base slug for a row: model number preferred, product name as fallback.
///
/// Collision handling happens in the caller via
/// [`SlugRegistry`](crate::slug::SlugRegistry); this stays pure.
pub fn derive_slug(row: &ProductRow) -> String {
    let source = if row.model_number.trim().is_empty() {
        &row.product_name
    } else {
        &row.model_number
    };
    slugify(source)
}

/// The canonical address of a product page.
pub fn page_url(base_url: &str, section: &str, slug: &str) -> String {
    format!("{base_url}/{section}/{slug}/")
}

/// Capitalize the first character, for section display titles.
pub fn section_title(section: &str) -> String {
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive the full rendering context for one row, plus its listing entry.
///
/// The entry is returned to the caller rather than pushed into a hidden
/// accumulator; the pipeline folds entries into the [`SectionIndex`]
/// explicitly, in row order.
///
/// [`SectionIndex`]: partsite_shared::SectionIndex
pub fn assemble_context(
    row: &ProductRow,
    slug: &str,
    opts: &AssembleOptions<'_>,
) -> (PageContext, IndexEntry) {
    let product_name = row.product_name.trim().to_string();
    let model_number = row.model_number.trim().to_string();

    let price = coerce_float(&row.price);
    let page_yield = coerce_int(&row.page_yield);
    let compatible_models = parse_compatible_models(&row.compatible_models);

    // Brand inference: first whitespace token of the name.
    let brand = product_name.split_whitespace().next().map(String::from);

    let cpp = cost_per_page(price, page_yield);
    let cost_per_page_display = cpp.map(|(_, display)| display);

    let sku = row.sku();
    let affiliate_offers = resolve_offers(&OfferInputs {
        sku: &sku,
        affiliate_url: &row.affiliate_url,
        price,
        currency: opts.currency,
        amazon_tag: opts.amazon_tag,
        curated: opts.curated_offers,
    });

    // A zero yield reads as "unknown"; it triggers no text.
    let shown_yield = page_yield.filter(|pages| *pages > 0);

    let mut faqs = Vec::new();
    if let Some(pages) = shown_yield {
        faqs.push(Faq {
            question: format!("How long does {product_name} last?"),
            answer: format!(
                "About {pages} standard pages under ISO/IEC test conditions. \
                 Real-world results vary by coverage and settings."
            ),
        });
    }
    if !compatible_models.is_empty() {
        faqs.push(Faq {
            question: format!("Which printers are compatible with {product_name}?"),
            answer: format!(
                "Compatible printers include: {}.",
                compatible_models.join(", ")
            ),
        });
    }

    let mut key_points = Vec::new();
    if let Some(pages) = shown_yield {
        key_points.push(format!("Approx. yield: {pages} pages"));
    }
    if let Some(display) = &cost_per_page_display {
        key_points.push(format!("Cost per page: {display}"));
    }
    if !compatible_models.is_empty() {
        key_points.push(format!("{} compatible printers", compatible_models.len()));
    }

    let canonical_url = page_url(opts.base_url, opts.section, slug);
    let breadcrumbs = vec![
        Breadcrumb {
            name: "Home".into(),
            url: format!("{}/", opts.base_url),
        },
        Breadcrumb {
            name: section_title(opts.section),
            url: format!("{}/{}/", opts.base_url, opts.section),
        },
    ];

    let entry = IndexEntry {
        slug: slug.to_string(),
        title: product_name.clone(),
    };

    let context = PageContext {
        product_name,
        model_number,
        brand,
        price,
        price_currency: opts.currency.to_string(),
        page_yield,
        cost_per_page_display,
        compatible_models,
        affiliate_offers,
        faqs,
        key_points,
        slug: slug.to_string(),
        canonical_url,
        breadcrumbs,
        last_updated: opts.run_date.to_string(),
        indexable: true,
        site_name: opts.site_name.to_string(),
        base_url: opts.base_url.to_string(),
        section: opts.section.to_string(),
    };

    (context, entry)
}
