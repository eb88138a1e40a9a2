//! Product CSV ingestion.
//!
//! Header-driven: recognized columns are picked out by name, unrecognized
//! columns are ignored, and missing columns read as empty strings. The
//! products file is the one required input — a missing file is fatal.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use partsite_shared::{PartsiteError, ProductRow, Result};

/// Load product rows, optionally capped at `row_limit` for test runs.
pub fn load_products(path: &Path, row_limit: Option<usize>) -> Result<Vec<ProductRow>> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| PartsiteError::ingest(format!("cannot read {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| PartsiteError::ingest(format!("bad header in {}: {e}", path.display())))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| PartsiteError::ingest(format!("bad row in {}: {e}", path.display())))?;

        rows.push(ProductRow {
            product_name: field(&headers, &record, "product_name"),
            model_number: field(&headers, &record, "model_number"),
            price: field(&headers, &record, "price"),
            page_yield: field(&headers, &record, "page_yield"),
            affiliate_url: field(&headers, &record, "affiliate_url"),
            compatible_models: field(&headers, &record, "compatible_models"),
        });

        if let Some(limit) = row_limit {
            if rows.len() >= limit {
                break;
            }
        }
    }

    info!(rows = rows.len(), path = %path.display(), "loaded product rows");
    Ok(rows)
}

/// Look up a column by header name; missing column or short row reads
/// as an empty string.
pub(crate) fn field(headers: &StringRecord, record: &StringRecord, name: &str) -> String {
    headers
        .iter()
        .position(|header| header == name)
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("products.csv");
        std::fs::write(&path, content).expect("write csv");
        (dir, path)
    }

    #[test]
    fn loads_recognized_columns() {
        let (_dir, path) = write_csv(
            "product_name,model_number,price,page_yield,affiliate_url,compatible_models\n\
             Black Toner TN760,TN760,45.00,3000,,HL-L2350DW; HL-L2370DW\n",
        );

        let rows = load_products(&path, None).expect("load");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Black Toner TN760");
        assert_eq!(rows[0].model_number, "TN760");
        assert_eq!(rows[0].price, "45.00");
        assert_eq!(rows[0].compatible_models, "HL-L2350DW; HL-L2370DW");
    }

    #[test]
    fn unknown_columns_ignored_missing_columns_empty() {
        let (_dir, path) = write_csv(
            "product_name,color,price\n\
             Cyan Toner,cyan,19.99\n",
        );

        let rows = load_products(&path, None).expect("load");
        assert_eq!(rows[0].product_name, "Cyan Toner");
        assert_eq!(rows[0].price, "19.99");
        assert_eq!(rows[0].model_number, "");
        assert_eq!(rows[0].page_yield, "");
    }

    #[test]
    fn fields_are_trimmed() {
        let (_dir, path) = write_csv(
            "product_name, model_number\n\
             \u{20}Spaced Name ,  TN760 \n",
        );

        let rows = load_products(&path, None).expect("load");
        assert_eq!(rows[0].product_name, "Spaced Name");
        assert_eq!(rows[0].model_number, "TN760");
    }

    #[test]
    fn row_limit_caps_output() {
        let (_dir, path) = write_csv(
            "product_name\n\
             One\n\
             Two\n\
             Three\n",
        );

        let rows = load_products(&path, Some(2)).expect("load");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].product_name, "Two");
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_products(&dir.path().join("nope.csv"), None);
        assert!(result.is_err());
    }
}
