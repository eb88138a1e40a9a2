//! Best-effort coercion of raw CSV strings into typed values.
//!
//! A malformed price or yield degrades to `None` instead of failing the
//! build.

/// Parse a decimal number leniently. Empty or unparseable input yields
/// `None`; never errors.
pub fn coerce_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-negative integer leniently. Fractional input is truncated
/// (`"12.7"` → `12`); negative, out-of-range, or unparseable input
/// yields `None`.
pub fn coerce_int(raw: &str) -> Option<u32> {
    let value = coerce_float(raw)?.trunc();
    if value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Split a compatible-models field into trimmed, non-empty tokens.
///
/// Commas and semicolons are both accepted as separators. Order and
/// duplicates are preserved; empty input yields an empty list.
pub fn parse_compatible_models(raw: &str) -> Vec<String> {
    raw.replace(',', ";")
        .split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
