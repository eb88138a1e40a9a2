//! Cost-per-page, the catalog's primary comparison metric.

/// Price divided by rated page yield, plus its display form.
///
/// Undefined (`None`) when either input is absent or the yield is zero.
/// The display form is in cents because per-page costs round to zero in
/// whole currency units.
pub fn cost_per_page(price: Option<f64>, page_yield: Option<u32>) -> Option<(f64, String)> {
    let price = price?;
    let pages = page_yield.filter(|y| *y > 0)?;

    let cpp = price / f64::from(pages);
    Some((cpp, cents_display(cpp)))
}

/// Format a per-page cost as sub-unit cents: multiply by 100, round to
/// two decimals, trim trailing zeros but keep one decimal digit.
/// `0.02` → `"2.0¢"`, `0.015` → `"1.5¢"`, `0.0233` → `"2.33¢"`.
fn cents_display(value: f64) -> String {
    let cents = (value * 100.0 * 100.0).round() / 100.0;
    let mut text = format!("{cents:.2}");

    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.push('0');
    }

    format!("{text}¢")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_per_page_basic() {
        let (raw, display) = cost_per_page(Some(10.0), Some(500)).expect("defined");
        assert!((raw - 0.02).abs() < 1e-12);
        assert_eq!(display, "2.0¢");
    }

    #[test]
    fn cost_per_page_trims_trailing_zero() {
        let (raw, display) = cost_per_page(Some(45.0), Some(3000)).expect("defined");
        assert!((raw - 0.015).abs() < 1e-12);
        assert_eq!(display, "1.5¢");
    }

    #[test]
    fn cost_per_page_keeps_two_decimals_when_needed() {
        let (_, display) = cost_per_page(Some(69.9), Some(3000)).expect("defined");
        assert_eq!(display, "2.33¢");
    }

    #[test]
    fn cost_per_page_undefined_cases() {
        assert!(cost_per_page(None, Some(500)).is_none());
        assert!(cost_per_page(Some(10.0), None).is_none());
        assert!(cost_per_page(Some(10.0), Some(0)).is_none());
    }
}
