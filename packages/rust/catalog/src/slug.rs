//! URL slug generation and collision tracking.
//!
//! Slugs are the sole mechanism producing page URLs, so [`slugify`] is
//! pure and deterministic: same input, same output, and idempotent.

use std::collections::HashSet;

use tracing::warn;

/// Placeholder slug when the input reduces to nothing.
const FALLBACK_SLUG: &str = "item";

/// Turn free text into a URL-safe token.
///
/// Lowercases and trims, maps separator characters to hyphens, drops
/// everything outside `[a-z0-9-]`, collapses hyphen runs, and trims
/// leading/trailing hyphens. An empty result falls back to `"item"`.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.trim().to_lowercase().chars() {
        match ch {
            ' ' | '_' | '/' | '.' | ',' | '|' | '—' | '–' | '(' | ')' | '[' | ']' | '&' | '+'
            | '#' | '\'' | '"' | ':' | '-' => {
                // collapse separator runs into a single hyphen
                if !out.ends_with('-') {
                    out.push('-');
                }
            }
            c if c.is_ascii_lowercase() || c.is_ascii_digit() => out.push(c),
            _ => {}
        }
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Tracks slugs already claimed during a build and disambiguates
/// collisions with a numeric suffix (`tn760`, `tn760-2`, `tn760-3`, …).
///
/// Two rows reducing to the same slug would otherwise silently overwrite
/// each other's page.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a slug for one page. Returns `base` unchanged the first
    /// time; later claims get the lowest free numeric suffix and log a
    /// warning.
    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                warn!(slug = base, disambiguated = %candidate, "duplicate slug");
                return candidate;
            }
            n += 1;
        }
    }
}
