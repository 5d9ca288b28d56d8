// src/core/lookup/validation.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Dot-separated labels of 1-63 alphanumerics or inner hyphens, ending in an
/// alphabetic TLD of at least two characters.
static RE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$").unwrap()
});

/// Checks that `domain` is a syntactically valid fully-qualified name.
pub fn validate_domain(domain: &str) -> bool {
    RE_DOMAIN.is_match(domain)
}
