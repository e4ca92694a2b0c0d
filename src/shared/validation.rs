use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating category slugs
    /// Must be lowercase alphanumeric groups separated by single hyphens
    /// - Valid: "ao-dai", "hoa123", "bo-hoa-cuoi"
    /// - Invalid: "-hoa", "hoa-", "hoa--tuoi", "Hoa", "hoa_tuoi"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
}

/// Derive a slug from a display name.
///
/// Lowercases, turns whitespace runs into `-` and drops anything outside
/// ASCII letters, digits, `_` and `-`. The result is not guaranteed to satisfy
/// [`SLUG_REGEX`] (e.g. leading hyphens survive), so callers still validate it.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG_CHARS.replace_all(&hyphenated, "").into_owned()
}
