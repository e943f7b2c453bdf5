//! Input-line and URL handling for vigbo-dl
//!
//! Lines from a link list rarely arrive clean: they carry markdown brackets,
//! quotes, and surrounding prose. These helpers pull a usable gallery URL out
//! of the noise and derive the author label and request origin from it.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s)\]"']+"#).expect("valid URL pattern")
});

static AUTHOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://([^./]+)\.gallery\.photo").expect("valid author pattern")
});

static ORIGIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://[^/]+)").expect("valid origin pattern")
});

/// Extracts the first `http(s)` URL embedded in a raw input line.
///
/// The match runs to the first whitespace, quote, or closing bracket, so
/// markdown like `[gallery](https://a.gallery.photo/x/)` yields the bare URL.
/// A single trailing slash is stripped. Returns `None` when the line carries
/// no URL at all.
pub fn extract_url(line: &str) -> Option<String> {
    let found = URL_PATTERN.find(line)?;
    let url = found.as_str().strip_suffix('/').unwrap_or(found.as_str());
    Some(url.to_string())
}

/// Derives the author label from a gallery URL's subdomain.
///
/// `https://jdoe.gallery.photo/gallery/42` -> `jdoe`. URLs outside the
/// platform host shape fall back to `"unknown"`; this never fails.
pub fn extract_author(url: &str) -> String {
    AUTHOR_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|label| label.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Extracts the scheme+host origin used for download-API calls.
pub fn extract_origin(url: &str) -> Option<String> {
    ORIGIN_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|origin| origin.as_str().to_string())
}
