//! Gallery page resolution for vigbo-dl
//!
//! Vigbo gallery pages are server-rendered Next.js documents: the application
//! state is inlined as JSON in a `<script id="__NEXT_DATA__">` element. The
//! gallery id and display name live under `props.pageProps.gallery`. That path
//! is an undocumented internal of the platform, so the walk is kept loose: any
//! shape change surfaces as a parse error on that item, never a crash.

use std::time::Duration;

use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::core::error::{Error, Result};

/// Timeout for gallery page fetches; pages are small, so this stays short
const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Element carrying the server-rendered page state
const PAGE_DATA_SELECTOR: &str = "script#__NEXT_DATA__";

/// Identity of one gallery, extracted from its page
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryRecord {
    /// Platform-assigned gallery id, used in download-API paths
    pub id: String,

    /// Display name; falls back to `"gallery"` when the page omits it
    pub name: String,
}

/// Fetches a gallery page and extracts its [`GalleryRecord`].
///
/// A non-success status is reported as an HTTP error with the status code in
/// the message; a missing or malformed embedded payload as a parse error.
/// Either way the caller skips the item and the batch continues.
pub async fn fetch_gallery(client: &reqwest::Client, url: &str) -> Result<GalleryRecord> {
    debug!("fetching gallery page {url}");
    let response = client.get(url).timeout(PAGE_TIMEOUT).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpError(format!("status {}", status.as_u16())));
    }

    let html = response.text().await?;
    extract_gallery_record(&html)
}

/// Extracts the gallery record from a page body.
///
/// Sync on purpose: `scraper::Html` is not `Send`, so parsing must not span an
/// await point.
pub fn extract_gallery_record(html: &str) -> Result<GalleryRecord> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(PAGE_DATA_SELECTOR).expect("valid page-data selector");

    let script = document
        .select(&selector)
        .next()
        .ok_or_else(|| Error::ParseError("page data script not found".to_string()))?;

    let payload: Value = serde_json::from_str(&script.inner_html())?;
    let gallery = &payload["props"]["pageProps"]["gallery"];

    let id = match &gallery["id"] {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return Err(Error::ParseError("gallery id missing from page data".to_string())),
    };

    let name = gallery["name"].as_str().unwrap_or("gallery").to_string();

    Ok(GalleryRecord { id, name })
}
