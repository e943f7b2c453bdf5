//! Download-API client for vigbo-dl
//!
//! Archive links come from a versioned private endpoint:
//! `GET <origin>/api/v1/download-gallery/<id>/<version>/`. The endpoint
//! generates the archive on demand, so it gets a longer timeout than page
//! fetches. Every failure path collapses to "no link": the batch loop only
//! ever skips the item, it never aborts on this call.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::core::report::Reporter;

/// Timeout for download-API calls; archive-link generation can be slow
const API_TIMEOUT: Duration = Duration::from_secs(15);

/// Quality tier of a downloadable archive, applied to every item of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadVersion {
    /// Web-optimized archive (lighter)
    #[default]
    Web,
    /// Full-resolution archive
    Original,
}

impl DownloadVersion {
    /// Path segment the download API expects
    pub fn as_str(self) -> &'static str {
        match self {
            DownloadVersion::Web => "web",
            DownloadVersion::Original => "original",
        }
    }
}

impl fmt::Display for DownloadVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "web" => Ok(DownloadVersion::Web),
            "original" => Ok(DownloadVersion::Original),
            other => Err(format!("unknown version '{other}' (expected 'web' or 'original')")),
        }
    }
}

/// Link-resolution response body.
///
/// The API has shipped the archive URL both nested under `data` and at the
/// top level; the nested field wins when both are present.
/// TODO: drop the top-level fallback once the upstream API settles on one shape.
#[derive(Debug, Deserialize)]
struct LinkResponse {
    #[serde(default)]
    data: Option<LinkData>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkData {
    #[serde(default)]
    url: Option<String>,
}

impl LinkResponse {
    fn into_url(self) -> Option<String> {
        self.data.and_then(|data| data.url).or(self.url)
    }
}

/// Resolves the archive URL for one gallery, or `None` when no link is
/// available.
///
/// 404 (version does not exist for this gallery) and 403 (access denied,
/// commonly a password-protected gallery) are logged with distinguishing
/// messages; any other failure is silent apart from debug diagnostics.
pub async fn resolve_download_link(
    client: &reqwest::Client,
    reporter: &Reporter,
    origin: &str,
    gallery_id: &str,
    version: DownloadVersion,
) -> Option<String> {
    let api_url = format!("{origin}/api/v1/download-gallery/{gallery_id}/{version}/");
    debug!("resolving archive link via {api_url}");

    let response = match client.get(&api_url).timeout(API_TIMEOUT).send().await {
        Ok(response) => response,
        Err(err) => {
            debug!("link resolution request failed: {err}");
            return None;
        }
    };

    match response.status() {
        StatusCode::OK => match response.json::<LinkResponse>().await {
            Ok(body) => body.into_url(),
            Err(err) => {
                debug!("link resolution body unreadable: {err}");
                None
            }
        },
        StatusCode::NOT_FOUND => {
            reporter.log(&format!("⚠️ version '{version}' not available for this gallery"));
            None
        }
        StatusCode::FORBIDDEN => {
            reporter.log("⛔ access denied (password-protected gallery?)");
            None
        }
        status => {
            debug!("link resolution returned status {status}");
            None
        }
    }
}
