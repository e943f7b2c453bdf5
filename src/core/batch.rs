//! Batch orchestration for vigbo-dl
//!
//! One [`BatchDownloader`] drives a whole run: it owns the shared HTTP client,
//! walks the link list sequentially, and narrates every step through the
//! [`Reporter`]. Per-item faults skip the item and the loop continues; only an
//! unreadable list file ends a run before it starts. The finish callback fires
//! exactly once on every path.

use std::path::Path;
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tokio_util::sync::CancellationToken;

use crate::core::api::{self, DownloadVersion};
use crate::core::downloader::{self, TransferOutcome};
use crate::core::error::Result;
use crate::core::gallery;
use crate::core::naming;
use crate::core::report::Reporter;
use crate::core::source;

/// Browser-like request headers; the platform serves real pages to these
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Vigbo archives are zip files
const ARCHIVE_EXTENSION: &str = "zip";

/// Outcome counts for one finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank lines in the list
    pub total: usize,

    /// Archives written to disk
    pub completed: usize,

    /// Items skipped over a fault (no URL, bad page, no link, failed transfer)
    pub skipped: usize,

    /// Whether the run ended through cancellation rather than exhaustion
    pub cancelled: bool,
}

/// Sequential batch runner over a gallery link list
pub struct BatchDownloader {
    client: reqwest::Client,
    reporter: Reporter,
    cancel: CancellationToken,
}

impl BatchDownloader {
    /// Creates a runner with its own HTTP session.
    ///
    /// The session carries the browser-like headers and is reused for every
    /// page, API, and archive request of the run. Timeouts are per request:
    /// each component sets its own.
    pub fn new(reporter: Reporter, cancel: CancellationToken) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .tcp_keepalive(Duration::from_secs(60))
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            reporter,
            cancel,
        }
    }

    /// Runs the whole batch: read the list, resolve and download every entry.
    ///
    /// Returns `Err` only when the list file cannot be read; every other fault
    /// is logged and skipped. The finish callback has already fired by the
    /// time this returns, on every path.
    pub async fn run(
        &self,
        list_path: &Path,
        dest_dir: &Path,
        version: DownloadVersion,
    ) -> Result<RunSummary> {
        let contents = match tokio::fs::read_to_string(list_path).await {
            Ok(contents) => contents,
            Err(err) => {
                self.reporter
                    .log(&format!("❌ cannot read link list {}: {err}", list_path.display()));
                self.reporter.finish();
                return Err(err.into());
            }
        };

        let lines: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let total = lines.len();

        let mut summary = RunSummary {
            total,
            completed: 0,
            skipped: 0,
            cancelled: false,
        };

        self.reporter.log(&format!("🚀 starting run: {total} entries"));
        self.reporter.log(&format!("📂 saving to {}", dest_dir.display()));

        for (index, raw_line) in lines.iter().enumerate() {
            if self.cancel.is_cancelled() {
                break;
            }

            let current = index + 1;
            self.reporter.progress(current, total);

            let Some(url) = source::extract_url(raw_line) else {
                self.reporter.log(&format!("⚠️ [{current}/{total}] no URL in line, skipping"));
                summary.skipped += 1;
                continue;
            };

            self.reporter.log(&format!("[{current}/{total}] {url}"));

            let record = match gallery::fetch_gallery(&self.client, &url).await {
                Ok(record) => record,
                Err(err) => {
                    self.reporter.log(&format!("❌ {url} -> {err}"));
                    summary.skipped += 1;
                    continue;
                }
            };
            debug!("gallery {} ({})", record.id, record.name);

            let author = source::extract_author(&url);

            // extract_url only yields http(s) URLs, so an origin always parses
            let Some(origin) = source::extract_origin(&url) else {
                summary.skipped += 1;
                continue;
            };

            let Some(link) = api::resolve_download_link(
                &self.client,
                &self.reporter,
                &origin,
                &record.id,
                version,
            )
            .await
            else {
                self.reporter.log("❌ no archive link for this gallery");
                summary.skipped += 1;
                continue;
            };

            let safe_name = naming::sanitize_filename(&record.name);
            let filename = format!("[{author}]_{safe_name}_{version}.{ARCHIVE_EXTENSION}");

            match downloader::download_archive(&self.client, &self.cancel, &link, dest_dir, &filename)
                .await
            {
                Ok(TransferOutcome::Completed(path)) => {
                    let saved = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or(filename);
                    self.reporter.log(&format!("✅ saved {saved}"));
                    summary.completed += 1;
                }
                Ok(TransferOutcome::Aborted) => {
                    // The loop head observes the token and ends the run
                    self.reporter.log("🛑 download aborted");
                }
                Err(err) => {
                    self.reporter.log(&format!("❌ download failed: {err}"));
                    summary.skipped += 1;
                }
            }
        }

        if self.cancel.is_cancelled() {
            summary.cancelled = true;
            self.reporter.log("🛑 run stopped");
        }

        self.reporter.log("🏁 done");
        self.reporter.finish();
        Ok(summary)
    }
}
