//! # vigbo-dl
//!
//! Batch downloader for Vigbo photo gallery archives.
//!
//! Feed it a text file of gallery page URLs (one per line, surrounding noise
//! tolerated) and it resolves each page's embedded gallery id, asks the
//! platform's download API for an archive link, and streams the zip to disk
//! under a collision-free `[author]_Name_version.zip` name. Progress, log
//! lines, and completion are reported through callbacks; a cancellation token
//! stops the run at the next chunk or item boundary.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use vigbo_dl::{BatchDownloader, DownloadVersion, Reporter};
//!
//! # async fn example() -> vigbo_dl::Result<()> {
//! let reporter = Reporter::silent().with_log(Arc::new(|msg: &str| eprintln!("{msg}")));
//! let cancel = CancellationToken::new();
//!
//! let runner = BatchDownloader::new(reporter, cancel.clone());
//! let summary = runner
//!     .run(Path::new("links.txt"), Path::new("."), DownloadVersion::Web)
//!     .await?;
//!
//! eprintln!("saved {} of {} galleries", summary.completed, summary.total);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tokio_util::sync::CancellationToken;

pub mod core;

pub use crate::core::api::DownloadVersion;
pub use crate::core::batch::{BatchDownloader, RunSummary};
pub use crate::core::downloader::TransferOutcome;
pub use crate::core::error::{Error, Result};
pub use crate::core::gallery::GalleryRecord;
pub use crate::core::report::{FinishCallback, LogCallback, ProgressCallback, Reporter};

/// Runs a whole batch with a one-off [`BatchDownloader`].
///
/// Convenience wrapper for callers that don't need to hold the runner.
pub async fn run_batch(
    list_path: &Path,
    dest_dir: &Path,
    version: DownloadVersion,
    reporter: Reporter,
    cancel: CancellationToken,
) -> Result<RunSummary> {
    BatchDownloader::new(reporter, cancel)
        .run(list_path, dest_dir, version)
        .await
}
