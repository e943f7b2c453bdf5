//! Core library modules for vigbo-dl
//!
//! This module contains the internal implementation details of the vigbo-dl
//! library.

pub mod api;
pub mod batch;
pub mod downloader;
pub mod error;
pub mod gallery;
pub mod naming;
pub mod report;
pub mod source;

// Re-export main types for internal use
pub use api::DownloadVersion;
pub use batch::{BatchDownloader, RunSummary};
pub use report::Reporter;
