//! Streaming archive transfer for vigbo-dl
//!
//! One invocation claims a collision-free destination name, streams the
//! archive body to it chunk by chunk, and guarantees that no partial file
//! survives: a cancelled or failed transfer removes whatever was written.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use log::debug;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::core::error::{Error, Result};
use crate::core::naming;

/// Timeout covering the whole archive request, body included. Generous on
/// purpose: archives can run to gigabytes, but a stalled server must not hang
/// the run forever.
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(600);

/// How one archive transfer ended
#[derive(Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Transfer finished; the archive lives at this path
    Completed(PathBuf),

    /// Cancellation was observed at a chunk boundary; the partial file was
    /// removed
    Aborted,
}

/// Streams an archive to `folder`, saving it under `desired_name` or the
/// nearest collision-free variant.
///
/// The cancellation token is polled before every chunk write. Errors (bad
/// status, stream failure, file I/O) are returned after removing the partial
/// file; the caller logs them and moves to the next item.
pub async fn download_archive(
    client: &reqwest::Client,
    cancel: &CancellationToken,
    url: &str,
    folder: &Path,
    desired_name: &str,
) -> Result<TransferOutcome> {
    // Claim the name immediately before the transfer so files created earlier
    // in this run are accounted for.
    let dest = naming::unique_path(folder, desired_name);
    debug!("downloading {url} -> {}", dest.display());

    let response = client.get(url).timeout(TRANSFER_TIMEOUT).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpError(format!("status {}", status.as_u16())));
    }

    let mut file = File::create(&dest).await?;
    match stream_to_file(&mut file, response, cancel).await {
        Ok(true) => Ok(TransferOutcome::Completed(dest)),
        Ok(false) => {
            drop(file);
            tokio::fs::remove_file(&dest).await?;
            Ok(TransferOutcome::Aborted)
        }
        Err(err) => {
            drop(file);
            let _ = tokio::fs::remove_file(&dest).await;
            Err(err)
        }
    }
}

/// Writes the response body to `file`; `Ok(false)` means cancellation was
/// observed and the file is incomplete.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    cancel: &CancellationToken,
) -> Result<bool> {
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk: Bytes =
            chunk.map_err(|err| Error::NetworkError(format!("stream read error: {err}")))?;
        if cancel.is_cancelled() {
            return Ok(false);
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(true)
}
