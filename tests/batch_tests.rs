//! End-to-end batch tests for vigbo-dl
//!
//! Drives whole runs against a mock platform: gallery page, download API, and
//! archive host are all served by wiremock, and the run writes into a tempdir.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::tempdir;
use tokio_util::sync::CancellationToken;
use vigbo_dl::{BatchDownloader, DownloadVersion, Reporter};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARCHIVE_BYTES: &[u8] = b"PK\x03\x04 pretend zip payload";

fn gallery_page() -> &'static str {
    concat!(
        "<html><head><title>gallery</title></head><body><div id=\"app\"></div>",
        "<script id=\"__NEXT_DATA__\" type=\"application/json\">",
        r#"{"props":{"pageProps":{"gallery":{"id":"42","name":"Summer Trip"}}}}"#,
        "</script></body></html>"
    )
}

struct RunObserver {
    lines: Arc<Mutex<Vec<String>>>,
    ticks: Arc<Mutex<Vec<(usize, usize)>>>,
    finishes: Arc<AtomicUsize>,
}

fn observing_reporter() -> (Reporter, RunObserver) {
    let observer = RunObserver {
        lines: Arc::new(Mutex::new(Vec::new())),
        ticks: Arc::new(Mutex::new(Vec::new())),
        finishes: Arc::new(AtomicUsize::new(0)),
    };

    let lines = Arc::clone(&observer.lines);
    let ticks = Arc::clone(&observer.ticks);
    let finishes = Arc::clone(&observer.finishes);

    let reporter = Reporter::new(
        Arc::new(move |msg: &str| lines.lock().unwrap().push(msg.to_string())),
        Arc::new(move |current, total| ticks.lock().unwrap().push((current, total))),
        Arc::new(move || {
            finishes.fetch_add(1, Ordering::SeqCst);
        }),
    );
    (reporter, observer)
}

async fn mount_platform(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/g/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(gallery_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/download-gallery/42/web/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"data":{{"url":"{}/archive.zip"}}}}"#,
            server.uri()
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/archive.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARCHIVE_BYTES.to_vec(), "application/zip"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_line_list_full_pipeline() {
    let server = MockServer::start().await;
    mount_platform(&server).await;

    let dir = tempdir().unwrap();
    let list = dir.path().join("links.txt");
    // Trailing slash and the noise line both exercise normalization
    std::fs::write(
        &list,
        format!("{}/g/42/\nthese are just notes, not a link\n", server.uri()),
    )
    .unwrap();

    let (reporter, observer) = observing_reporter();
    let runner = BatchDownloader::new(reporter, CancellationToken::new());
    let summary = runner
        .run(&list, dir.path(), DownloadVersion::Web)
        .await
        .unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.skipped, 1);
    assert!(!summary.cancelled);

    // Progress covered both items, finish fired exactly once
    assert_eq!(*observer.ticks.lock().unwrap(), vec![(1, 2), (2, 2)]);
    assert_eq!(observer.finishes.load(Ordering::SeqCst), 1);

    // Naming contract: [author]_Name_version.zip; the mock host is not a
    // *.gallery.photo subdomain, so the author falls back to "unknown"
    let archive = dir.path().join("[unknown]_Summer Trip_web.zip");
    assert!(archive.exists(), "expected archive at {}", archive.display());
    assert_eq!(std::fs::read(archive).unwrap(), ARCHIVE_BYTES);

    let lines = observer.lines.lock().unwrap();
    assert!(lines.iter().any(|line| line.contains("no URL in line")));
    assert!(lines.iter().any(|line| line.contains("✅ saved [unknown]_Summer Trip_web.zip")));

    // Exactly one page fetch, one API call, one archive transfer; the noise
    // line produced no request at all
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_cancellation_during_transfer_leaves_no_partial_file() {
    let server = MockServer::start().await;
    mount_platform(&server).await;

    let dir = tempdir().unwrap();
    let list = dir.path().join("links.txt");
    std::fs::write(
        &list,
        format!("{0}/g/42\n{0}/g/42\n", server.uri()),
    )
    .unwrap();

    let (reporter, observer) = observing_reporter();

    // Cancel as soon as the first item starts; the downloader observes the
    // token at the first chunk boundary and aborts the in-flight transfer
    let cancel = CancellationToken::new();
    let trip = cancel.clone();
    let reporter = reporter.with_progress(Arc::new(move |_, _| trip.cancel()));

    let runner = BatchDownloader::new(reporter, cancel);
    let summary = runner
        .run(&list, dir.path(), DownloadVersion::Web)
        .await
        .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.completed, 0);
    assert_eq!(observer.finishes.load(Ordering::SeqCst), 1);

    // The partial file was removed, and item 2 never started
    assert!(!dir.path().join("[unknown]_Summer Trip_web.zip").exists());
    let lines = observer.lines.lock().unwrap();
    assert!(lines.iter().any(|line| line.contains("download aborted")));
    assert!(!lines.iter().any(|line| line.contains("[2/2]")));
}

#[tokio::test]
async fn test_collisions_across_one_run_get_numbered_names() {
    let server = MockServer::start().await;
    mount_platform(&server).await;

    let dir = tempdir().unwrap();
    let list = dir.path().join("links.txt");
    std::fs::write(
        &list,
        format!("{0}/g/42\n{0}/g/42\n", server.uri()),
    )
    .unwrap();

    let (reporter, _observer) = observing_reporter();
    let runner = BatchDownloader::new(reporter, CancellationToken::new());
    let summary = runner
        .run(&list, dir.path(), DownloadVersion::Web)
        .await
        .unwrap();

    assert_eq!(summary.completed, 2);
    assert!(dir.path().join("[unknown]_Summer Trip_web.zip").exists());
    assert!(dir.path().join("[unknown]_Summer Trip_web(1).zip").exists());
}
