//! # vigbo-dl CLI
//!
//! Command-line interface for the vigbo-dl library: parses arguments, renders
//! the log stream and progress bar, and turns Ctrl-C into a cancellation
//! request. All resolution and download logic lives in the library.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::error;
use tokio_util::sync::CancellationToken;
use vigbo_dl::{DownloadVersion, Reporter, Result};

mod cli;

/// Command-line interface for vigbo-dl
#[derive(Parser)]
#[command(name = "vigbo-dl")]
#[command(about = "Batch downloader for Vigbo photo gallery archives")]
#[command(long_about = "Downloads every gallery listed in a link file:
  vigbo-dl links.txt                      # save web-quality archives here
  vigbo-dl links.txt ~/galleries          # pick a destination directory
  vigbo-dl links.txt --quality original   # full-resolution archives

Lines may carry surrounding noise (markdown, quotes); the first http(s) URL
in each line is used. Press Ctrl-C to stop the run; the file being
transferred is removed, finished files are kept.")]
#[command(version)]
struct Cli {
    /// Text file with one gallery page URL per line
    links_file: PathBuf,

    /// Directory archives are saved into
    #[arg(default_value = ".")]
    output_dir: PathBuf,

    /// Archive quality tier: "web" (lighter) or "original" (full resolution)
    #[arg(long, default_value = "web")]
    quality: DownloadVersion,

    /// Show which URLs would be fetched without touching the network
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("vigbo-dl v{} starting...", env!("CARGO_PKG_VERSION"));
    }

    if cli.dry_run {
        return preview(&cli);
    }

    let progress_manager = cli::ProgressManager::new(
        0,
        &format!("🌐 Downloading galleries from {}", cli.links_file.display()),
    );

    let reporter = build_reporter(&progress_manager);

    // Ctrl-C requests cooperative cancellation; the run stops at the next
    // chunk or item boundary.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n🛑 stop requested...");
            signal_cancel.cancel();
        }
    });

    let summary =
        vigbo_dl::run_batch(&cli.links_file, &cli.output_dir, cli.quality, reporter, cancel).await?;

    if summary.cancelled {
        eprintln!(
            "🛑 run cancelled: {} of {} galleries saved",
            summary.completed, summary.total
        );
    } else {
        eprintln!(
            "✅ run finished: {} of {} galleries saved",
            summary.completed, summary.total
        );
    }

    Ok(())
}

/// Wires the batch callbacks to the progress bar: log lines print above the
/// bar, progress ticks move it, completion finishes it.
fn build_reporter(progress_manager: &cli::ProgressManager) -> Reporter {
    let log_pb = progress_manager.pb.clone();
    let tick_pb = progress_manager.pb.clone();
    let finish_pb = progress_manager.pb.clone();

    Reporter::new(
        Arc::new(move |msg: &str| log_pb.println(msg)),
        Arc::new(move |current, total| {
            if tick_pb.length().unwrap_or(0) != total as u64 {
                tick_pb.set_length(total as u64);
            }
            tick_pb.set_position(current as u64);
        }),
        Arc::new(move || finish_pb.finish()),
    )
}

/// Dry run: normalize the list and show what a real run would fetch
fn preview(cli: &Cli) -> Result<()> {
    let contents = std::fs::read_to_string(&cli.links_file)?;

    for line in contents.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match vigbo_dl::core::source::extract_url(line) {
            Some(url) => eprintln!("🔍 [DRY RUN] would fetch: {url}"),
            None => eprintln!("🔍 [DRY RUN] no URL in line: {line}"),
        }
    }

    Ok(())
}
