//! CLI-specific progress handling for vigbo-dl
//!
//! Provides progress bar implementation for the command-line interface.

use indicatif::{ProgressBar, ProgressStyle};

/// Creates an item-count progress bar for CLI display
pub fn create_progress_bar(total_items: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_items);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} galleries")
            .expect("Failed to create progress style")
            .progress_chars("#>-"),
    );
    pb
}

/// Progress manager wiring the batch callbacks to an indicatif bar
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_items: u64, message: &str) -> Self {
        let pb = create_progress_bar(total_items);

        // Print initial message to stderr
        eprintln!("{}", message);

        Self { pb }
    }
}
