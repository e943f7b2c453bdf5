//! Callback sinks connecting the batch core to a presentation layer
//!
//! The core never renders anything itself: log lines, progress ticks, and the
//! completion signal all flow through a [`Reporter`]. The CLI binds these to
//! stderr and an indicatif bar; a GUI front end would bind them to widgets.

use std::sync::Arc;

/// Log line callback: receives one human-readable message per event
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Progress callback: `(current_item, total_items)`
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Completion callback: invoked exactly once per run
pub type FinishCallback = Arc<dyn Fn() + Send + Sync>;

/// Bundles the three callback sinks a run reports through.
///
/// All sinks are optional; unset sinks are silently skipped.
#[derive(Clone, Default)]
pub struct Reporter {
    log: Option<LogCallback>,
    progress: Option<ProgressCallback>,
    finish: Option<FinishCallback>,
}

impl Reporter {
    /// Create a reporter with all three sinks connected
    pub fn new(log: LogCallback, progress: ProgressCallback, finish: FinishCallback) -> Self {
        Self {
            log: Some(log),
            progress: Some(progress),
            finish: Some(finish),
        }
    }

    /// Create a reporter that discards everything (useful in tests)
    pub fn silent() -> Self {
        Self::default()
    }

    /// Replace the log sink
    pub fn with_log(mut self, log: LogCallback) -> Self {
        self.log = Some(log);
        self
    }

    /// Replace the progress sink
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Replace the finish sink
    pub fn with_finish(mut self, finish: FinishCallback) -> Self {
        self.finish = Some(finish);
        self
    }

    pub fn log(&self, message: &str) {
        if let Some(ref log) = self.log {
            log(message);
        }
    }

    pub fn progress(&self, current: usize, total: usize) {
        if let Some(ref progress) = self.progress {
            progress(current, total);
        }
    }

    pub fn finish(&self) {
        if let Some(ref finish) = self.finish {
            finish();
        }
    }
}
