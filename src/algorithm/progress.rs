use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress bar tracking for batch generation
pub struct BatchProgress {
    progress_bar: ProgressBar,
    disconnected: AtomicUsize,
}

impl BatchProgress {
    /// Creates a new progress tracker for `caves` generation runs
    pub fn new(caves: usize) -> Self {
        let pb = ProgressBar::new(caves as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} caves (Disconnected: {msg})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
        pb.set_style(style);
        pb.set_message("0");

        Self {
            progress_bar: pb,
            disconnected: AtomicUsize::new(0),
        }
    }

    /// Hidden tracker, used when progress output is disabled
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
            disconnected: AtomicUsize::new(0),
        }
    }

    /// Increment progress
    pub fn increment(&self) {
        self.progress_bar.inc(1);
    }

    /// Record a cave whose corridors did not join every room
    pub fn record_disconnected(&self) {
        let count = self.disconnected.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_message(count.to_string());
    }

    /// Get current disconnected count
    pub fn disconnected(&self) -> usize {
        self.disconnected.load(Ordering::Relaxed)
    }

    /// Finish and clear progress display
    pub fn finish(self) {
        self.progress_bar.finish_and_clear();

        let disconnected = self.disconnected();
        if disconnected > 0 {
            tracing::info!(disconnected, "batch finished with disconnected caves");
        }
    }
}
