//! Step progress display for chart drawing and export

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg:<16} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks drawing and export steps of a single chart
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Visible progress bar over `total_steps` steps
    pub fn new(total_steps: usize) -> Self {
        let bar = ProgressBar::new(total_steps as u64);
        bar.set_style(STEP_STYLE.clone());
        Self { bar }
    }

    /// Progress tracking that never draws
    pub fn hidden(total_steps: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total_steps as u64), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Label the step now running
    pub fn start_step(&self, label: &str) {
        self.bar.set_message(label.to_string());
    }

    /// Mark the running step as done
    pub fn complete_step(&self) {
        self.bar.inc(1);
    }

    /// Steps completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total steps
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Clear the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
