//! Attempt progress display for the command-line tool

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::algorithm::executor::{AttemptOutcome, AttemptReport};

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Attempts: [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over solve attempts
///
/// Position counts attempts used; the message names the last outcome.
pub struct AttemptProgress {
    bar: ProgressBar,
    contradictions: usize,
}

impl AttemptProgress {
    /// Create a bar sized to the attempt budget
    pub fn new(max_attempts: usize) -> Self {
        let bar = ProgressBar::new(max_attempts as u64);
        bar.set_style(ATTEMPT_STYLE.clone());
        Self {
            bar,
            contradictions: 0,
        }
    }

    /// Create a bar that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            contradictions: 0,
        }
    }

    /// Record one finished attempt
    pub fn record(&mut self, report: &AttemptReport) {
        self.bar.set_position(report.attempt as u64);
        let message = match report.outcome {
            AttemptOutcome::Solved => format!("solved after {} collapses", report.collapses),
            AttemptOutcome::Contradiction(at) => {
                self.contradictions += 1;
                format!("contradiction at {at}")
            }
        };
        self.bar.set_message(message);
    }

    /// Contradictions recorded so far
    pub const fn contradictions(&self) -> usize {
        self.contradictions
    }

    /// Attempts recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Leave the final state on screen
    pub fn finish(&self) {
        self.bar.finish();
    }
}
