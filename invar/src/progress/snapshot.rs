use crate::config::PROGRESS_BAR_WIDTH;
use std::fmt;
use std::time::Duration;

/// What the tail of the progress line says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressStatus {
    Done,
    /// Nothing completed yet, or no time has passed.
    Calculating,
    Eta(Duration),
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressStatus::Done => write!(f, "Done..."),
            ProgressStatus::Calculating => write!(f, "calculating..."),
            ProgressStatus::Eta(eta) => write!(f, "{} seconds left to finish", eta.as_secs()),
        }
    }
}

/// One progress sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub remaining: usize,
    pub total: usize,
    /// Fraction complete in `0.0..=1.0`.
    pub percent: f64,
    pub status: ProgressStatus,
}

impl ProgressSnapshot {
    /// Filled cells of the bar.
    pub fn filled(&self) -> usize {
        let filled = (PROGRESS_BAR_WIDTH as f64 * self.percent).round() as usize;
        filled.min(PROGRESS_BAR_WIDTH)
    }

    pub fn is_done(&self) -> bool {
        self.status == ProgressStatus::Done
    }

    /// `\rPercent: [####----] 42% <status>`
    pub fn render_line(&self) -> String {
        let filled = self.filled();
        format!(
            "\rPercent: [{}{}] {}% {}",
            "#".repeat(filled),
            "-".repeat(PROGRESS_BAR_WIDTH - filled),
            (self.percent * 100.0).floor() as u32,
            self.status
        )
    }
}
