use super::snapshot::{ProgressSnapshot, ProgressStatus};
use super::ProgressOptions;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Per-worker progress state. Never shared between threads.
#[derive(Debug)]
pub struct ProgressTracker {
    enabled: bool,
    total: usize,
    interval: Duration,
    started: Instant,
    last_sample: Option<Instant>,
}

impl ProgressTracker {
    pub fn new(options: &ProgressOptions, total: usize, started: Instant) -> Self {
        Self {
            enabled: options.enabled,
            total,
            interval: options.interval,
            started,
            last_sample: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// True when enabled and the interval has elapsed since the last sample.
    pub fn should_sample(&self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_sample {
            None => now.saturating_duration_since(self.started) >= self.interval,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Sample with `remaining` jobs still queued.
    pub fn sample(&mut self, remaining: usize, now: Instant) -> ProgressSnapshot {
        self.last_sample = Some(now);

        let completed = self.total.saturating_sub(remaining);
        let percent = if self.total == 0 {
            1.0
        } else {
            completed as f64 / self.total as f64
        };

        let status = if percent >= 1.0 {
            ProgressStatus::Done
        } else {
            let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
            if completed == 0 || elapsed <= 0.0 {
                ProgressStatus::Calculating
            } else {
                let rate = completed as f64 / elapsed;
                ProgressStatus::Eta(Duration::from_secs_f64(remaining as f64 / rate))
            }
        };

        ProgressSnapshot {
            completed,
            remaining,
            total: self.total,
            percent: percent.min(1.0),
            status,
        }
    }

    /// Sample and overwrite the console progress line.
    pub fn report(&mut self, remaining: usize, now: Instant) -> ProgressSnapshot {
        let snapshot = self.sample(remaining, now);
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}", snapshot.render_line());
        if snapshot.is_done() {
            let _ = writeln!(stdout);
        }
        let _ = stdout.flush();
        snapshot
    }
}
