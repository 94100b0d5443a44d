//! A single thread-safe FIFO of render jobs.

use crate::job::RenderJob;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// FIFO queue with non-blocking pop and consumption acknowledgements.
///
/// Only the pop itself takes the lock; counters are atomics so progress
/// readers never contend with workers for longer than a length read.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Mutex<VecDeque<RenderJob>>,
    pub(super) enqueued: AtomicUsize,
    popped: AtomicUsize,
    pub(super) acknowledged: AtomicUsize,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_jobs<I: IntoIterator<Item = RenderJob>>(jobs: I) -> Self {
        let jobs: VecDeque<RenderJob> = jobs.into_iter().collect();
        let count = jobs.len();
        Self {
            jobs: Mutex::new(jobs),
            enqueued: AtomicUsize::new(count),
            popped: AtomicUsize::new(0),
            acknowledged: AtomicUsize::new(0),
        }
    }

    pub(super) fn push(&self, job: RenderJob) {
        self.jobs.lock().push_back(job);
        self.enqueued.fetch_add(1, Ordering::AcqRel);
    }

    /// Remove the front job without waiting.
    pub fn try_pop(&self) -> Option<RenderJob> {
        let job = self.jobs.lock().pop_front()?;
        self.popped.fetch_add(1, Ordering::AcqRel);
        Some(job)
    }

    /// Record that one popped job has been fully handled.
    pub fn ack(&self) {
        // Never let acknowledgements overtake pops.
        let _ = self
            .acknowledged
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |acked| {
                (acked < self.popped.load(Ordering::Acquire)).then_some(acked + 1)
            });
    }

    /// Number of waiting jobs.
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Popped but not yet acknowledged.
    pub fn in_flight(&self) -> usize {
        let popped = self.popped.load(Ordering::Acquire);
        popped.saturating_sub(self.acknowledged.load(Ordering::Acquire))
    }
}
