//! FIFO job queues shared by the render workers.
//!
//! A [`JobQueueSet`] holds several independent queues, for example one per
//! batch or priority. Workers poll them with [`JobQueueSet::try_pop_any`],
//! which scans the queues once in a fixed order and never blocks. A job is
//! removed under its queue's lock, so it reaches exactly one worker.
//!
//! ```text
//!  queue 0: [a, b, c]   ─┐
//!  queue 1: [d, e]      ─┼─► try_pop_any() ──► (job, QueueHandle) ──► ack(handle)
//!  queue 2: []          ─┘         │
//!                                  └─► None once every queue was seen empty
//! ```
//!
//! The set is filled before the pool starts and then moved into it, so no
//! jobs can be added while workers are draining it.

mod job_queue;

pub use job_queue::JobQueue;

use crate::job::RenderJob;
use std::sync::atomic::Ordering;

/// Identifies the queue a job was popped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueHandle(usize);

impl QueueHandle {
    /// Index of the queue within its set.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A fixed collection of job queues.
#[derive(Debug, Default)]
pub struct JobQueueSet {
    queues: Vec<JobQueue>,
}

impl JobQueueSet {
    /// Create a set with `queue_count` empty queues.
    pub fn new(queue_count: usize) -> Self {
        Self {
            queues: (0..queue_count).map(|_| JobQueue::new()).collect(),
        }
    }

    /// Build a set with one queue per batch, preserving order within each.
    pub fn from_batches<I, B>(batches: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = RenderJob>,
    {
        Self {
            queues: batches.into_iter().map(JobQueue::from_jobs).collect(),
        }
    }

    /// Append a job to queue `queue`.
    ///
    /// Returns the job back if the index is out of range.
    pub fn push(&mut self, queue: usize, job: RenderJob) -> Result<(), RenderJob> {
        match self.queues.get(queue) {
            Some(q) => {
                q.push(job);
                Ok(())
            }
            None => Err(job),
        }
    }

    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    pub fn queue(&self, handle: QueueHandle) -> Option<&JobQueue> {
        self.queues.get(handle.0)
    }

    /// Pop the first available job, scanning queues in order.
    ///
    /// `None` means every queue was empty when it was looked at.
    pub fn try_pop_any(&self) -> Option<(RenderJob, QueueHandle)> {
        self.queues
            .iter()
            .enumerate()
            .find_map(|(index, queue)| queue.try_pop().map(|job| (job, QueueHandle(index))))
    }

    /// Mark the most recent pop from `handle`'s queue as consumed.
    pub fn ack(&self, handle: QueueHandle) {
        if let Some(queue) = self.queues.get(handle.0) {
            queue.ack();
        }
    }

    /// Jobs still waiting across all queues. Approximate under concurrency.
    pub fn remaining(&self) -> usize {
        self.queues.iter().map(JobQueue::len).sum()
    }

    /// Jobs popped but not yet acknowledged.
    pub fn in_flight(&self) -> usize {
        self.queues.iter().map(JobQueue::in_flight).sum()
    }

    /// Jobs acknowledged across all queues.
    pub fn acknowledged(&self) -> usize {
        self.queues
            .iter()
            .map(|q| q.acknowledged.load(Ordering::Acquire))
            .sum()
    }

    /// Every job ever enqueued, popped or not.
    pub fn total_enqueued(&self) -> usize {
        self.queues
            .iter()
            .map(|q| q.enqueued.load(Ordering::Acquire))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    fn tiles(prefix: &str, count: u32) -> Vec<RenderJob> {
        (0..count)
            .map(|i| RenderJob::tile(format!("{prefix}/{i}.png"), i, 0, 2))
            .collect()
    }

    #[test]
    fn test_pops_in_queue_order_then_fifo() {
        let set = JobQueueSet::from_batches([tiles("a", 2), tiles("b", 1)]);

        let (first, h0) = set.try_pop_any().unwrap();
        let (second, h1) = set.try_pop_any().unwrap();
        let (third, h2) = set.try_pop_any().unwrap();

        assert_eq!(first.filename(), PathBuf::from("a/0.png"));
        assert_eq!(second.filename(), PathBuf::from("a/1.png"));
        assert_eq!(third.filename(), PathBuf::from("b/0.png"));
        assert_eq!((h0.index(), h1.index(), h2.index()), (0, 0, 1));
        assert!(set.try_pop_any().is_none());
    }

    #[test]
    fn test_empty_queue_does_not_starve_others() {
        let set = JobQueueSet::from_batches([Vec::new(), Vec::new(), tiles("c", 1)]);
        let (job, handle) = set.try_pop_any().unwrap();
        assert_eq!(job.filename(), PathBuf::from("c/0.png"));
        assert_eq!(handle.index(), 2);
    }

    #[test]
    fn test_empty_set_returns_none() {
        assert!(JobQueueSet::new(0).try_pop_any().is_none());
        assert!(JobQueueSet::new(3).try_pop_any().is_none());
    }

    #[test]
    fn test_push_out_of_range_returns_job() {
        let mut set = JobQueueSet::new(1);
        assert!(set.push(0, RenderJob::tile("x.png", 0, 0, 0)).is_ok());
        let rejected = set.push(5, RenderJob::tile("y.png", 0, 0, 0));
        assert_eq!(rejected.unwrap_err().filename(), PathBuf::from("y.png"));
        assert_eq!(set.remaining(), 1);
    }

    #[test]
    fn test_counters_track_pop_and_ack() {
        let set = JobQueueSet::from_batches([tiles("a", 3)]);
        assert_eq!(set.total_enqueued(), 3);
        assert_eq!(set.remaining(), 3);

        let (_, handle) = set.try_pop_any().unwrap();
        assert_eq!(set.remaining(), 2);
        assert_eq!(set.in_flight(), 1);
        assert_eq!(set.acknowledged(), 0);

        set.ack(handle);
        assert_eq!(set.in_flight(), 0);
        assert_eq!(set.acknowledged(), 1);
    }

    #[test]
    fn test_concurrent_pops_deliver_each_job_once() {
        const QUEUES: usize = 4;
        const PER_QUEUE: u32 = 250;
        const THREADS: usize = 8;

        let set = Arc::new(JobQueueSet::from_batches(
            (0..QUEUES).map(|q| tiles(&format!("q{q}"), PER_QUEUE)),
        ));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let set = Arc::clone(&set);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some((job, handle)) = set.try_pop_any() {
                        seen.push(job.filename().to_path_buf());
                        set.ack(handle);
                    }
                    seen
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        let unique: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(all.len(), QUEUES * PER_QUEUE as usize);
        assert_eq!(unique.len(), all.len(), "a job was delivered twice");
        assert_eq!(set.acknowledged(), all.len());
        assert_eq!(set.in_flight(), 0);
    }
}
