//! Engine execution counters
//!
//! The engine never hides data loss: a result dropped because the output
//! queue was full, a submission refused because the input queue was full, and
//! a task abandoned at shutdown are all counted here and can be read at any
//! time through [`EngineMetrics::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared between the dispatch loop and its workers.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    records_dispatched: AtomicU64,
    caller_runs_executions: AtomicU64,
    outputs_published: AtomicU64,
    outputs_dropped: AtomicU64,
    inputs_rejected: AtomicU64,
    tasks_abandoned: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_dispatched(&self) {
        self.records_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn caller_runs_execution(&self) {
        self.caller_runs_executions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn output_published(&self) {
        self.outputs_published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn output_dropped(&self) {
        self.outputs_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn input_rejected(&self) {
        self.inputs_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn tasks_abandoned(&self, count: u64) {
        self.tasks_abandoned.fetch_add(count, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_dispatched: self.records_dispatched.load(Ordering::Relaxed),
            caller_runs_executions: self.caller_runs_executions.load(Ordering::Relaxed),
            outputs_published: self.outputs_published.load(Ordering::Relaxed),
            outputs_dropped: self.outputs_dropped.load(Ordering::Relaxed),
            inputs_rejected: self.inputs_rejected.load(Ordering::Relaxed),
            tasks_abandoned: self.tasks_abandoned.load(Ordering::Relaxed),
        }
    }
}

/// Frozen view of the engine counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Records taken from the input queue and handed to a worker (or run
    /// inline under caller-runs).
    pub records_dispatched: u64,
    /// Dispatches that ran on the loop because every worker was busy.
    pub caller_runs_executions: u64,
    /// Results successfully offered to the output queue.
    pub outputs_published: u64,
    /// Results discarded because the output queue was full.
    pub outputs_dropped: u64,
    /// Submissions refused because the input queue was full.
    pub inputs_rejected: u64,
    /// In-flight tasks still running when the shutdown grace expired.
    pub tasks_abandoned: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_increments() {
        let metrics = EngineMetrics::new();
        metrics.record_dispatched();
        metrics.record_dispatched();
        metrics.output_published();
        metrics.output_dropped();
        metrics.input_rejected();
        metrics.caller_runs_execution();
        metrics.tasks_abandoned(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.records_dispatched, 2);
        assert_eq!(snapshot.outputs_published, 1);
        assert_eq!(snapshot.outputs_dropped, 1);
        assert_eq!(snapshot.inputs_rejected, 1);
        assert_eq!(snapshot.caller_runs_executions, 1);
        assert_eq!(snapshot.tasks_abandoned, 3);
    }
}
