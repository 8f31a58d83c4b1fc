//! Concurrent stream processing engine
//!
//! The engine owns two bounded queues and a fixed-size worker pool. One
//! dispatch loop takes records from the input queue, checks for the shutdown
//! sentinel, and hands everything else to the pool; each worker applies the
//! configured [`ProcessingAlgorithm`] and offers the result to the output
//! queue. External producers and consumers only ever touch the non-blocking
//! queue operations, so backpressure is carried entirely by queue capacity
//! and by caller-runs degradation when the pool is saturated.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle -> Running -> ShuttingDown -> Stopped
//! ```
//!
//! `run` performs the whole walk: it leaves `Idle` exactly once, loops in
//! `Running` until it takes a record whose shutdown flag is set, then waits a
//! bounded grace period for in-flight tasks before reporting and stopping.
//! Output retrieval stays available in every state, including `Stopped`.

pub mod algorithm;
pub mod config;
pub mod metrics;
pub mod queue;

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

use crate::tickflow::error::EngineError;

use self::algorithm::{ProcessingAlgorithm, StreamInput};
use self::config::EngineConfig;
use self::metrics::{EngineMetrics, MetricsSnapshot};
use self::queue::BoundedQueue;

/// Lifecycle states of the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, `run` not yet called
    Idle,
    /// Dispatch loop is consuming the input queue
    Running,
    /// Shutdown sentinel seen; waiting for in-flight tasks
    ShuttingDown,
    /// Dispatch finished; queued outputs remain retrievable
    Stopped,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Idle => write!(f, "idle"),
            EngineState::Running => write!(f, "running"),
            EngineState::ShuttingDown => write!(f, "shutting-down"),
            EngineState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Outcome of the shutdown phase of [`StreamEngine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Tasks joined during the shutdown phase, within the grace period.
    pub completed_in_flight: u64,
    /// Tasks abandoned because they outlived the grace period.
    pub abandoned: u64,
}

/// Generic concurrent stream processor.
///
/// `I` is the input record type (anything carrying the sentinel flag), `O`
/// the output record type, and `A` the processing algorithm. Dispatch is
/// static; the algorithm is chosen at construction.
pub struct StreamEngine<I, O, A> {
    config: EngineConfig,
    algorithm: Arc<A>,
    input: BoundedQueue<I>,
    output: Arc<BoundedQueue<O>>,
    workers: Arc<Semaphore>,
    metrics: Arc<EngineMetrics>,
    state: watch::Sender<EngineState>,
}

impl<I, O, A> StreamEngine<I, O, A>
where
    I: StreamInput,
    O: Send + 'static,
    A: ProcessingAlgorithm<I, O>,
{
    /// Build an engine from a validated configuration and an algorithm
    /// instance.
    pub fn new(config: EngineConfig, algorithm: A) -> Result<Self, EngineError> {
        config.validate()?;
        let (state, _) = watch::channel(EngineState::Idle);
        Ok(Self {
            input: BoundedQueue::new(config.queue_capacity),
            output: Arc::new(BoundedQueue::new(config.queue_capacity)),
            workers: Arc::new(Semaphore::new(config.worker_count)),
            algorithm: Arc::new(algorithm),
            metrics: Arc::new(EngineMetrics::new()),
            config,
            state,
        })
    }

    /// Non-blocking submission of an input record.
    ///
    /// Returns `false` when the input queue is full; the rejection is
    /// counted. Shutdown is requested through this same path, by submitting a
    /// record whose [`StreamInput::is_shutdown`] flag is set.
    pub fn submit_input(&self, record: I) -> bool {
        match self.input.offer(record) {
            Ok(()) => true,
            Err(_rejected) => {
                self.metrics.input_rejected();
                false
            }
        }
    }

    /// Non-blocking retrieval of the oldest published output, if any.
    ///
    /// Decoupled from the run state: results queued before shutdown remain
    /// retrievable after the engine has stopped.
    pub fn retrieve_output(&self) -> Option<O> {
        self.output.poll()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        *self.state.borrow()
    }

    /// Subscribe to lifecycle transitions.
    pub fn state_changes(&self) -> watch::Receiver<EngineState> {
        self.state.subscribe()
    }

    /// Point-in-time copy of the execution counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// The processing algorithm this engine dispatches to.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Run the dispatch loop until a shutdown sentinel is taken.
    ///
    /// Expected to be awaited on its own task; submission and retrieval stay
    /// non-blocking while it runs. Errors with
    /// [`EngineError::AlreadyStarted`] if the engine ever left `Idle` before.
    pub async fn run(&self) -> Result<ShutdownReport, EngineError> {
        let started = self.state.send_if_modified(|state| {
            if *state == EngineState::Idle {
                *state = EngineState::Running;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(EngineError::AlreadyStarted);
        }
        info!(
            "engine running: {} workers, queue capacity {}",
            self.config.worker_count, self.config.queue_capacity
        );

        let mut tasks: JoinSet<()> = JoinSet::new();
        loop {
            let record = self.input.take().await;
            if record.is_shutdown() {
                debug!("shutdown sentinel taken, halting dispatch");
                break;
            }
            // Keep the set from accumulating finished handles on long runs.
            while tasks.try_join_next().is_some() {}
            self.dispatch(record, &mut tasks);
        }

        self.state.send_replace(EngineState::ShuttingDown);
        let report = self.drain_in_flight(tasks).await;
        self.state.send_replace(EngineState::Stopped);
        info!(
            "engine stopped: {} in-flight task(s) completed, {} abandoned",
            report.completed_in_flight, report.abandoned
        );
        Ok(report)
    }

    /// Hand one record to the pool, or run it inline when no worker is free.
    fn dispatch(&self, record: I, tasks: &mut JoinSet<()>) {
        self.metrics.record_dispatched();
        match Arc::clone(&self.workers).try_acquire_owned() {
            Ok(permit) => {
                let algorithm = Arc::clone(&self.algorithm);
                let output = Arc::clone(&self.output);
                let metrics = Arc::clone(&self.metrics);
                tasks.spawn(async move {
                    let _permit = permit;
                    Self::execute(&algorithm, &output, &metrics, &record);
                });
            }
            Err(_) => {
                // Caller-runs degradation: the loop does the work itself,
                // which also stops it taking further input until done.
                self.metrics.caller_runs_execution();
                Self::execute(&self.algorithm, &self.output, &self.metrics, &record);
            }
        }
    }

    /// Apply the algorithm and publish the result, counting a drop when the
    /// output queue is full.
    fn execute(algorithm: &A, output: &BoundedQueue<O>, metrics: &EngineMetrics, record: &I) {
        if let Some(result) = algorithm.process(record) {
            match output.offer(result) {
                Ok(()) => metrics.output_published(),
                Err(_dropped) => {
                    metrics.output_dropped();
                    warn!("output queue full, dropping result");
                }
            }
        }
    }

    /// Wait for in-flight tasks up to the configured grace period, then
    /// abandon whatever is still running.
    async fn drain_in_flight(&self, mut tasks: JoinSet<()>) -> ShutdownReport {
        let mut completed = 0u64;
        let drained = tokio::time::timeout(self.config.shutdown_grace, async {
            while tasks.join_next().await.is_some() {
                completed += 1;
            }
        })
        .await;

        let abandoned = tasks.len() as u64;
        if drained.is_err() && abandoned > 0 {
            warn!(
                "shutdown grace of {:?} expired, abandoning {} in-flight task(s)",
                self.config.shutdown_grace, abandoned
            );
            self.metrics.tasks_abandoned(abandoned);
            tasks.abort_all();
        }
        ShutdownReport {
            completed_in_flight: completed,
            abandoned,
        }
    }
}
