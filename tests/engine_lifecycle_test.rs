//! Engine lifecycle, backpressure, and shutdown tests
//!
//! Exercises the state machine end to end with a trivial algorithm so the
//! queue and pool behavior is observable without the trading strategy in the
//! way.

use std::sync::Arc;
use std::time::Duration;

use tickflow::{
    EngineConfig, EngineError, EngineState, ProcessingAlgorithm, StreamEngine, StreamInput,
};

#[derive(Debug, Clone)]
struct Sample {
    value: i64,
    shutdown: bool,
}

impl Sample {
    fn new(value: i64) -> Self {
        Self {
            value,
            shutdown: false,
        }
    }

    fn stop() -> Self {
        Self {
            value: 0,
            shutdown: true,
        }
    }
}

impl StreamInput for Sample {
    fn is_shutdown(&self) -> bool {
        self.shutdown
    }
}

struct Doubler;

impl ProcessingAlgorithm<Sample, i64> for Doubler {
    fn process(&self, input: &Sample) -> Option<i64> {
        Some(input.value * 2)
    }
}

/// Holds its worker long enough for the pool to saturate.
struct SlowDoubler(Duration);

impl ProcessingAlgorithm<Sample, i64> for SlowDoubler {
    fn process(&self, input: &Sample) -> Option<i64> {
        std::thread::sleep(self.0);
        Some(input.value * 2)
    }
}

fn config(queue_capacity: usize, worker_count: usize) -> EngineConfig {
    EngineConfig {
        queue_capacity,
        worker_count,
        shutdown_grace: Duration::from_secs(8),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn processes_records_and_stops_on_sentinel() {
    let engine = Arc::new(StreamEngine::new(config(64, 2), Doubler).unwrap());
    for n in 1..=5 {
        assert!(engine.submit_input(Sample::new(n)));
    }
    assert!(engine.submit_input(Sample::stop()));

    let report = engine.run().await.unwrap();
    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(report.abandoned, 0);

    let mut outputs = Vec::new();
    while let Some(out) = engine.retrieve_output() {
        outputs.push(out);
    }
    outputs.sort();
    assert_eq!(outputs, vec![2, 4, 6, 8, 10]);

    let metrics = engine.metrics();
    assert_eq!(metrics.records_dispatched, 5);
    assert_eq!(metrics.outputs_published, 5);
    assert_eq!(metrics.outputs_dropped, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn second_run_is_rejected() {
    let engine = StreamEngine::new(config(8, 1), Doubler).unwrap();
    engine.submit_input(Sample::stop());
    engine.run().await.unwrap();

    match engine.run().await {
        Err(EngineError::AlreadyStarted) => {}
        other => panic!("expected AlreadyStarted, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn submission_rejects_when_input_queue_full() {
    let engine = StreamEngine::new(config(2, 1), Doubler).unwrap();
    assert!(engine.submit_input(Sample::new(1)));
    assert!(engine.submit_input(Sample::new(2)));
    // Queue full: rejected, not blocked, not panicked.
    assert!(!engine.submit_input(Sample::new(3)));
    assert_eq!(engine.metrics().inputs_rejected, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn outputs_queued_before_shutdown_survive_stop() {
    let engine = Arc::new(StreamEngine::new(config(16, 2), Doubler).unwrap());
    engine.submit_input(Sample::new(21));
    engine.submit_input(Sample::stop());
    engine.run().await.unwrap();

    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(engine.retrieve_output(), Some(42));
    assert_eq!(engine.retrieve_output(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn full_output_queue_drops_are_counted() {
    // Output capacity 2 and nobody draining: of 5 results exactly 2 are
    // published and 3 dropped, whatever order the workers finish in.
    let engine = Arc::new(StreamEngine::new(config(2, 1), Doubler).unwrap());
    let runner = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.run().await })
    };

    for n in 1..=5 {
        while !engine.submit_input(Sample::new(n)) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
    while !engine.submit_input(Sample::stop()) {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    runner.await.unwrap().unwrap();

    let metrics = engine.metrics();
    assert_eq!(metrics.outputs_published, 2);
    assert_eq!(metrics.outputs_dropped, 3);

    let mut retained = 0;
    while engine.retrieve_output().is_some() {
        retained += 1;
    }
    assert_eq!(retained, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn saturated_pool_degrades_to_caller_runs() {
    let engine = Arc::new(
        StreamEngine::new(config(64, 1), SlowDoubler(Duration::from_millis(50))).unwrap(),
    );
    for n in 1..=4 {
        engine.submit_input(Sample::new(n));
    }
    engine.submit_input(Sample::stop());
    engine.run().await.unwrap();

    let metrics = engine.metrics();
    assert_eq!(metrics.records_dispatched, 4);
    assert_eq!(metrics.outputs_published, 4);
    // With a single worker holding its permit for 50ms, at least one
    // dispatch had to run on the loop itself.
    assert!(metrics.caller_runs_executions >= 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn state_transitions_are_observable() {
    let engine = Arc::new(StreamEngine::new(config(8, 1), Doubler).unwrap());
    assert_eq!(engine.state(), EngineState::Idle);

    let mut states = engine.state_changes();
    let runner = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.run().await })
    };

    states
        .wait_for(|state| *state == EngineState::Running)
        .await
        .unwrap();

    engine.submit_input(Sample::stop());
    runner.await.unwrap().unwrap();
    assert_eq!(engine.state(), EngineState::Stopped);
}
