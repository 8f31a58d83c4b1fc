//! Automated trading demo
//!
//! Seeds the engine with a fixed price sequence for a handful of symbols,
//! submits the shutdown sentinel, runs the dispatch loop to completion, then
//! drains and prints the trades the averaging strategy produced. A thin
//! driver: everything it does goes through the engine's four public
//! operations.

use std::sync::Arc;

use clap::Parser;
use log::{info, warn};
use rust_decimal::Decimal;
use tickflow::{AveragingAlgorithm, EngineConfig, Price, StreamEngine};

const SYMBOLS: [&str; 5] = ["YP", "BDSA", "A", "BC", "CD"];
const PRICES: [i64; 9] = [0, 1, 2, 3, 4, 5, 0, 2, 19];

#[derive(Debug, Parser)]
#[command(name = "auto_trader", about = "Moving-average trading demo")]
struct Args {
    /// Prices averaged per symbol
    #[arg(long, default_value_t = 4)]
    window_size: usize,

    /// Concurrent workers
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Capacity of the input and output queues
    #[arg(long, default_value_t = 100_000)]
    queue_capacity: usize,

    /// Fixed quantity for every emitted order
    #[arg(long, default_value_t = 800)]
    order_quantity: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let algorithm = AveragingAlgorithm::new(args.window_size, args.order_quantity)?;
    let config = EngineConfig {
        queue_capacity: args.queue_capacity,
        worker_count: args.workers,
        ..Default::default()
    };
    let engine = Arc::new(StreamEngine::new(config, algorithm)?);

    info!("seeding {} symbols: {:?}", SYMBOLS.len(), SYMBOLS);
    for symbol in SYMBOLS {
        for value in PRICES {
            if !engine.submit_input(Price::new(symbol, Decimal::from(value))) {
                warn!("input queue full, dropped {}:{}", symbol, value);
            }
        }
    }
    engine.submit_input(Price::shutdown_signal());

    let runner = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.run().await })
    };
    let report = runner.await??;

    println!("TRADES MADE:");
    while let Some(trade) = engine.retrieve_output() {
        println!("{}", serde_json::to_string(&trade)?);
    }

    let metrics = engine.metrics();
    info!(
        "dispatched {} records, published {} trades, dropped {} outputs, abandoned {} tasks",
        metrics.records_dispatched,
        metrics.outputs_published,
        metrics.outputs_dropped,
        report.abandoned
    );
    Ok(())
}
