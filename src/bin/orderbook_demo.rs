/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Loads a snapshot, injects synthetic orders and prints the resulting board.

use clap::Parser;
use orderbook_reconciler::board::Board;
use orderbook_reconciler::reconciler::{Reconciler, SimulatedSubmitter, UniformOrderGenerator};
use orderbook_reconciler::{
    FileSnapshotSource, Order, OrderBookSnapshot, OrderbookConfig, Side, SnapshotSource,
    StaticSnapshotSource,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "orderbook_demo", about = "Simulated order book with synthetic orders")]
struct Args {
    /// JSON snapshot file (`{"buy": [[qty, price], ...], "sell": [...]}`).
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Synthetic buy orders to submit.
    #[arg(long, default_value_t = 1)]
    buys: usize,

    /// Synthetic sell orders to submit.
    #[arg(long, default_value_t = 1)]
    sells: usize,

    /// RNG seed, overriding the configured one.
    #[arg(long)]
    seed: Option<u64>,
}

fn sample_snapshot() -> OrderBookSnapshot {
    OrderBookSnapshot::new(
        vec![Order::new(1.5, 100.0), Order::new(2.0, 95.0)],
        vec![Order::new(1.0, 105.0), Order::new(3.0, 110.0)],
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => OrderbookConfig::from_path(path)?,
        None => OrderbookConfig::default(),
    };
    if args.seed.is_some() {
        config.generator.seed = args.seed;
    }

    let snapshot = match &args.snapshot {
        Some(path) => FileSnapshotSource::new(path).fetch().await?,
        None => StaticSnapshotSource::new(sample_snapshot()).fetch().await?,
    };

    let board = Arc::new(Mutex::new(Board::from_config(&config.board)));
    let mut reconciler = Reconciler::with_capacity(
        SimulatedSubmitter::from_config(&config.submission),
        UniformOrderGenerator::from_config(&config.generator)?,
        config.channel_capacity,
    );
    let listener_board = Arc::clone(&board);
    reconciler.add_listener(move |event| {
        if !event.instruction.changes_display() {
            return;
        }
        match listener_board.lock() {
            Ok(mut board) => board.apply(&event.instruction, Instant::now()),
            Err(_) => warn!(sequence_num = event.sequence_num, "board lock poisoned"),
        }
    });

    let (handle, task) = reconciler.spawn();
    handle.apply_snapshot(snapshot).await?;

    let sides = std::iter::repeat_n(Side::Buy, args.buys)
        .chain(std::iter::repeat_n(Side::Sell, args.sells));
    let mut pending = Vec::new();
    for side in sides {
        let handle = handle.clone();
        pending.push(tokio::spawn(async move {
            handle.submit_synthetic_order(side).await
        }));
    }

    let mut committed = 0usize;
    for submission in pending {
        if submission.await??.is_committed() {
            committed += 1;
        }
    }
    info!(committed, "submissions resolved");

    let book = handle.book().await?;
    drop(handle);
    task.wait().await?;

    {
        let board = board.lock().map_err(|_| "board lock poisoned")?;
        for line in board.lines() {
            println!("{line}");
        }
    }

    tokio::time::sleep(config.board.highlight()).await;
    let mut board = board.lock().map_err(|_| "board lock poisoned")?;
    let cleared = board.expire_highlights(Instant::now());
    info!(
        buy = book.buy.len(),
        sell = book.sell.len(),
        cleared,
        "final book"
    );

    Ok(())
}
