/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # orderbook-reconciler
//!
//! Order-list reconciliation for a two-sided order book display.
//!
//! The crate keeps buy and sell orders in arrival order (most recent first),
//! loads them from a snapshot, and lets callers inject synthetic orders. Each
//! synthetic order is prepended optimistically, posted through a
//! [`Submitter`](reconciler::Submitter), and then either committed or rolled
//! back. Every change is reported as a [`RenderInstruction`]:
//!
//! - [`RenderInstruction::FullRebuild`] after a snapshot load
//! - [`RenderInstruction::IncrementalInsert`] after a committed submission
//! - [`RenderInstruction::None`] after a rolled-back submission
//!
//! Rendering itself is left to instruction consumers such as
//! [`board::Board`].
//!
//! ## Modules
//!
//! - [`orderbook`]: `Order`, `Side`, and the [`OrderStore`]
//! - [`reconciler`]: the event loop, submission and generator seams,
//!   journal and replay
//! - [`snapshot`]: initial snapshot sources
//! - [`board`]: reference row model
//! - [`config`]: runtime configuration

pub mod board;
pub mod config;
pub mod orderbook;
pub mod reconciler;
pub mod snapshot;

pub use config::{ConfigError, OrderbookConfig};
pub use orderbook::{Order, OrderBookSnapshot, OrderRequest, OrderStore, Side, StoreError};
pub use reconciler::{Reconciler, ReconcilerError, ReconcilerHandle, RenderInstruction};
pub use snapshot::{FileSnapshotSource, SnapshotError, SnapshotSource, StaticSnapshotSource};
