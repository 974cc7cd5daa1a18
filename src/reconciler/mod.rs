/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Reconciler module: folds snapshots and synthetic order submissions into
//! the order book and tells renderers what to redraw.
//!
//! # Architecture
//!
//! - Commands are submitted through a cloneable [`ReconcilerHandle`]
//! - A single event loop owns the [`OrderStore`](crate::OrderStore) and
//!   applies commands in arrival order
//! - Submissions are prepended optimistically, posted on their own task, then
//!   committed or rolled back when the outcome comes back
//! - Every resulting [`RenderInstruction`] is stamped with a monotonic
//!   sequence number and delivered to listeners as a [`ReconcileEvent`]
//!
//! # Examples
//!
//! ```no_run
//! use orderbook_reconciler::reconciler::{Reconciler, SimulatedSubmitter, UniformOrderGenerator};
//! use orderbook_reconciler::{OrderBookSnapshot, Side};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reconciler = Reconciler::new(SimulatedSubmitter::default(), UniformOrderGenerator::new());
//!
//! reconciler.add_listener(|event| {
//!     println!("Event {}: {:?}", event.sequence_num, event.instruction);
//! });
//!
//! let (handle, task) = reconciler.spawn();
//! handle.apply_snapshot(OrderBookSnapshot::default()).await?;
//! handle.submit_synthetic_order(Side::Sell).await?;
//!
//! drop(handle);
//! task.wait().await?;
//! # Ok(())
//! # }
//! ```

mod command;
pub mod core;
pub mod event;
pub mod generator;
pub mod instruction;
pub mod journal;
pub mod receipt;
pub mod replay;
pub mod submission;


// Re-export main types
pub use self::core::{Reconciler, ReconcilerError, ReconcilerHandle, ReconcilerTask};
pub use event::ReconcileEvent;
pub use generator::{OrderGenerator, UniformOrderGenerator};
pub use instruction::RenderInstruction;
pub use receipt::SubmissionReceipt;
pub use replay::{ReplayEngine, ReplayError};
pub use submission::{
    SimulatedSubmitter, SubmissionFailed, SubmissionId, SubmissionOutcome, Submitter,
};
