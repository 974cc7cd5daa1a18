/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Commands carried from [`ReconcilerHandle`](super::ReconcilerHandle) to the
//! event loop. Each carries the oneshot sender for its reply.

use super::instruction::RenderInstruction;
use super::receipt::SubmissionReceipt;
use crate::orderbook::{OrderBookSnapshot, Side};
use tokio::sync::oneshot;

#[derive(Debug)]
pub(crate) enum ReconcilerCommand {
    /// Replace the whole book.
    ApplySnapshot {
        snapshot: OrderBookSnapshot,
        reply: oneshot::Sender<RenderInstruction>,
    },

    /// Generate, prepend and post one synthetic order.
    SubmitSynthetic {
        side: Side,
        reply: oneshot::Sender<SubmissionReceipt>,
    },

    /// Copy out the current book.
    ReadBook {
        reply: oneshot::Sender<OrderBookSnapshot>,
    },
}
