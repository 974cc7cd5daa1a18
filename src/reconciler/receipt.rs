/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Receipt returned to callers once a synthetic order submission resolves.

use super::instruction::RenderInstruction;
use super::submission::SubmissionId;
use crate::orderbook::{Order, Side};

/// Outcome of one `submit_synthetic_order` call.
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::reconciler::{RenderInstruction, SubmissionReceipt};
/// use orderbook_reconciler::{Order, Side};
/// use uuid::Uuid;
///
/// let order = Order::new(4.2, 300.0);
/// let receipt = SubmissionReceipt {
///     submission_id: Uuid::new_v4(),
///     sequence_num: 2,
///     side: Side::Sell,
///     order,
///     instruction: RenderInstruction::IncrementalInsert { side: Side::Sell, order },
/// };
/// assert!(receipt.is_committed());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    /// Identifier assigned when the submission started.
    pub submission_id: SubmissionId,

    /// Sequence number of the event this submission produced.
    pub sequence_num: u64,

    /// Side the order was posted on.
    pub side: Side,

    /// The synthetic candidate order.
    pub order: Order,

    /// What the renderer was told to do.
    pub instruction: RenderInstruction,
}

impl SubmissionReceipt {
    /// Returns `true` if the order was committed to the book.
    #[inline]
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.instruction.is_insert()
    }
}
