/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Reconciler event types.
//!
//! Every render instruction the reconciler produces is wrapped in a
//! [`ReconcileEvent`] and handed to listeners in sequence order.

use super::instruction::RenderInstruction;
use super::submission::SubmissionId;
use serde::{Deserialize, Serialize};

/// Event emitted after each snapshot load or submission resolution.
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::reconciler::{ReconcileEvent, RenderInstruction};
///
/// let event = ReconcileEvent::new(1, 0, None, RenderInstruction::None);
/// assert_eq!(event.sequence_num, 1);
/// assert!(event.submission_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileEvent {
    /// Monotonically increasing sequence number, starting at 1.
    pub sequence_num: u64,

    /// Nanosecond timestamp when the instruction was produced.
    pub timestamp_ns: u64,

    /// Submission that produced this event; `None` for snapshot loads.
    pub submission_id: Option<SubmissionId>,

    /// What the renderer must do.
    pub instruction: RenderInstruction,
}

impl ReconcileEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(
        sequence_num: u64,
        timestamp_ns: u64,
        submission_id: Option<SubmissionId>,
        instruction: RenderInstruction,
    ) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            submission_id,
            instruction,
        }
    }
}
