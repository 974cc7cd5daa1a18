/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! The submission collaborator.
//!
//! The reconciler is written against [`Submitter`]'s success/failure contract,
//! so a real backend can replace [`SimulatedSubmitter`] without touching the
//! reconciliation logic.

use crate::config::SubmissionConfig;
use crate::orderbook::OrderRequest;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Identifier attached to every submission for logging and receipts.
pub type SubmissionId = Uuid;

/// Why a submission was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission failed: {reason}")]
pub struct SubmissionFailed {
    /// Human readable reason reported by the backend.
    pub reason: String,
}

impl SubmissionFailed {
    /// Creates a failure with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Result of posting one order.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The backend accepted the order and echoed it back.
    Success {
        /// Acknowledged payload.
        data: OrderRequest,
    },

    /// The backend refused the order or could not be reached.
    Failure {
        /// What went wrong.
        error: SubmissionFailed,
    },
}

impl SubmissionOutcome {
    /// Returns `true` for [`SubmissionOutcome::Success`].
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Posts an order somewhere and reports whether it was accepted.
///
/// Submissions cannot be cancelled and have no timeout; the returned future
/// is always driven to completion.
pub trait Submitter: Send + Sync + 'static {
    /// Posts `request`.
    fn submit(&self, request: OrderRequest) -> impl Future<Output = SubmissionOutcome> + Send;
}

/// Backend stand-in that accepts every order after a fixed delay.
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::reconciler::{SimulatedSubmitter, Submitter};
/// use orderbook_reconciler::{Order, Side};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let submitter = SimulatedSubmitter::new(Duration::ZERO);
/// let outcome = submitter.submit(Order::new(5.5, 100.25).to_request(Side::Buy)).await;
/// assert!(outcome.is_success());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    /// Creates a submitter acknowledging after `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates a submitter from configuration.
    #[must_use]
    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self::new(config.delay())
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::from_config(&SubmissionConfig::default())
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(&self, request: OrderRequest) -> impl Future<Output = SubmissionOutcome> + Send {
        let delay = self.delay;
        async move {
            info!(
                side = %request.side,
                quantity = request.quantity,
                price = request.price,
                "posting order"
            );
            tokio::time::sleep(delay).await;
            SubmissionOutcome::Success { data: request }
        }
    }
}
