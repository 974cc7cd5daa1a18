/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Deterministic replay of recorded reconciler events.
//!
//! [`ReplayEngine`] folds a [`Journal`] back into an [`OrderStore`]:
//! full rebuilds load a snapshot, incremental inserts prepend, and `None`
//! events are skipped. Rolled-back submissions never reach the journal as
//! inserts, so the rebuilt store holds exactly the committed state.
//!
//! # Examples
//!
//! ```
//! use orderbook_reconciler::reconciler::journal::{InMemoryJournal, Journal};
//! use orderbook_reconciler::reconciler::{ReconcileEvent, RenderInstruction, ReplayEngine};
//! use orderbook_reconciler::{Order, Side};
//!
//! let mut journal = InMemoryJournal::new();
//! journal.append(ReconcileEvent::new(1, 0, None, RenderInstruction::FullRebuild {
//!     buy: vec![Order::new(1.5, 100.0)],
//!     sell: vec![],
//! })).ok();
//! journal.append(ReconcileEvent::new(2, 0, None, RenderInstruction::IncrementalInsert {
//!     side: Side::Sell,
//!     order: Order::new(4.2, 300.0),
//! })).ok();
//!
//! let (store, last_seq) = ReplayEngine::replay(&journal).unwrap();
//! assert_eq!(last_seq, 2);
//! assert_eq!(store.len(Side::Buy), 1);
//! assert_eq!(store.len(Side::Sell), 1);
//! ```

use super::event::ReconcileEvent;
use super::instruction::RenderInstruction;
use super::journal::Journal;
use crate::orderbook::{OrderBookSnapshot, OrderStore};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while journaling or replaying events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The journal contains no events to replay.
    #[error("journal is empty, nothing to replay")]
    EmptyJournal,

    /// An appended event did not advance the sequence.
    #[error("event {found} appended after {last_sequence}: sequence must increase")]
    OutOfOrder {
        /// Last sequence number already stored.
        last_sequence: u64,
        /// Sequence number of the rejected event.
        found: u64,
    },

    /// A gap was detected between expected and found sequence numbers.
    #[error("sequence gap detected: expected {expected}, found {found}")]
    SequenceGap {
        /// The expected next sequence number.
        expected: u64,
        /// The actual sequence number found.
        found: u64,
    },

    /// The requested range starts after the journal's last entry.
    #[error("invalid from_sequence {from_sequence}: journal last sequence is {last_sequence}")]
    InvalidSequence {
        /// The sequence number requested.
        from_sequence: u64,
        /// The last sequence number in the journal.
        last_sequence: u64,
    },
}

/// Stateless replay engine that rebuilds an [`OrderStore`] from a [`Journal`].
pub struct ReplayEngine;

impl ReplayEngine {
    /// Replays the whole journal onto a fresh store.
    ///
    /// Returns the rebuilt store and the sequence number of the last event
    /// applied.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::SequenceGap`] if consecutive events skip a number
    pub fn replay(journal: &impl Journal) -> Result<(OrderStore, u64), ReplayError> {
        Self::replay_with_progress(journal, |_, _| {})
    }

    /// Replays with a callback invoked after each event as
    /// `(events_applied, sequence_num)`.
    ///
    /// # Errors
    ///
    /// Same as [`replay`](Self::replay).
    pub fn replay_with_progress(
        journal: &impl Journal,
        progress: impl Fn(u64, u64),
    ) -> Result<(OrderStore, u64), ReplayError> {
        if journal.is_empty() {
            return Err(ReplayError::EmptyJournal);
        }

        let mut store = OrderStore::new();
        let mut expected: Option<u64> = None;
        let mut count = 0u64;
        let mut last_seq = 0u64;

        for event in journal.read_from(0) {
            if let Some(expected) = expected {
                if event.sequence_num != expected {
                    return Err(ReplayError::SequenceGap {
                        expected,
                        found: event.sequence_num,
                    });
                }
            }

            Self::apply_event(&mut store, event);
            last_seq = event.sequence_num;
            expected = Some(last_seq + 1);
            count = count.saturating_add(1);
            progress(count, last_seq);
        }

        debug!(events = count, last_seq, "journal replayed");
        Ok((store, last_seq))
    }

    /// Returns the events with `from_sequence <= sequence_num <= to_sequence`.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    pub fn replay_range(
        journal: &impl Journal,
        from_sequence: u64,
        to_sequence: u64,
    ) -> Result<Vec<&ReconcileEvent>, ReplayError> {
        let last_sequence = journal.last_sequence().ok_or(ReplayError::EmptyJournal)?;
        if from_sequence > last_sequence {
            return Err(ReplayError::InvalidSequence {
                from_sequence,
                last_sequence,
            });
        }

        Ok(journal.read_range(from_sequence, to_sequence).collect())
    }

    /// Replays the journal and compares the result to `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`replay`](Self::replay).
    pub fn verify(
        journal: &impl Journal,
        expected: &OrderBookSnapshot,
    ) -> Result<bool, ReplayError> {
        let (store, _) = Self::replay(journal)?;
        Ok(store.snapshot() == *expected)
    }

    fn apply_event(store: &mut OrderStore, event: &ReconcileEvent) {
        match &event.instruction {
            RenderInstruction::FullRebuild { buy, sell } => {
                store.load_snapshot(OrderBookSnapshot::new(buy.clone(), sell.clone()));
            }
            RenderInstruction::IncrementalInsert { side, order } => {
                store.prepend(*side, *order);
            }
            RenderInstruction::None => {}
        }
    }
}
