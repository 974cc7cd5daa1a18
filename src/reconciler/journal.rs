/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Journal trait and in-memory implementation for reconciler event storage.
//!
//! A journal is an append-only log of [`ReconcileEvent`]s. Recording events
//! lets a session be rebuilt with [`ReplayEngine`](super::ReplayEngine)
//! instead of re-fetching the snapshot and losing synthetic orders.

use super::event::ReconcileEvent;
use super::replay::ReplayError;

/// Append-only event log for [`ReconcileEvent`]s.
///
/// Implementations must preserve insertion order and reject events whose
/// sequence number does not advance.
pub trait Journal {
    /// Appends a new event to the journal.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::OutOfOrder`] if the event's sequence number is
    /// not greater than the last stored one.
    fn append(&mut self, event: ReconcileEvent) -> Result<(), ReplayError>;

    /// Returns an iterator over all events with `sequence_num >= from_sequence`.
    ///
    /// Events are yielded in ascending sequence order.
    fn read_from(&self, from_sequence: u64) -> impl Iterator<Item = &ReconcileEvent> + '_;

    /// Returns an iterator over events with `from_sequence <= sequence_num <= to_sequence`.
    fn read_range(
        &self,
        from_sequence: u64,
        to_sequence: u64,
    ) -> impl Iterator<Item = &ReconcileEvent> + '_;

    /// Returns the total number of events stored.
    #[must_use]
    fn len(&self) -> usize;

    /// Returns `true` if no events have been appended.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sequence number of the last event, or `None` if empty.
    #[must_use]
    fn last_sequence(&self) -> Option<u64>;
}

/// In-memory implementation of [`Journal`].
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::reconciler::journal::{InMemoryJournal, Journal};
/// use orderbook_reconciler::reconciler::{ReconcileEvent, RenderInstruction};
///
/// let mut journal = InMemoryJournal::new();
/// assert!(journal.is_empty());
///
/// journal.append(ReconcileEvent::new(1, 0, None, RenderInstruction::None)).ok();
/// assert_eq!(journal.len(), 1);
/// assert!(journal.append(ReconcileEvent::new(1, 0, None, RenderInstruction::None)).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryJournal {
    events: Vec<ReconcileEvent>,
}

impl InMemoryJournal {
    /// Creates a new empty in-memory journal.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Creates a new in-memory journal with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Returns a slice of all stored events.
    #[must_use]
    pub fn events(&self) -> &[ReconcileEvent] {
        &self.events
    }
}

impl Journal for InMemoryJournal {
    fn append(&mut self, event: ReconcileEvent) -> Result<(), ReplayError> {
        if let Some(last) = self.last_sequence() {
            if event.sequence_num <= last {
                return Err(ReplayError::OutOfOrder {
                    last_sequence: last,
                    found: event.sequence_num,
                });
            }
        }
        self.events.push(event);
        Ok(())
    }

    fn read_from(&self, from_sequence: u64) -> impl Iterator<Item = &ReconcileEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.sequence_num >= from_sequence)
    }

    fn read_range(
        &self,
        from_sequence: u64,
        to_sequence: u64,
    ) -> impl Iterator<Item = &ReconcileEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.sequence_num >= from_sequence && e.sequence_num <= to_sequence)
    }

    #[inline]
    fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    fn last_sequence(&self) -> Option<u64> {
        self.events.last().map(|e| e.sequence_num)
    }
}
