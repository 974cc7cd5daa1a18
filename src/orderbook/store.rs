/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! The authoritative two-sided order sequence.
//!
//! Each side is kept most-recent-first: new orders are pushed to the front and
//! never sorted by price. A side that never received data is simply empty.

use super::error::StoreError;
use super::order::{Order, Side};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// A full copy of both sides, as loaded from a snapshot source or read back
/// from an [`OrderStore`].
///
/// Missing keys and `null` sides deserialize as empty sides.
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::OrderBookSnapshot;
///
/// let snapshot: OrderBookSnapshot = serde_json::from_str(r#"{"buy": [[1.5, 100]]}"#).unwrap();
/// assert_eq!(snapshot.buy.len(), 1);
/// assert!(snapshot.sell.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Buy orders, most recent first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub buy: Vec<Order>,

    /// Sell orders, most recent first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sell: Vec<Order>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Order>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Order>>::deserialize(deserializer)?.unwrap_or_default())
}

impl OrderBookSnapshot {
    /// Creates a snapshot from the two sides.
    #[must_use]
    pub fn new(buy: Vec<Order>, sell: Vec<Order>) -> Self {
        Self { buy, sell }
    }

    /// Orders of one side.
    #[must_use]
    pub fn side(&self, side: Side) -> &[Order] {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }
}

/// In-memory holder of both order sequences.
///
/// Only [`load_snapshot`](Self::load_snapshot), [`prepend`](Self::prepend) and
/// [`remove_first`](Self::remove_first) mutate it.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    sides: [VecDeque<Order>; 2],
    generation: u64,
}

impl OrderStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both sides wholesale.
    ///
    /// Contents are not validated. Each call bumps the store generation so
    /// pending optimistic work can tell that the book it touched is gone.
    pub fn load_snapshot(&mut self, snapshot: OrderBookSnapshot) {
        let OrderBookSnapshot { buy, sell } = snapshot;
        debug!(buy = buy.len(), sell = sell.len(), "loading snapshot");
        self.sides = [VecDeque::from(buy), VecDeque::from(sell)];
        self.generation = self.generation.wrapping_add(1);
    }

    /// Inserts `order` at the front of `side` and returns the new length.
    pub fn prepend(&mut self, side: Side, order: Order) -> usize {
        let orders = &mut self.sides[side.index()];
        orders.push_front(order);
        trace!(%side, len = orders.len(), "prepended order");
        orders.len()
    }

    /// Removes the front order of `side`, undoing a [`prepend`](Self::prepend).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptySequence`] if `side` holds no orders.
    pub fn remove_first(&mut self, side: Side) -> Result<Order, StoreError> {
        self.sides[side.index()]
            .pop_front()
            .ok_or(StoreError::EmptySequence(side))
    }

    /// Iterates the orders of `side`, most recent first.
    pub fn orders(&self, side: Side) -> impl ExactSizeIterator<Item = &Order> + '_ {
        self.sides[side.index()].iter()
    }

    /// Front order of `side`, if any.
    #[must_use]
    pub fn first(&self, side: Side) -> Option<&Order> {
        self.sides[side.index()].front()
    }

    /// Number of orders on `side`.
    #[inline]
    #[must_use]
    pub fn len(&self, side: Side) -> usize {
        self.sides[side.index()].len()
    }

    /// Returns `true` if both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sides.iter().all(VecDeque::is_empty)
    }

    /// Number of snapshots loaded so far.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Copies both sides out in store order.
    #[must_use]
    pub fn snapshot(&self) -> OrderBookSnapshot {
        OrderBookSnapshot {
            buy: self.orders(Side::Buy).copied().collect(),
            sell: self.orders(Side::Sell).copied().collect(),
        }
    }
}
