/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Render instructions.
//!
//! The reconciler never draws anything. It describes what changed and leaves
//! the drawing to whoever consumes these instructions.

use crate::orderbook::{Order, OrderBookSnapshot, Side};
use serde::{Deserialize, Serialize};

/// What a renderer must do after a reconciliation step.
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::{Order, RenderInstruction, Side};
///
/// let instruction = RenderInstruction::IncrementalInsert {
///     side: Side::Sell,
///     order: Order::new(4.2, 300.0),
/// };
/// assert!(instruction.changes_display());
/// assert!(!RenderInstruction::None.changes_display());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderInstruction {
    /// Clear every row and redraw both columns: buy orders, a separator,
    /// then sell orders, each in store order.
    FullRebuild {
        /// Complete buy side, most recent first.
        buy: Vec<Order>,
        /// Complete sell side, most recent first.
        sell: Vec<Order>,
    },

    /// Insert one row at the top of `side`'s column, leaving other rows alone.
    IncrementalInsert {
        /// Column receiving the row.
        side: Side,
        /// The committed order.
        order: Order,
    },

    /// Nothing visible changed.
    None,
}

impl RenderInstruction {
    /// Builds a full rebuild carrying the whole snapshot.
    #[must_use]
    pub fn full_rebuild(snapshot: OrderBookSnapshot) -> Self {
        let OrderBookSnapshot { buy, sell } = snapshot;
        Self::FullRebuild { buy, sell }
    }

    /// Returns `true` unless this is [`RenderInstruction::None`].
    #[inline]
    #[must_use]
    pub fn changes_display(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` for an incremental insertion.
    #[inline]
    #[must_use]
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::IncrementalInsert { .. })
    }
}
