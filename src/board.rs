/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Reference consumer of [`RenderInstruction`]s.
//!
//! [`Board`] keeps the two-column display as a flat list of rows: buy orders,
//! a separator, then sell orders. Full rebuilds redraw every row; incremental
//! inserts place a single highlighted row at the top of its column.
//!
//! # Examples
//!
//! ```
//! use orderbook_reconciler::board::Board;
//! use orderbook_reconciler::{Order, RenderInstruction, Side};
//! use std::time::{Duration, Instant};
//!
//! let mut board = Board::new(Duration::from_millis(600));
//! let now = Instant::now();
//! board.apply(&RenderInstruction::FullRebuild {
//!     buy: vec![Order::new(1.5, 100.0)],
//!     sell: vec![Order::new(1.0, 105.0)],
//! }, now);
//! board.apply(&RenderInstruction::IncrementalInsert {
//!     side: Side::Sell,
//!     order: Order::new(4.2, 300.0),
//! }, now);
//!
//! assert_eq!(board.lines(), vec![
//!     "  1.5000    100.00",
//!     "----------------",
//!     "* 4.2000    300.00",
//!     "  1.0000    105.00",
//! ]);
//! ```

use crate::config::BoardConfig;
use crate::orderbook::{Order, Side};
use crate::reconciler::RenderInstruction;
use std::time::{Duration, Instant};
use tracing::trace;

const SEPARATOR_LINE: &str = "----------------";

/// One displayed row.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// An order in one of the two columns.
    Order {
        /// Column the row belongs to.
        side: Side,
        /// Displayed order.
        order: Order,
        /// Highlight deadline for freshly inserted rows.
        highlight_until: Option<Instant>,
    },

    /// Divider between the buy and sell columns.
    Separator,
}

impl Row {
    /// Returns `true` if the row is still marked as just inserted.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        matches!(
            self,
            Self::Order {
                highlight_until: Some(_),
                ..
            }
        )
    }
}

/// Row model driven by render instructions.
#[derive(Debug, Clone)]
pub struct Board {
    rows: Vec<Row>,
    highlight: Duration,
}

impl Board {
    /// Creates an empty board holding only the separator.
    #[must_use]
    pub fn new(highlight: Duration) -> Self {
        Self {
            rows: vec![Row::Separator],
            highlight,
        }
    }

    /// Creates an empty board from configuration.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.highlight())
    }

    /// Applies one instruction. `now` anchors the highlight of inserted rows.
    pub fn apply(&mut self, instruction: &RenderInstruction, now: Instant) {
        match instruction {
            RenderInstruction::FullRebuild { buy, sell } => self.rebuild(buy, sell),
            RenderInstruction::IncrementalInsert { side, order } => {
                self.insert(*side, *order, now + self.highlight);
            }
            RenderInstruction::None => {}
        }
    }

    fn rebuild(&mut self, buy: &[Order], sell: &[Order]) {
        self.rows.clear();
        self.rows.reserve(buy.len() + sell.len() + 1);
        self.rows.extend(buy.iter().map(|order| Row::Order {
            side: Side::Buy,
            order: *order,
            highlight_until: None,
        }));
        self.rows.push(Row::Separator);
        self.rows.extend(sell.iter().map(|order| Row::Order {
            side: Side::Sell,
            order: *order,
            highlight_until: None,
        }));
        trace!(rows = self.rows.len(), "board rebuilt");
    }

    fn insert(&mut self, side: Side, order: Order, highlight_until: Instant) {
        let position = match side {
            Side::Buy => 0,
            Side::Sell => self.separator_index() + 1,
        };
        self.rows.insert(
            position,
            Row::Order {
                side,
                order,
                highlight_until: Some(highlight_until),
            },
        );
        trace!(%side, position, "row inserted");
    }

    /// Clears highlights whose deadline is at or before `now`.
    ///
    /// Returns how many rows were cleared.
    pub fn expire_highlights(&mut self, now: Instant) -> usize {
        let mut cleared = 0;
        for row in &mut self.rows {
            if let Row::Order {
                highlight_until, ..
            } = row
            {
                if highlight_until.is_some_and(|deadline| deadline <= now) {
                    *highlight_until = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    fn separator_index(&self) -> usize {
        self.rows
            .iter()
            .position(|row| matches!(row, Row::Separator))
            .unwrap_or(self.rows.len())
    }

    /// All rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Orders displayed in `side`'s column, top to bottom.
    #[must_use]
    pub fn column(&self, side: Side) -> Vec<Order> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Order {
                    side: row_side,
                    order,
                    ..
                } if *row_side == side => Some(*order),
                _ => None,
            })
            .collect()
    }

    /// Renders each row as text. Highlighted rows are prefixed with `*`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| match row {
                Row::Separator => SEPARATOR_LINE.to_string(),
                Row::Order { order, .. } => {
                    let marker = if row.is_highlighted() { '*' } else { ' ' };
                    format!("{marker} {:.4} {:>9.2}", order.quantity(), order.price())
                }
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}
