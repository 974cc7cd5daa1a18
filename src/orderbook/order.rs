/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Order and side types.
//!
//! An [`Order`] is a bare `(quantity, price)` pair with no identity beyond its
//! position in a side's sequence. On the wire it is a two-element JSON array.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy interest, drawn above the separator.
    Buy,
    /// Sell interest, drawn below the separator.
    Sell,
}

impl Side {
    /// Both sides in display order.
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];

    /// Dense index used for per-side arrays.
    #[inline]
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Buy => 0,
            Self::Sell => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// An immutable `(quantity, price)` pair.
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::Order;
///
/// let order: Order = serde_json::from_str("[1.5, 100.0]").unwrap();
/// assert_eq!(order, Order::new(1.5, 100.0));
/// assert_eq!(serde_json::to_string(&order).unwrap(), "[1.5,100.0]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Order {
    quantity: f64,
    price: f64,
}

impl Order {
    /// Creates a new order.
    #[must_use]
    pub const fn new(quantity: f64, price: f64) -> Self {
        Self { quantity, price }
    }

    /// Order quantity.
    #[inline]
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Order price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Builds the submission payload for this order on `side`.
    #[must_use]
    pub fn to_request(&self, side: Side) -> OrderRequest {
        OrderRequest {
            side,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

impl From<(f64, f64)> for Order {
    fn from((quantity, price): (f64, f64)) -> Self {
        Self::new(quantity, price)
    }
}

impl From<Order> for (f64, f64) {
    fn from(order: Order) -> Self {
        (order.quantity, order.price)
    }
}

impl fmt::Display for Order {
    /// Quantity to 4 decimal places, price to 2.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {:.2}", self.quantity, self.price)
    }
}

/// Payload handed to the submission collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Side the order is posted on.
    pub side: Side,
    /// Order quantity.
    pub quantity: f64,
    /// Order price.
    pub price: f64,
}

impl OrderRequest {
    /// The order carried by this request.
    #[must_use]
    pub fn order(&self) -> Order {
        Order::new(self.quantity, self.price)
    }
}
