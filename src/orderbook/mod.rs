/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Order book data model and the in-memory store that owns it.

pub mod error;
pub mod order;
pub mod store;

pub use error::StoreError;
pub use order::{Order, OrderRequest, Side};
pub use store::{OrderBookSnapshot, OrderStore};
