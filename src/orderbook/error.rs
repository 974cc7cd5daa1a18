/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::order::Side;
use thiserror::Error;

/// Errors raised by [`OrderStore`](super::OrderStore) mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A rollback was attempted on a side with nothing to remove.
    ///
    /// Only reachable through a caller bug: every rollback pairs with an
    /// earlier prepend.
    #[error("cannot remove first {0} order: sequence is empty")]
    EmptySequence(Side),
}
