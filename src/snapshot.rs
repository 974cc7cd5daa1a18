/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Initial snapshot sources.
//!
//! The snapshot is fetched once at startup and handed to
//! [`ReconcilerHandle::apply_snapshot`](crate::reconciler::ReconcilerHandle::apply_snapshot).
//! Fetch failures are the caller's to handle.

use crate::orderbook::OrderBookSnapshot;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors raised while fetching a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot could not be read.
    #[error("failed to read snapshot from {}: {}", path.display(), source)]
    Io {
        /// Where the read was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a valid snapshot.
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a JSON snapshot of the form `{"buy": [[q, p], ...], "sell": [...]}`.
///
/// Missing sides are empty.
///
/// # Errors
///
/// [`SnapshotError::Parse`] if the JSON does not match that shape.
pub fn parse_snapshot(json: &str) -> Result<OrderBookSnapshot, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// Asynchronous provider of the initial book.
pub trait SnapshotSource {
    /// Fetches the snapshot.
    fn fetch(&self) -> impl Future<Output = Result<OrderBookSnapshot, SnapshotError>> + Send;
}

/// Reads the snapshot from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn fetch(&self) -> impl Future<Output = Result<OrderBookSnapshot, SnapshotError>> + Send {
        let path = self.path.clone();
        async move {
            let json = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| SnapshotError::Io {
                    path: path.clone(),
                    source,
                })?;
            let snapshot = parse_snapshot(&json)?;
            debug!(
                path = %path.display(),
                buy = snapshot.buy.len(),
                sell = snapshot.sell.len(),
                "snapshot read"
            );
            Ok(snapshot)
        }
    }
}

/// Serves a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshotSource {
    snapshot: OrderBookSnapshot,
}

impl StaticSnapshotSource {
    /// Creates a source that always returns `snapshot`.
    #[must_use]
    pub fn new(snapshot: OrderBookSnapshot) -> Self {
        Self { snapshot }
    }
}

impl SnapshotSource for StaticSnapshotSource {
    fn fetch(&self) -> impl Future<Output = Result<OrderBookSnapshot, SnapshotError>> + Send {
        let snapshot = self.snapshot.clone();
        async move { Ok(snapshot) }
    }
}
