//! Port abstraction for the local fallback snapshot.
//!
//! A best-effort, locally persisted copy of the last record list the store
//! returned. It is read only when the remote store is unreachable and is
//! never reconciled with remote deletes or updates once loaded; it is a
//! degraded-mode convenience, not a replica.

use super::macros::port_error;
use crate::domain::record::Record;

port_error! {
    /// Failures raised by fallback cache adapters.
    pub enum FallbackCacheError {
        /// The snapshot could not be read or written.
        Io {
            /// Human-readable description of the underlying I/O failure.
            message: String,
        } => "fallback cache unavailable: {message}",
    }
}

/// Driven port for the last-known record snapshot.
///
/// Snapshots are small (one admin tool's record list) and accessed rarely,
/// so the port is synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait FallbackCache: Send + Sync {
    /// Load the last stored snapshot, `None` when absent or unreadable.
    fn load(&self) -> Result<Option<Vec<Record>>, FallbackCacheError>;

    /// Replace the stored snapshot.
    fn store(&self, records: &[Record]) -> Result<(), FallbackCacheError>;
}
