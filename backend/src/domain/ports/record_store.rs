//! Port abstraction for the remote record collection.
//!
//! The backing service is a remote document store reached over the network.
//! This port captures the only contract the registry relies on: documents
//! keyed by a backend-assigned identifier, field-level merge on update,
//! equality queries, and ordering by a stored field.

use async_trait::async_trait;

use super::macros::port_error;
use crate::domain::record::{MobileNumber, NewRecord, Record, RecordId, RecordPatch};

port_error! {
    /// Persistence errors raised by record store adapters.
    pub enum RecordStoreError {
        /// The store could not be reached at all. Reads should fall back to
        /// the last cached snapshot; writes abort.
        Unavailable {
            /// Human-readable description of why the store was unreachable.
            message: String,
        } => "record store unreachable: {message}",
        /// The targeted document does not exist.
        NotFound {
            /// Identifier of the record that was not found.
            id: String,
        } => "record {id} does not exist in the store",
        /// The store answered but the request or its payload failed.
        Query {
            /// Human-readable description of the request or payload failure.
            message: String,
        } => "record store request failed: {message}",
    }
}

/// Driven port for durable record storage.
///
/// No transaction spans two calls: in particular a
/// [`mobile_number_exists`](RecordStore::mobile_number_exists) probe and a
/// subsequent write are independent requests, so a concurrent create can
/// slip between them. That race is an accepted property of the system, not
/// something adapters should try to paper over.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every stored record, ordered by creation time, newest first.
    async fn list_all(&self) -> Result<Vec<Record>, RecordStoreError>;

    /// Persist a new document. The adapter stamps the creation time at this
    /// call and the backend assigns and returns the identifier.
    async fn create(&self, record: &NewRecord) -> Result<RecordId, RecordStoreError>;

    /// Merge the patch fields into an existing document.
    async fn update(&self, id: &RecordId, patch: &RecordPatch) -> Result<(), RecordStoreError>;

    /// Remove a document. Deleting an already-absent document reports
    /// [`RecordStoreError::NotFound`]; callers treat that as already
    /// deleted while still surfacing it.
    async fn delete(&self, id: &RecordId) -> Result<(), RecordStoreError>;

    /// Whether any stored record other than `exclude` already uses the
    /// mobile number.
    async fn mobile_number_exists(
        &self,
        mobile_number: &MobileNumber,
        exclude: Option<RecordId>,
    ) -> Result<bool, RecordStoreError>;
}
