//! HTTP adapter for the remote document collection.

mod dto;
mod http_store;

pub use http_store::HttpRecordStore;
