//! Domain ports and supporting types for the hexagonal boundary.

mod macros;

mod fallback_cache;
mod login_service;
mod record_store;
mod registry;

#[cfg(test)]
pub use fallback_cache::MockFallbackCache;
pub use fallback_cache::{FallbackCache, FallbackCacheError};
pub use login_service::LoginService;
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::{RecordStore, RecordStoreError};
pub use registry::{
    DesignationFilter, PageQuery, RecordPage, RefreshOutcome, RegistryCommand, RegistryQuery,
};
