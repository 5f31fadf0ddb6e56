//! Driving ports for the registry's user-facing operations.
//!
//! Inbound adapters talk to the working set exclusively through these
//! use-case traits, keeping handlers free of service internals and making
//! handler tests deterministic.

use async_trait::async_trait;

use crate::domain::record::{Designation, Record, RecordDraft, RecordId};
use crate::domain::Error;

/// Designation filter applied to the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignationFilter {
    /// No filtering; every designation matches.
    All,
    /// Exact match on one designation label.
    Only(Designation),
}

impl DesignationFilter {
    /// Build a filter from a query parameter value.
    ///
    /// The literal `All` selects no filtering; anything else is an
    /// exact-match label.
    #[must_use]
    pub fn from_label(label: String) -> Self {
        if label == "All" {
            Self::All
        } else {
            Self::Only(Designation::from(label))
        }
    }

    /// Whether a designation passes the filter.
    #[must_use]
    pub fn matches(&self, designation: &Designation) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == designation,
        }
    }
}

/// Desired view over the working set for one listing call.
///
/// Absent fields keep their previous view value; `page_size` falls back to
/// the service default. Changing the search term or the designation filter
/// resets the page to 1 no matter what page was requested.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageQuery {
    /// Case-insensitive substring matched against name, mobile number, and
    /// identifier. Empty matches everything; `None` keeps the previous
    /// term.
    pub search: Option<String>,
    /// Designation filter; `None` keeps the previous filter.
    pub designation: Option<DesignationFilter>,
    /// Requested one-based page number; `None` keeps the current page.
    pub page: Option<u32>,
    /// Requested page size; `None` uses the service default.
    pub page_size: Option<u32>,
}

/// One page of the filtered working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage {
    /// Records on the served page.
    pub records: Vec<Record>,
    /// One-based page number actually served.
    pub page: u32,
    /// Page size used for slicing.
    pub page_size: u32,
    /// Filtered record count across all pages.
    pub total: u64,
    /// Number of pages in the filtered sequence.
    pub page_count: u32,
    /// Whether the working set came from the local fallback snapshot
    /// because the store was unreachable.
    pub degraded: bool,
}

/// Result of refreshing the working set from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Number of records in the refreshed working set (sentinel included).
    pub total: usize,
    /// Whether the refresh fell back to the cached snapshot.
    pub degraded: bool,
}

/// Domain use-case port for reading the working set.
#[async_trait]
pub trait RegistryQuery: Send + Sync {
    /// Serve one page of the filtered working set, updating the view state.
    async fn page(&self, query: PageQuery) -> Result<RecordPage, Error>;

    /// Fetch a single record from the working set.
    async fn record(&self, id: &RecordId) -> Result<Option<Record>, Error>;
}

/// Domain use-case port for mutating the working set.
#[async_trait]
pub trait RegistryCommand: Send + Sync {
    /// Re-fetch the working set from the store, falling back to the cached
    /// snapshot when the store is unreachable.
    async fn refresh(&self) -> Result<RefreshOutcome, Error>;

    /// Create (`target` absent) or update (`target` present) a record.
    /// Returns the record as now held in the working set.
    async fn save(&self, draft: RecordDraft, target: Option<RecordId>) -> Result<Record, Error>;

    /// Delete a record. Refused for the sentinel; requires the caller's
    /// explicit confirmation signal.
    async fn remove(&self, id: &RecordId, confirmed: bool) -> Result<(), Error>;
}
