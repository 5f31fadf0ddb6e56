//! Registry service: the in-memory working set and every user-facing
//! operation on it.
//!
//! The service implements the driving ports ([`RegistryQuery`],
//! [`RegistryCommand`], [`LoginService`]) over two driven ports: the remote
//! record store and the local fallback snapshot. Searching, filtering, and
//! paging are pure in-memory operations; only mutations and refreshes talk
//! to the store, and the working set changes only after a store call has
//! succeeded.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::warn;

use crate::domain::credentials::{Identity, LoginCredentials, Password};
use crate::domain::error::Error;
use crate::domain::ports::{
    DesignationFilter, FallbackCache, LoginService, PageQuery, RecordPage, RecordStore,
    RecordStoreError, RefreshOutcome, RegistryCommand, RegistryQuery,
};
use crate::domain::record::{NewRecord, Record, RecordDraft, RecordId, RecordPatch};
use crate::domain::sentinel::{self, SENTINEL_ID, SENTINEL_MOBILE, SENTINEL_PASSWORD};

/// Fallback page size when the service is configured with zero.
const MIN_PAGE_SIZE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewState {
    search: String,
    designation: DesignationFilter,
    page: u32,
    page_size: u32,
}

#[derive(Debug)]
struct WorkingSet {
    /// All records currently held, sentinel always first.
    records: Vec<Record>,
    /// Whether the set came from the fallback snapshot.
    degraded: bool,
    view: ViewState,
}

/// Registry service owning the working set and its view state.
///
/// One instance serves the whole (single-tenant) application; the write
/// lock serialises mutating operations so at most one store mutation is in
/// flight per user action.
pub struct RegistryService<S, C> {
    store: Arc<S>,
    cache: Arc<C>,
    state: RwLock<WorkingSet>,
}

impl<S, C> RegistryService<S, C> {
    /// Create a service over a record store and fallback cache.
    ///
    /// The working set starts as just the sentinel; call
    /// [`RegistryCommand::refresh`] to populate it from the store.
    #[must_use]
    pub fn new(store: Arc<S>, cache: Arc<C>, default_page_size: u32) -> Self {
        Self {
            store,
            cache,
            state: RwLock::new(WorkingSet {
                records: vec![sentinel::sentinel_record()],
                degraded: false,
                view: ViewState {
                    search: String::new(),
                    designation: DesignationFilter::All,
                    page: 1,
                    page_size: default_page_size.max(MIN_PAGE_SIZE),
                },
            }),
        }
    }
}

impl<S, C> RegistryService<S, C>
where
    S: RecordStore,
    C: FallbackCache,
{
    fn map_store_error(error: RecordStoreError) -> Error {
        match error {
            RecordStoreError::Unavailable { message } => {
                Error::service_unavailable(format!("record store unreachable: {message}"))
            }
            RecordStoreError::NotFound { id } => {
                Error::not_found(format!("record {id} does not exist"))
            }
            RecordStoreError::Query { message } => {
                Error::internal(format!("record store request failed: {message}"))
            }
        }
    }

    fn duplicate_mobile_error() -> Error {
        Error::invalid_request("this mobile number is already associated with an account")
            .with_details(json!({ "field": "mobileNumber", "code": "duplicate_mobile" }))
    }

    /// Prepend the sentinel, dropping any stored duplicate of its id.
    fn with_sentinel(records: Vec<Record>) -> Vec<Record> {
        let mut set = vec![sentinel::sentinel_record()];
        set.extend(
            records
                .into_iter()
                .filter(|record| !sentinel::is_sentinel(record.id())),
        );
        set
    }

    fn matches_view(record: &Record, needle: &str, designation: &DesignationFilter) -> bool {
        if !designation.matches(record.designation()) {
            return false;
        }
        if needle.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {}",
            record.full_name(),
            record.mobile_number(),
            record.id()
        )
        .to_lowercase();
        haystack.contains(needle)
    }

    fn filtered(records: &[Record], view: &ViewState) -> Vec<Record> {
        let needle = view.search.to_lowercase();
        records
            .iter()
            .filter(|record| Self::matches_view(record, &needle, &view.designation))
            .cloned()
            .collect()
    }

    /// Keep the current page inside the filtered sequence after a removal.
    fn clamp_view_page(set: &mut WorkingSet) {
        let filtered_len = Self::filtered(&set.records, &set.view).len();
        let page_count =
            u32::try_from(filtered_len.div_ceil(set.view.page_size as usize)).unwrap_or(u32::MAX);
        set.view.page = set.view.page.min(page_count.max(1));
    }

    fn remove_from_working_set(set: &mut WorkingSet, id: &RecordId) {
        set.records.retain(|record| record.id() != id);
        Self::clamp_view_page(set);
    }

    /// Reject a draft whose mobile number is already taken.
    ///
    /// The working set is consulted first so an obvious duplicate never
    /// even reaches the store; the store probe then catches records written
    /// by other sessions. The probe and the subsequent write are separate
    /// requests, so a concurrent create can still race in between.
    async fn ensure_unique_mobile(
        &self,
        records: &[Record],
        draft: &RecordDraft,
        target: Option<&RecordId>,
    ) -> Result<(), Error> {
        let editing_sentinel = target.is_some_and(|id| sentinel::is_sentinel(id));
        if !editing_sentinel && draft.mobile_number.as_ref() == SENTINEL_MOBILE {
            return Err(Self::duplicate_mobile_error());
        }

        let taken_locally = records.iter().any(|record| {
            record.mobile_number() == &draft.mobile_number
                && target.is_none_or(|id| record.id() != id)
        });
        if taken_locally {
            return Err(Self::duplicate_mobile_error());
        }

        let taken_remotely = self
            .store
            .mobile_number_exists(&draft.mobile_number, target.cloned())
            .await
            .map_err(Self::map_store_error)?;
        if taken_remotely {
            return Err(Self::duplicate_mobile_error());
        }
        Ok(())
    }

    async fn create_record(
        &self,
        set: &mut RwLockWriteGuard<'_, WorkingSet>,
        draft: RecordDraft,
    ) -> Result<Record, Error> {
        let password = Password::derive(&draft.designation, &draft.mobile_number);
        let new_record = NewRecord {
            draft: draft.clone(),
            password: password.clone(),
        };
        let id = self
            .store
            .create(&new_record)
            .await
            .map_err(Self::map_store_error)?;

        // The store stamps the authoritative creation time; this local copy
        // holds the next refresh's value closely enough for display.
        let record = Record::new(id, draft, password, chrono::Utc::now());
        let insert_at = set.records.len().min(1);
        set.records.insert(insert_at, record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        set: &mut RwLockWriteGuard<'_, WorkingSet>,
        id: RecordId,
        draft: RecordDraft,
    ) -> Result<Record, Error> {
        let Some(existing) = set.records.iter().find(|record| record.id() == &id).cloned() else {
            return Err(Error::not_found(format!("record {id} does not exist")));
        };

        let credentials_changed = existing.mobile_number() != &draft.mobile_number
            || existing.designation() != &draft.designation;
        let password = if credentials_changed {
            Password::derive(&draft.designation, &draft.mobile_number)
        } else {
            existing.password().clone()
        };

        if sentinel::is_sentinel(&id) {
            // The sentinel is never persisted; its edits live in memory only.
            let updated = Record::new(id, draft, password, existing.created_at());
            Self::replace_in_working_set(set, updated.clone());
            return Ok(updated);
        }

        let mut patch = RecordPatch::from_draft(draft.clone());
        if credentials_changed {
            patch = patch.with_password(password.clone());
        }
        if let Err(error) = self.store.update(&id, &patch).await {
            if matches!(error, RecordStoreError::NotFound { .. }) {
                Self::remove_from_working_set(set, &id);
            }
            return Err(Self::map_store_error(error));
        }

        let updated = Record::new(id, draft, password, existing.created_at());
        Self::replace_in_working_set(set, updated.clone());
        Ok(updated)
    }

    fn replace_in_working_set(set: &mut WorkingSet, updated: Record) {
        for record in &mut set.records {
            if record.id() == updated.id() {
                *record = updated;
                return;
            }
        }
    }
}

#[async_trait]
impl<S, C> RegistryQuery for RegistryService<S, C>
where
    S: RecordStore,
    C: FallbackCache,
{
    async fn page(&self, query: PageQuery) -> Result<RecordPage, Error> {
        let mut set = self.state.write().await;

        let mut filter_changed = false;
        if let Some(search) = query.search {
            if search != set.view.search {
                set.view.search = search;
                filter_changed = true;
            }
        }
        if let Some(designation) = query.designation {
            if designation != set.view.designation {
                set.view.designation = designation;
                filter_changed = true;
            }
        }
        if let Some(page_size) = query.page_size {
            set.view.page_size = page_size.max(MIN_PAGE_SIZE);
        }
        if filter_changed {
            set.view.page = 1;
        } else if let Some(page) = query.page {
            set.view.page = page.max(1);
        }

        let matching = Self::filtered(&set.records, &set.view);
        let request = PageRequest::new(set.view.page, set.view.page_size)
            .map_err(|error| Error::internal(format!("invalid page request: {error}")))?;
        let sliced = Page::slice(&matching, request);
        set.view.page = sliced.page;

        Ok(RecordPage {
            records: sliced.items,
            page: sliced.page,
            page_size: sliced.page_size,
            total: sliced.total,
            page_count: sliced.page_count,
            degraded: set.degraded,
        })
    }

    async fn record(&self, id: &RecordId) -> Result<Option<Record>, Error> {
        let set = self.state.read().await;
        Ok(set.records.iter().find(|record| record.id() == id).cloned())
    }
}

#[async_trait]
impl<S, C> RegistryCommand for RegistryService<S, C>
where
    S: RecordStore,
    C: FallbackCache,
{
    async fn refresh(&self) -> Result<RefreshOutcome, Error> {
        let fetched = self.store.list_all().await;
        let mut set = self.state.write().await;
        match fetched {
            Ok(records) => {
                if let Err(error) = self.cache.store(&records) {
                    warn!(error = %error, "failed to persist fallback snapshot");
                }
                set.records = Self::with_sentinel(records);
                set.degraded = false;
            }
            Err(error) => {
                warn!(error = %error, "record store fetch failed; serving fallback snapshot");
                let cached = match self.cache.load() {
                    Ok(Some(records)) => records,
                    Ok(None) => Vec::new(),
                    Err(cache_error) => {
                        warn!(error = %cache_error, "fallback snapshot unavailable");
                        Vec::new()
                    }
                };
                set.records = Self::with_sentinel(cached);
                set.degraded = true;
            }
        }
        set.view.page = 1;
        Ok(RefreshOutcome {
            total: set.records.len(),
            degraded: set.degraded,
        })
    }

    async fn save(&self, draft: RecordDraft, target: Option<RecordId>) -> Result<Record, Error> {
        let mut set = self.state.write().await;
        self.ensure_unique_mobile(&set.records, &draft, target.as_ref())
            .await?;
        match target {
            None => self.create_record(&mut set, draft).await,
            Some(id) => self.update_record(&mut set, id, draft).await,
        }
    }

    async fn remove(&self, id: &RecordId, confirmed: bool) -> Result<(), Error> {
        if sentinel::is_sentinel(id) {
            return Err(Error::forbidden(
                "the system administrator record cannot be removed",
            ));
        }
        if !confirmed {
            return Err(
                Error::invalid_request("record removal requires confirmation")
                    .with_details(json!({ "code": "confirmation_required" })),
            );
        }

        let mut set = self.state.write().await;
        match self.store.delete(id).await {
            Ok(()) => {
                Self::remove_from_working_set(&mut set, id);
                Ok(())
            }
            Err(error @ RecordStoreError::NotFound { .. }) => {
                // Already gone remotely: reconcile locally, surface the miss.
                Self::remove_from_working_set(&mut set, id);
                Err(Self::map_store_error(error))
            }
            Err(error) => Err(Self::map_store_error(error)),
        }
    }
}

#[async_trait]
impl<S, C> LoginService for RegistryService<S, C>
where
    S: RecordStore,
    C: FallbackCache,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        if credentials.id().eq_ignore_ascii_case(SENTINEL_ID)
            && credentials.password() == SENTINEL_PASSWORD
        {
            return Ok(sentinel::sentinel_identity());
        }

        let set = self.state.read().await;
        set.records
            .iter()
            .find(|record| {
                record.id().as_ref() == credentials.id()
                    && record.password().as_ref() == credentials.password()
            })
            .map(|record| Identity {
                identifier: record.id().clone(),
                full_name: record.full_name().clone(),
                designation: record.designation().clone(),
            })
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
