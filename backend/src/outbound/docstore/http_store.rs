//! Reqwest-backed record store adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into domain records. The
//! remote service is a plain JSON document collection:
//!
//! ```text
//! GET    {endpoint}collections/{name}/documents?orderBy=createdAt&direction=desc
//! POST   {endpoint}collections/{name}/documents          -> { "id": ... }
//! PATCH  {endpoint}collections/{name}/documents/{id}     (field merge)
//! DELETE {endpoint}collections/{name}/documents/{id}
//! GET    {endpoint}collections/{name}/documents?mobileNumber={m}
//! ```
//!
//! List responses carry each document's backend-assigned `id` inline, so
//! they decode straight into domain records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use reqwest::{Client, StatusCode};
use url::Url;

use super::dto::{CreatedDto, DocumentIdDto, DocumentListDto, NewDocumentDto, PatchDocumentDto, ProbeListDto};
use crate::domain::ports::{RecordStore, RecordStoreError};
use crate::domain::record::{MobileNumber, NewRecord, Record, RecordId, RecordPatch};

const USER_AGENT: &str = "spectrum-backend/0.1";

/// Record store adapter speaking JSON over HTTP to one collection.
pub struct HttpRecordStore {
    client: Client,
    endpoint: Url,
    collection: String,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl HttpRecordStore {
    /// Build an adapter with an explicit request timeout.
    ///
    /// `endpoint` is the service root; a missing trailing slash is added so
    /// relative joins cannot clobber its final path segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        collection: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Self::with_clock(endpoint, collection, timeout, Arc::new(DefaultClock))
    }

    /// Build an adapter with an injected clock for creation stamps.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_clock(
        endpoint: Url,
        collection: impl Into<String>,
        timeout: Duration,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: ensure_trailing_slash(endpoint),
            collection: collection.into(),
            clock,
        })
    }

    fn collection_url(&self) -> Result<Url, RecordStoreError> {
        self.endpoint
            .join(&format!("collections/{}/documents", self.collection))
            .map_err(|error| RecordStoreError::query(format!("invalid collection url: {error}")))
    }

    fn document_url(&self, id: &RecordId) -> Result<Url, RecordStoreError> {
        self.endpoint
            .join(&format!("collections/{}/documents/{id}", self.collection))
            .map_err(|error| RecordStoreError::query(format!("invalid document url: {error}")))
    }

    async fn read_success_body(
        response: reqwest::Response,
    ) -> Result<Vec<u8>, RecordStoreError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(map_status_error(status, body.as_ref()))
        }
    }
}

fn ensure_trailing_slash(mut endpoint: Url) -> Url {
    if !endpoint.path().ends_with('/') {
        let path = format!("{}/", endpoint.path());
        endpoint.set_path(&path);
    }
    endpoint
}

fn map_transport_error(error: reqwest::Error) -> RecordStoreError {
    if error.is_timeout() || error.is_connect() {
        RecordStoreError::unavailable(error.to_string())
    } else {
        RecordStoreError::query(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RecordStoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    if status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
    {
        RecordStoreError::unavailable(message)
    } else {
        RecordStoreError::query(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, RecordStoreError> {
    serde_json::from_slice(body)
        .map_err(|error| RecordStoreError::query(format!("invalid store payload: {error}")))
}

fn any_other_document(documents: &[DocumentIdDto], exclude: Option<&RecordId>) -> bool {
    documents
        .iter()
        .any(|document| exclude.is_none_or(|id| document.id != id.as_ref()))
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_all(&self) -> Result<Vec<Record>, RecordStoreError> {
        let url = self.collection_url()?;
        let response = self
            .client
            .get(url)
            .query(&[("orderBy", "createdAt"), ("direction", "desc")])
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = Self::read_success_body(response).await?;
        let decoded: DocumentListDto = decode(&body)?;
        Ok(decoded.documents)
    }

    async fn create(&self, record: &NewRecord) -> Result<RecordId, RecordStoreError> {
        let url = self.collection_url()?;
        let payload = NewDocumentDto::from_new(record, self.clock.utc());
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = Self::read_success_body(response).await?;
        let created: CreatedDto = decode(&body)?;
        RecordId::new(created.id)
            .map_err(|error| RecordStoreError::query(format!("invalid assigned id: {error}")))
    }

    async fn update(&self, id: &RecordId, patch: &RecordPatch) -> Result<(), RecordStoreError> {
        let url = self.document_url(id)?;
        let response = self
            .client
            .patch(url)
            .json(&PatchDocumentDto::from(patch))
            .send()
            .await
            .map_err(map_transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RecordStoreError::not_found(id.as_ref()));
        }
        Self::read_success_body(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordStoreError> {
        let url = self.document_url(id)?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RecordStoreError::not_found(id.as_ref()));
        }
        Self::read_success_body(response).await?;
        Ok(())
    }

    async fn mobile_number_exists(
        &self,
        mobile_number: &MobileNumber,
        exclude: Option<RecordId>,
    ) -> Result<bool, RecordStoreError> {
        let url = self.collection_url()?;
        let response = self
            .client
            .get(url)
            .query(&[("mobileNumber", mobile_number.as_ref())])
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = Self::read_success_body(response).await?;
        let decoded: ProbeListDto = decode(&body)?;
        Ok(any_other_document(&decoded.documents, exclude.as_ref()))
    }
}
