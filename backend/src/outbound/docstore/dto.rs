//! Wire DTOs for the remote document collection.
//!
//! Stored documents share the record's JSON shape, so reads decode straight
//! into [`Record`] (attaching the backend-assigned `id` field on the way
//! in). Write payloads are separate shapes: creation stamps `createdAt`
//! here in the adapter, and patches omit the password unless a save
//! re-derived it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::record::{NewRecord, Record, RecordPatch};

/// Envelope returned by collection reads.
#[derive(Debug, Deserialize)]
pub(super) struct DocumentListDto {
    pub(super) documents: Vec<Record>,
}

/// Envelope returned by equality probes; only identifiers are needed.
#[derive(Debug, Deserialize)]
pub(super) struct ProbeListDto {
    pub(super) documents: Vec<DocumentIdDto>,
}

/// Identifier of one stored document.
#[derive(Debug, Deserialize)]
pub(super) struct DocumentIdDto {
    pub(super) id: String,
}

/// Response body for a successful create.
#[derive(Debug, Deserialize)]
pub(super) struct CreatedDto {
    pub(super) id: String,
}

/// Body for creating a document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewDocumentDto {
    full_name: String,
    gender: String,
    mobile_number: String,
    designation: String,
    district: String,
    status: String,
    bio: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl NewDocumentDto {
    /// Assemble the create payload, stamping the creation time.
    pub(super) fn from_new(record: &NewRecord, created_at: DateTime<Utc>) -> Self {
        let draft = &record.draft;
        Self {
            full_name: draft.full_name.as_ref().to_owned(),
            gender: draft.gender.label().to_owned(),
            mobile_number: draft.mobile_number.as_ref().to_owned(),
            designation: draft.designation.label().to_owned(),
            district: draft.district.label().to_owned(),
            status: draft.status.label().to_owned(),
            bio: draft.bio.clone(),
            password: record.password.as_ref().to_owned(),
            created_at,
        }
    }
}

/// Field-merge body for updating a document.
///
/// `createdAt` never appears here; an absent password leaves the stored one
/// untouched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PatchDocumentDto {
    full_name: String,
    gender: String,
    mobile_number: String,
    designation: String,
    district: String,
    status: String,
    bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl From<&RecordPatch> for PatchDocumentDto {
    fn from(patch: &RecordPatch) -> Self {
        let draft = &patch.draft;
        Self {
            full_name: draft.full_name.as_ref().to_owned(),
            gender: draft.gender.label().to_owned(),
            mobile_number: draft.mobile_number.as_ref().to_owned(),
            designation: draft.designation.label().to_owned(),
            district: draft.district.label().to_owned(),
            status: draft.status.label().to_owned(),
            bio: draft.bio.clone(),
            password: patch
                .password
                .as_ref()
                .map(|password| password.as_ref().to_owned()),
        }
    }
}
