//! Registry API handlers.
//!
//! ```text
//! POST /api/v1/login {"id":"admin","password":"password123"}
//! POST /api/v1/logout
//! GET  /api/v1/session
//! GET  /api/v1/records?search=asha&designation=Counsellor&page=2&pageSize=12
//! POST /api/v1/records
//! PUT  /api/v1/records/{id}
//! DELETE /api/v1/records/{id}?confirm=true
//! POST /api/v1/registry/reload
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{DesignationFilter, PageQuery};
use crate::domain::record::{
    Designation, District, FullName, Gender, MobileNumber, Record, RecordDraft, RecordId,
    RecordStatus,
};
use crate::domain::{Error, Identity, LoginCredentials, LoginValidationError};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_login_validation_error, map_record_validation_error};
use crate::inbound::http::ApiResult;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON: `{"id":"admin","password":"password123"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Record identifier, or the reserved super-user id.
    pub id: String,
    /// Plain-text password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.id, &value.password)
    }
}

/// Editable record fields for `POST /api/v1/records` and
/// `PUT /api/v1/records/{id}`.
///
/// Enum-valued fields carry their display labels (`"Counsellor"`,
/// `"Chennai, Tamil Nadu"`, and so on); password and creation stamp are derived
/// server-side and rejected if supplied.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct RecordDraftRequest {
    /// Person's full name.
    pub full_name: String,
    /// Gender label.
    pub gender: String,
    /// Ten-digit mobile number.
    pub mobile_number: String,
    /// Designation label.
    pub designation: String,
    /// District label.
    pub district: String,
    /// Status label.
    pub status: String,
    /// Free-text background; defaults to empty.
    #[serde(default)]
    pub bio: String,
}

impl TryFrom<RecordDraftRequest> for RecordDraft {
    type Error = Error;

    fn try_from(value: RecordDraftRequest) -> Result<Self, Self::Error> {
        let RecordDraftRequest {
            full_name,
            gender,
            mobile_number,
            designation,
            district,
            status,
            bio,
        } = value;
        Ok(Self {
            full_name: FullName::new(full_name).map_err(map_record_validation_error)?,
            gender: Gender::try_from(gender).map_err(map_record_validation_error)?,
            mobile_number: MobileNumber::new(mobile_number)
                .map_err(map_record_validation_error)?,
            designation: Designation::from(designation),
            district: District::try_from(district).map_err(map_record_validation_error)?,
            status: RecordStatus::try_from(status).map_err(map_record_validation_error)?,
            bio,
        })
    }
}

/// Query parameters for `GET /api/v1/records`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RecordListQuery {
    /// Case-insensitive substring over name, mobile number, and identifier.
    pub search: Option<String>,
    /// Designation label, or `All` to clear the filter.
    pub designation: Option<String>,
    /// One-based page number.
    pub page: Option<u32>,
    /// Page size; server default when absent.
    pub page_size: Option<u32>,
}

/// One page of the registry, as served to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPageResponse {
    /// Records on the served page.
    pub records: Vec<Record>,
    /// One-based page number actually served.
    pub page: u32,
    /// Page size used for slicing.
    pub page_size: u32,
    /// Filtered record count.
    pub total: u64,
    /// Number of pages in the filtered sequence.
    pub page_count: u32,
    /// True when the list came from the offline fallback snapshot.
    pub degraded: bool,
}

/// Query parameters for `DELETE /api/v1/records/{id}`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteQuery {
    /// Explicit confirmation signal; removal is refused without it.
    pub confirm: Option<bool>,
}

/// Response body for `POST /api/v1/registry/reload`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    /// Number of records now in the working set (sentinel included).
    pub total: u64,
    /// True when the reload fell back to the cached snapshot.
    pub degraded: bool,
}

fn parse_record_id(raw: String) -> ApiResult<RecordId> {
    RecordId::new(raw).map_err(map_record_validation_error)
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = Identity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Identity>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let identity = state.login.authenticate(&credentials).await?;
    session.persist_identity(&identity)?;
    Ok(web::Json(identity))
}

/// Clear the session, ending the login.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Restore the identity saved in the session cookie.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Authenticated identity", body = Identity),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<Identity>> {
    Ok(web::Json(session.require_identity()?))
}

/// List, search, filter, and page the registry.
#[utoipa::path(
    get,
    path = "/api/v1/records",
    params(RecordListQuery),
    responses(
        (status = 200, description = "One page of records", body = RecordPageResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["records"],
    operation_id = "listRecords"
)]
#[get("/records")]
pub async fn list_records(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RecordListQuery>,
) -> ApiResult<web::Json<RecordPageResponse>> {
    session.require_identity()?;
    let RecordListQuery {
        search,
        designation,
        page,
        page_size,
    } = query.into_inner();
    let page = state
        .registry
        .page(PageQuery {
            search,
            designation: designation.map(DesignationFilter::from_label),
            page,
            page_size,
        })
        .await?;
    Ok(web::Json(RecordPageResponse {
        records: page.records,
        page: page.page,
        page_size: page.page_size,
        total: page.total,
        page_count: page.page_count,
        degraded: page.degraded,
    }))
}

/// Fetch one record for the detail view.
#[utoipa::path(
    get,
    path = "/api/v1/records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The record", body = Record),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such record", body = Error)
    ),
    tags = ["records"],
    operation_id = "getRecord"
)]
#[get("/records/{id}")]
pub async fn get_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Record>> {
    session.require_identity()?;
    let id = parse_record_id(path.into_inner())?;
    let record = state
        .registry
        .record(&id)
        .await?
        .ok_or_else(|| Error::not_found(format!("record {id} does not exist")))?;
    Ok(web::Json(record))
}

/// Register a new record.
#[utoipa::path(
    post,
    path = "/api/v1/records",
    request_body = RecordDraftRequest,
    responses(
        (status = 201, description = "Created record", body = Record),
        (status = 400, description = "Validation failure", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Record store unreachable", body = Error)
    ),
    tags = ["records"],
    operation_id = "createRecord"
)]
#[post("/records")]
pub async fn create_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecordDraftRequest>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    let draft = RecordDraft::try_from(payload.into_inner())?;
    let record = state.registry_command.save(draft, None).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Update an existing record.
#[utoipa::path(
    put,
    path = "/api/v1/records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = RecordDraftRequest,
    responses(
        (status = 200, description = "Updated record", body = Record),
        (status = 400, description = "Validation failure", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 503, description = "Record store unreachable", body = Error)
    ),
    tags = ["records"],
    operation_id = "updateRecord"
)]
#[put("/records/{id}")]
pub async fn update_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RecordDraftRequest>,
) -> ApiResult<web::Json<Record>> {
    session.require_identity()?;
    let id = parse_record_id(path.into_inner())?;
    let draft = RecordDraft::try_from(payload.into_inner())?;
    let record = state.registry_command.save(draft, Some(id)).await?;
    Ok(web::Json(record))
}

/// Delete a record after an explicit confirmation.
#[utoipa::path(
    delete,
    path = "/api/v1/records/{id}",
    params(("id" = String, Path, description = "Record identifier"), DeleteQuery),
    responses(
        (status = 204, description = "Record removed"),
        (status = 400, description = "Confirmation missing", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Sentinel records cannot be removed", body = Error),
        (status = 404, description = "Record already absent", body = Error),
        (status = 503, description = "Record store unreachable", body = Error)
    ),
    tags = ["records"],
    operation_id = "deleteRecord"
)]
#[delete("/records/{id}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    let id = parse_record_id(path.into_inner())?;
    let confirmed = query.confirm.unwrap_or(false);
    state.registry_command.remove(&id, confirmed).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Re-fetch the working set from the record store.
#[utoipa::path(
    post,
    path = "/api/v1/registry/reload",
    responses(
        (status = 200, description = "Reload outcome", body = ReloadResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["records"],
    operation_id = "reloadRegistry"
)]
#[post("/registry/reload")]
pub async fn reload_registry(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ReloadResponse>> {
    session.require_identity()?;
    let outcome = state.registry_command.refresh().await?;
    Ok(web::Json(ReloadResponse {
        total: u64::try_from(outcome.total).unwrap_or(u64::MAX),
        degraded: outcome.degraded,
    }))
}

#[cfg(test)]
mod tests;
