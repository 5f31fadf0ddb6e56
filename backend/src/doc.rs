//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every endpoint from the inbound layer, the shared domain
//! schemas, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Identity, Record};
use crate::inbound::http::records::{
    LoginRequest, RecordDraftRequest, RecordPageResponse, ReloadResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Spectrum registry API",
        description = "Session-authenticated personnel registry: login gate plus record CRUD with search, filtering, and paging."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::records::login,
        crate::inbound::http::records::logout,
        crate::inbound::http::records::current_session,
        crate::inbound::http::records::list_records,
        crate::inbound::http::records::get_record,
        crate::inbound::http::records::create_record,
        crate::inbound::http::records::update_record,
        crate::inbound::http::records::delete_record,
        crate::inbound::http::records::reload_registry,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Record,
        Identity,
        Error,
        ErrorCode,
        LoginRequest,
        RecordDraftRequest,
        RecordPageResponse,
        ReloadResponse,
    )),
    tags(
        (name = "auth", description = "Login, logout, and session restore"),
        (name = "records", description = "Registry listing and record lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
