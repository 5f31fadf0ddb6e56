//! Regression coverage for the registry API handlers.

use std::sync::Arc;

use actix_web::{test as actix_test, web, App};
use rstest::rstest;
use serde_json::{json, Value};

use super::*;
use crate::domain::ports::{MockFallbackCache, MockRecordStore, RecordStoreError};
use crate::domain::RegistryService;

fn lenient_cache() -> MockFallbackCache {
    let mut cache = MockFallbackCache::new();
    cache.expect_store().returning(|_| Ok(()));
    cache.expect_load().returning(|| Ok(None));
    cache
}

fn state_for(store: MockRecordStore) -> web::Data<HttpState> {
    let service = Arc::new(RegistryService::new(
        Arc::new(store),
        Arc::new(lenient_cache()),
        12,
    ));
    web::Data::new(HttpState::new(service.clone(), service.clone(), service))
}

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(logout)
                .service(current_session)
                .service(list_records)
                .service(get_record)
                .service(create_record)
                .service(update_record)
                .service(delete_record)
                .service(reload_registry),
        )
}

fn draft_body() -> Value {
    json!({
        "fullName": "Asha Verma",
        "gender": "Female",
        "mobileNumber": "9876543210",
        "designation": "Counsellor",
        "district": "Chennai, Tamil Nadu",
        "status": "Active",
        "bio": "Counsellor for the southern hub."
    })
}

fn login_body() -> LoginRequest {
    LoginRequest {
        id: "admin".into(),
        password: "password123".into(),
    }
}

#[rstest]
#[case("   ", "password123", "id", "empty_id")]
#[case("admin", "", "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_fields_with_field_details(
    #[case] id: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(state_for(MockRecordStore::new()))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            id: id.into(),
            password: password.into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    let details = body.get("details").and_then(Value::as_object).expect("details");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_with_unauthorised_status() {
    let app = actix_test::init_service(test_app(state_for(MockRecordStore::new()))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            id: "admin".into(),
            password: "wrong-password".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("unauthorized")
    );
}

#[actix_web::test]
async fn login_restores_and_clears_the_session() {
    let app = actix_test::init_service(test_app(state_for(MockRecordStore::new()))).await;

    let login_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&login_body())
            .to_request(),
    )
    .await;
    assert!(login_res.status().is_success());
    let identity: Value = {
        let cookie = login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();

        let session_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/session")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert!(session_res.status().is_success());

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(
            logout_res.status(),
            actix_web::http::StatusCode::NO_CONTENT
        );
        let cleared = logout_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie rewritten")
            .into_owned();

        let after_logout = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/session")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(
            after_logout.status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );

        let restore_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        actix_test::read_body_json(restore_res).await
    };
    assert_eq!(
        identity.get("identifier").and_then(Value::as_str),
        Some("admin")
    );
    assert_eq!(
        identity.get("designation").and_then(Value::as_str),
        Some("National Admin")
    );
}

#[rstest]
#[case("get", "/api/v1/records")]
#[case("post", "/api/v1/records")]
#[case("post", "/api/v1/registry/reload")]
#[actix_web::test]
async fn registry_routes_require_a_session(#[case] method: &str, #[case] uri: &str) {
    let app = actix_test::init_service(test_app(state_for(MockRecordStore::new()))).await;

    let request = match method {
        "get" => actix_test::TestRequest::get().uri(uri),
        _ => actix_test::TestRequest::post().uri(uri).set_json(&draft_body()),
    }
    .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

async fn authenticated_cookie<S, B>(app: &S) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let login_res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&login_body())
            .to_request(),
    )
    .await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn listing_serves_the_sentinel_in_camel_case() {
    let app = actix_test::init_service(test_app(state_for(MockRecordStore::new()))).await;
    let cookie = authenticated_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/records")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("total"), Some(&json!(1)));
    assert_eq!(body.get("degraded"), Some(&json!(false)));
    let first = body
        .get("records")
        .and_then(Value::as_array)
        .and_then(|records| records.first())
        .expect("sentinel record");
    assert_eq!(
        first.get("fullName").and_then(Value::as_str),
        Some("System Administrator")
    );
    assert!(first.get("full_name").is_none());
}

#[rstest]
#[case(json!("123"), "invalid_mobile")]
#[case(json!("98765432a0"), "invalid_mobile")]
#[actix_web::test]
async fn create_rejects_a_bad_mobile_without_store_calls(
    #[case] mobile: Value,
    #[case] code: &str,
) {
    let mut store = MockRecordStore::new();
    store.expect_mobile_number_exists().times(0);
    store.expect_create().times(0);
    let app = actix_test::init_service(test_app(state_for(store))).await;
    let cookie = authenticated_cookie(&app).await;

    let mut body = draft_body();
    if let Some(slot) = body.get_mut("mobileNumber") {
        *slot = mobile;
    }
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/records")
            .cookie(cookie)
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let payload: Value = actix_test::read_body_json(response).await;
    let details = payload
        .get("details")
        .and_then(Value::as_object)
        .expect("details");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("mobileNumber"));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
}

#[actix_web::test]
async fn create_returns_the_stored_record() {
    let mut store = MockRecordStore::new();
    store
        .expect_mobile_number_exists()
        .times(1)
        .returning(|_, _| Ok(false));
    store
        .expect_create()
        .times(1)
        .returning(|_| Ok(RecordId::new("assigned-1").expect("id")));
    let app = actix_test::init_service(test_app(state_for(store))).await;
    let cookie = authenticated_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/records")
            .cookie(cookie)
            .set_json(&draft_body())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("id").and_then(Value::as_str), Some("assigned-1"));
    assert_eq!(body.get("password").and_then(Value::as_str), Some("CO210"));
}

#[actix_web::test]
async fn create_maps_store_outage_onto_service_unavailable() {
    let mut store = MockRecordStore::new();
    store
        .expect_mobile_number_exists()
        .times(1)
        .returning(|_, _| Ok(false));
    store
        .expect_create()
        .times(1)
        .returning(|_| Err(RecordStoreError::unavailable("connection refused")));
    let app = actix_test::init_service(test_app(state_for(store))).await;
    let cookie = authenticated_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/records")
            .cookie(cookie)
            .set_json(&draft_body())
            .to_request(),
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    );
}

#[actix_web::test]
async fn deleting_the_sentinel_is_forbidden() {
    let mut store = MockRecordStore::new();
    store.expect_delete().times(0);
    let app = actix_test::init_service(test_app(state_for(store))).await;
    let cookie = authenticated_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/records/admin?confirm=true")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn deletion_without_confirmation_is_rejected() {
    let mut store = MockRecordStore::new();
    store.expect_delete().times(0);
    let app = actix_test::init_service(test_app(state_for(store))).await;
    let cookie = authenticated_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/records/some-record")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    let details = body.get("details").and_then(Value::as_object).expect("details");
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("confirmation_required")
    );
}

#[actix_web::test]
async fn reload_reports_degraded_mode() {
    let mut store = MockRecordStore::new();
    store
        .expect_list_all()
        .times(1)
        .returning(|| Err(RecordStoreError::unavailable("offline")));
    let app = actix_test::init_service(test_app(state_for(store))).await;
    let cookie = authenticated_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registry/reload")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("degraded"), Some(&json!(true)));
    assert_eq!(body.get("total"), Some(&json!(1)));

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/records")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let listed: Value = actix_test::read_body_json(listing).await;
    assert_eq!(listed.get("degraded"), Some(&json!(true)));
}

#[actix_web::test]
async fn missing_records_are_not_found() {
    let app = actix_test::init_service(test_app(state_for(MockRecordStore::new()))).await;
    let cookie = authenticated_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/records/ghost")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
}
