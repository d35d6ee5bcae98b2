use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use otpgate_auth::router::build_router;
use otpgate_auth::state::AppState;
use otpgate_auth::validation::{
    COUNTRY_CODE_MISSING, MOBILE_NUMBER_LENGTH, MOBILE_NUMBER_MISSING, OTP_DETAILS_MISSING,
    TITLE_MISSING,
};
use otpgate_testing::auth::MockAuth;

use crate::helpers::{TEST_JWT_SECRET, TEST_MOBILE};

// The database stays disconnected: every request here is answered before any query.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: 14400,
        otp_invalidate_previous: false,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn auth() -> MockAuth {
    MockAuth::new(Uuid::new_v4(), TEST_MOBILE)
}

#[tokio::test]
async fn should_answer_healthz() {
    server().get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    server()
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_echo_request_id() {
    let response = server().get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(id.to_str().unwrap().parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn should_list_missing_login_fields() {
    let response = server().post("/auth/mobile").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["errors"], json!([MOBILE_NUMBER_MISSING, COUNTRY_CODE_MISSING]));
}

#[tokio::test]
async fn should_reject_short_mobile_number() {
    let response = server()
        .post("/auth/mobile")
        .json(&json!({"mobile_number": "98765", "country_code": 91}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"], json!([MOBILE_NUMBER_LENGTH]));
}

#[tokio::test]
async fn should_require_otp_details_on_verify() {
    let response = server()
        .post("/auth/otp/verify")
        .json(&json!({"mobile_number": TEST_MOBILE, "country_code": 91}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"], json!([OTP_DETAILS_MISSING]));
}

#[tokio::test]
async fn should_reject_profile_update_without_bearer() {
    server()
        .patch("/users/@me")
        .json(&json!({"name": "Asha"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_profile_update_with_foreign_token() {
    let (name, value) = auth().header("some-other-secret");
    server()
        .patch("/users/@me")
        .add_header(name, value)
        .json(&json!({"name": "Asha"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_report_no_record_modified_for_empty_profile_update() {
    let (name, value) = auth().header(TEST_JWT_SECRET);
    let response = server()
        .patch("/users/@me")
        .add_header(name, value)
        .json(&json!({"email": ""}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "No record modified.");
}

#[tokio::test]
async fn should_reject_invalid_profile_gender() {
    let (name, value) = auth().header(TEST_JWT_SECRET);
    server()
        .patch("/users/@me")
        .add_header(name, value)
        .json(&json!({"gender": "unknown"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_require_bearer_for_tasks() {
    let server = server();
    server
        .get("/tasks")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/tasks")
        .json(&json!({"title": "x", "priority": "low"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_validate_task_body() {
    let (name, value) = auth().header(TEST_JWT_SECRET);
    let response = server()
        .post("/tasks")
        .add_header(name, value)
        .json(&json!({"priority": "low"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"], json!([TITLE_MISSING]));
}
