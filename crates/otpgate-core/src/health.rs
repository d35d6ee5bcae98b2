use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness only.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
