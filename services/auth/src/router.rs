use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use otpgate_core::health::healthz;
use otpgate_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{mobile_auth, verify_otp},
    health::readyz,
    task::{create_task, list_tasks},
    user::update_me,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Mobile OTP auth
        .route("/auth/mobile", post(mobile_auth))
        .route("/auth/otp/verify", post(verify_otp))
        // Profile
        .route("/users/@me", patch(update_me))
        // Tasks
        .route("/tasks", post(create_task).get(list_tasks))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
