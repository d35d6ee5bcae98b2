use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AuthServiceError;
use crate::handlers::response::{UserResponse, envelope};
use crate::state::AppState;
use crate::usecase::login::{MobileLoginInput, MobileLoginUseCase};
use crate::usecase::otp::OtpIssued;
use crate::usecase::verify::{VerifyOtpInput, VerifyOtpUseCase};
use crate::validation::{RequestKind, parse};

pub const EXISTED_USER_MESSAGE: &str = "Existed user.";
pub const USER_CREATED_MESSAGE: &str = "User created successfully, OTP sent to user.";
pub const OTP_MATCHED_MESSAGE: &str = "OTP Matched";

#[derive(Serialize)]
pub struct OtpDetailsResponse {
    #[serde(serialize_with = "otpgate_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub message: &'static str,
    pub otp_id: Uuid,
}

impl From<OtpIssued> for OtpDetailsResponse {
    fn from(otp: OtpIssued) -> Self {
        Self {
            timestamp: otp.timestamp,
            success: otp.success,
            message: otp.message,
            otp_id: otp.otp_id,
        }
    }
}

// ── POST /auth/mobile ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MobileAuthRequest {
    pub mobile_number: String,
    pub country_code: i32,
}

#[derive(Serialize)]
pub struct MobileAuthResponse {
    pub otp_details: OtpDetailsResponse,
    pub user: UserResponse,
}

pub async fn mobile_auth(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let req: MobileAuthRequest = parse(RequestKind::MobileAuth, body)?;
    let usecase = MobileLoginUseCase {
        users: state.user_repo(),
        issuer: state.otp_issuer(),
    };
    let out = usecase
        .execute(MobileLoginInput {
            mobile_number: req.mobile_number,
            country_code: req.country_code,
        })
        .await?;

    let (status, message) = if out.created {
        (StatusCode::CREATED, USER_CREATED_MESSAGE)
    } else {
        (StatusCode::OK, EXISTED_USER_MESSAGE)
    };
    Ok(envelope(
        status,
        message,
        MobileAuthResponse {
            otp_details: out.otp.into(),
            user: out.user.into(),
        },
    ))
}

// ── POST /auth/otp/verify ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OtpDetailsRequest {
    pub otp_id: String,
    #[serde(rename = "OTP", alias = "otp")]
    pub otp: String,
}

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub mobile_number: String,
    pub country_code: i32,
    pub otp_details: OtpDetailsRequest,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub user: UserResponse,
    pub token: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let req: VerifyOtpRequest = parse(RequestKind::VerifyOtp, body)?;
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let out = usecase
        .execute(VerifyOtpInput {
            mobile_number: req.mobile_number,
            country_code: req.country_code,
            otp_id: req.otp_details.otp_id,
            otp: req.otp_details.otp,
        })
        .await?;

    Ok(envelope(
        StatusCode::OK,
        OTP_MATCHED_MESSAGE,
        VerifyOtpResponse {
            user: out.user.into(),
            token: out.token,
        },
    ))
}
