use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("invalid request")]
    Validation(Vec<String>),
    #[error("User not found.")]
    UserNotFound,
    #[error("OTP record not found.")]
    OtpNotFound,
    #[error("OTP NOT Matched")]
    OtpNotMatched,
    #[error("OTP Already Used")]
    OtpAlreadyUsed,
    #[error("OTP Expired")]
    OtpExpired,
    #[error("No record modified.")]
    NoRecordModified,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpNotMatched => "OTP_NOT_MATCHED",
            Self::OtpAlreadyUsed => "OTP_ALREADY_USED",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::NoRecordModified => "NO_RECORD_MODIFIED",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound
            | Self::OtpNotFound
            | Self::OtpNotMatched
            | Self::OtpAlreadyUsed
            | Self::OtpExpired => StatusCode::UNAUTHORIZED,
            Self::NoRecordModified => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client outcomes and TraceLayer already records the status.
        // Internal errors need the anyhow chain so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(ref errors) = self {
            body["errors"] = serde_json::json!(errors);
        }
        (status, axum::Json(body)).into_response()
    }
}
