use chrono::Utc;

use otpgate_auth_types::token::{SessionClaims, sign_session_token};

use crate::domain::types::User;
use crate::error::AuthServiceError;

/// Sign a session token bound to the user's id and mobile number.
pub fn issue_session_token(
    user: &User,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, AuthServiceError> {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    let claims = SessionClaims {
        sub: user.id.to_string(),
        mobile_number: user.mobile_number.clone(),
        exp: now.saturating_add(ttl_secs),
    };
    sign_session_token(&claims, secret).map_err(|e| AuthServiceError::Internal(e.into()))
}
