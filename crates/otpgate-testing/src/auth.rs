//! Bearer-token helpers for integration tests.
//!
//! Authenticated endpoints read `Authorization: Bearer <token>`. `MockAuth` signs a
//! real session token with the test secret so requests pass the `Identity` extractor
//! without going through OTP verification first.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use otpgate_auth_types::token::{SessionClaims, sign_session_token};

/// Identity to authenticate test requests as.
pub struct MockAuth {
    pub user_id: Uuid,
    pub mobile_number: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid, mobile_number: impl Into<String>) -> Self {
        Self {
            user_id,
            mobile_number: mobile_number.into(),
        }
    }

    /// A session token valid for ten minutes.
    pub fn token(&self, secret: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 600;
        let claims = SessionClaims {
            sub: self.user_id.to_string(),
            mobile_number: self.mobile_number.clone(),
            exp,
        };
        sign_session_token(&claims, secret).unwrap()
    }

    /// The `Authorization` header carrying [`MockAuth::token`].
    pub fn header(&self, secret: &str) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap();
        (AUTHORIZATION, value)
    }
}
