use chrono::{DateTime, Utc};
use uuid::Uuid;

use otpgate_domain::user::{Gender, UserStatus};

use crate::domain::clock::has_expired;
use crate::error::AuthServiceError;

/// User record, found by `(mobile_number, country_code)`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: String,
    pub country_code: i32,
    pub time_zone: Option<String>,
    pub gender: Option<Gender>,
    pub user_type: Option<String>,
    pub user_status: Option<UserStatus>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A user carrying only the lookup key, as created on first login.
    pub fn with_mobile(mobile_number: String, country_code: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            first_name: None,
            last_name: None,
            email: None,
            mobile_number,
            country_code,
            time_zone: None,
            gender: None,
            user_type: None,
            user_status: None,
            facebook: None,
            linkedin: None,
            instagram: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One-time passcode bound to a user.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub otp: String,
    pub expiration_time: DateTime<Utc>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Judge a verification attempt. Checks run in a fixed order: code match, then
    /// prior use, then expiry.
    pub fn check_attempt(
        &self,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        if submitted != self.otp {
            return Err(AuthServiceError::OtpNotMatched);
        }
        if self.verified {
            return Err(AuthServiceError::OtpAlreadyUsed);
        }
        if has_expired(self.expiration_time, now) {
            return Err(AuthServiceError::OtpExpired);
        }
        Ok(())
    }
}

/// Queued SMS for an issued OTP. The queue is the hand-off point for an SMS gateway;
/// nothing in this service sends it.
#[derive(Debug, Clone)]
pub struct SmsDispatch {
    pub id: Uuid,
    pub otp_id: Uuid,
    pub payload: serde_json::Value,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.email.is_none()
            && self.gender.is_none()
            && self.facebook.is_none()
            && self.linkedin.is_none()
            && self.instagram.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub priority: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// OTP length in digits.
pub const OTP_LEN: usize = 6;
