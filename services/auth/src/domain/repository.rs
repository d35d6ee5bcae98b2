#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{OtpRecord, ProfileChanges, SmsDispatch, Task, User};
use crate::error::AuthServiceError;

/// Repository for user records.
pub trait UserRepository: Send + Sync {
    /// Look up by the `(mobile_number, country_code)` key. No side effects.
    async fn find_by_mobile(
        &self,
        mobile_number: &str,
        country_code: i32,
    ) -> Result<Option<User>, AuthServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError>;

    /// Insert a user. Returns `UserAlreadyExists` when the lookup key is taken.
    async fn create(&self, user: &User) -> Result<(), AuthServiceError>;

    /// Apply the present fields of `changes`. Returns the number of rows modified.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<u64, AuthServiceError>;
}

/// Repository for one-time passcodes.
pub trait OtpRepository: Send + Sync {
    /// Insert an OTP and its queued SMS in one transaction.
    async fn create_with_dispatch(
        &self,
        otp: &OtpRecord,
        sms: &SmsDispatch,
    ) -> Result<(), AuthServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, AuthServiceError>;

    /// Flip `verified` from false to true. Returns `false` when the record was already
    /// verified (or is gone), so concurrent attempts cannot both succeed.
    async fn mark_verified(&self, id: Uuid) -> Result<bool, AuthServiceError>;

    /// Expire every unverified, unexpired OTP of a user by moving its expiration to `now`.
    /// Returns the number of records touched.
    async fn expire_outstanding(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, AuthServiceError>;
}

/// Repository for tasks.
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &Task) -> Result<(), AuthServiceError>;

    /// Tasks created by `created_by`, latest `date` first.
    async fn list_by_creator(&self, created_by: &str) -> Result<Vec<Task>, AuthServiceError>;
}
