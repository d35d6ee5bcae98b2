use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use otpgate_auth::domain::repository::{OtpRepository, TaskRepository, UserRepository};
use otpgate_auth::domain::types::{OtpRecord, ProfileChanges, SmsDispatch, Task, User};
use otpgate_auth::error::AuthServiceError;
use otpgate_auth_schema::{otps, sms_outbox, users};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";
pub const TEST_MOBILE: &str = "9876543210";
pub const TEST_COUNTRY_CODE: i32 = 91;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    /// Inserted right before `create` reports a unique conflict, standing in for a
    /// concurrent request that registered the same number first.
    pub race_winner: Arc<Mutex<Option<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the internal user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }

    pub fn losing_race_to(winner: User) -> Self {
        Self {
            race_winner: Arc::new(Mutex::new(Some(winner))),
            ..Default::default()
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_mobile(
        &self,
        mobile_number: &str,
        country_code: i32,
    ) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.mobile_number == mobile_number && u.country_code == country_code)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(winner) = self.race_winner.lock().unwrap().take() {
            users.push(winner);
        }
        if users
            .iter()
            .any(|u| u.mobile_number == user.mobile_number && u.country_code == user.country_code)
        {
            return Err(AuthServiceError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<u64, AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(0);
        };
        if let Some(ref first_name) = changes.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(ref email) = changes.email {
            user.email = Some(email.clone());
        }
        if let Some(gender) = changes.gender {
            user.gender = Some(gender);
        }
        if let Some(ref facebook) = changes.facebook {
            user.facebook = Some(facebook.clone());
        }
        if let Some(ref linkedin) = changes.linkedin {
            user.linkedin = Some(linkedin.clone());
        }
        if let Some(ref instagram) = changes.instagram {
            user.instagram = Some(instagram.clone());
        }
        user.updated_at = Utc::now();
        Ok(1)
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOtpRepo {
    pub otps: Arc<Mutex<Vec<OtpRecord>>>,
    pub sms: Arc<Mutex<Vec<SmsDispatch>>>,
    pub fail_writes: bool,
    /// Makes `mark_verified` lose, as if another request consumed the code between
    /// the read and the update.
    pub lose_mark_race: bool,
}

impl MockOtpRepo {
    pub fn new(otps: Vec<OtpRecord>) -> Self {
        Self {
            otps: Arc::new(Mutex::new(otps)),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn otps_handle(&self) -> Arc<Mutex<Vec<OtpRecord>>> {
        Arc::clone(&self.otps)
    }

    pub fn sms_handle(&self) -> Arc<Mutex<Vec<SmsDispatch>>> {
        Arc::clone(&self.sms)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn create_with_dispatch(
        &self,
        otp: &OtpRecord,
        sms: &SmsDispatch,
    ) -> Result<(), AuthServiceError> {
        if self.fail_writes {
            return Err(anyhow!("connection refused").into());
        }
        self.otps.lock().unwrap().push(otp.clone());
        self.sms.lock().unwrap().push(sms.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, AuthServiceError> {
        Ok(self.otps.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, AuthServiceError> {
        if self.lose_mark_race {
            return Ok(false);
        }
        let mut otps = self.otps.lock().unwrap();
        match otps.iter_mut().find(|o| o.id == id && !o.verified) {
            Some(otp) => {
                otp.verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn expire_outstanding(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, AuthServiceError> {
        let mut touched = 0;
        for otp in self.otps.lock().unwrap().iter_mut() {
            if otp.user_id == user_id && !otp.verified && otp.expiration_time > now {
                otp.expiration_time = now;
                touched += 1;
            }
        }
        Ok(touched)
    }
}

// ── MockTaskRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockTaskRepo {
    pub tasks: Arc<Mutex<Vec<Task>>>,
}

impl TaskRepository for MockTaskRepo {
    async fn create(&self, task: &Task) -> Result<(), AuthServiceError> {
        self.tasks.lock().unwrap().push(task.clone());
        Ok(())
    }

    async fn list_by_creator(&self, created_by: &str) -> Result<Vec<Task>, AuthServiceError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.created_by == created_by)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(tasks)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user() -> User {
    let mut user = User::with_mobile(TEST_MOBILE.to_owned(), TEST_COUNTRY_CODE, Utc::now());
    user.id = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
    user
}

/// An unverified OTP for `user_id` expiring `expires_in` seconds from now.
pub fn test_otp(user_id: Uuid, code: &str, expires_in: i64) -> OtpRecord {
    let now = Utc::now();
    OtpRecord {
        id: Uuid::new_v4(),
        user_id,
        otp: code.to_owned(),
        expiration_time: now + Duration::seconds(expires_in),
        verified: false,
        created_at: now,
    }
}

// ── Database rows ────────────────────────────────────────────────────────────

/// Row a mock database hands back for `user`.
pub fn user_row(user: &User) -> users::Model {
    users::Model {
        id: user.id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        mobile_number: user.mobile_number.clone(),
        country_code: user.country_code,
        time_zone: user.time_zone.clone(),
        gender: user.gender.map(|g| g.as_str().to_owned()),
        user_type: user.user_type.clone(),
        user_status: user.user_status.map(|s| s.as_str().to_owned()),
        facebook: user.facebook.clone(),
        linkedin: user.linkedin.clone(),
        instagram: user.instagram.clone(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn otp_row(otp: &OtpRecord) -> otps::Model {
    otps::Model {
        id: otp.id,
        user_id: otp.user_id,
        otp: otp.otp.clone(),
        expiration_time: otp.expiration_time,
        verified: otp.verified,
        created_at: otp.created_at,
    }
}

pub fn sms_row(otp_id: Uuid) -> sms_outbox::Model {
    let now = Utc::now();
    sms_outbox::Model {
        id: Uuid::new_v4(),
        otp_id,
        payload: serde_json::json!({}),
        attempts: 0,
        last_error: None,
        created_at: now,
        next_attempt_at: now,
        sent_at: None,
    }
}
