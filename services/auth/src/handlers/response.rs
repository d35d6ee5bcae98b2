use axum::{Json, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use otpgate_domain::user::{Gender, UserStatus};

use crate::domain::types::User;

/// Success body shared by every endpoint: `{ "message": .., "data": .. }`.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

pub fn envelope<T: Serialize>(
    status: StatusCode,
    message: &'static str,
    data: T,
) -> (StatusCode, Json<Envelope<T>>) {
    (status, Json(Envelope { message, data }))
}

#[derive(Serialize)]
pub struct UserResponse {
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
    #[serde(serialize_with = "otpgate_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "otpgate_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            mobile_number: user.mobile_number,
            country_code: user.country_code,
            time_zone: user.time_zone,
            gender: user.gender,
            user_type: user.user_type,
            user_status: user.user_status,
            facebook: user.facebook,
            linkedin: user.linkedin,
            instagram: user.instagram,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
