use chrono::{DateTime, Utc};
use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use crate::domain::clock::expiration_after;
use crate::domain::repository::OtpRepository;
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OtpRecord, SmsDispatch};
use crate::error::AuthServiceError;

pub const OTP_SENT_MESSAGE: &str = "OTP sent to user.";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

pub struct IssueOtpInput {
    pub user_id: Uuid,
    pub country_code: i32,
    pub mobile_number: String,
}

/// Acknowledgement returned to the client; never carries the code itself.
#[derive(Debug, Clone)]
pub struct OtpIssued {
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub message: &'static str,
    pub otp_id: Uuid,
}

pub struct IssueOtpUseCase<O: OtpRepository> {
    pub otps: O,
    /// Expire the user's outstanding codes before issuing a new one.
    pub invalidate_previous: bool,
}

impl<O: OtpRepository> IssueOtpUseCase<O> {
    pub async fn execute(&self, input: IssueOtpInput) -> Result<OtpIssued, AuthServiceError> {
        let now = Utc::now();

        if self.invalidate_previous {
            let expired = self.otps.expire_outstanding(input.user_id, now).await?;
            if expired > 0 {
                tracing::debug!(user_id = %input.user_id, expired, "expired outstanding otps");
            }
        }

        let code = generate_code();
        let otp = OtpRecord {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            otp: code.clone(),
            expiration_time: expiration_after(now, OTP_TTL_SECS),
            verified: false,
            created_at: now,
        };

        // The queued row is the hand-off point for SMS delivery.
        let sms = SmsDispatch {
            id: Uuid::new_v4(),
            otp_id: otp.id,
            payload: json!({
                "otp_id": otp.id,
                "user_id": input.user_id,
                "country_code": input.country_code,
                "mobile_number": input.mobile_number,
                "otp": code,
            }),
        };

        self.otps.create_with_dispatch(&otp, &sms).await?;
        tracing::info!(user_id = %input.user_id, otp_id = %otp.id, "otp issued");

        Ok(OtpIssued {
            timestamp: now,
            success: true,
            message: OTP_SENT_MESSAGE,
            otp_id: otp.id,
        })
    }
}
