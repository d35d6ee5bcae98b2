use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::types::User;
use crate::error::AuthServiceError;
use crate::usecase::token::issue_session_token;

pub struct VerifyOtpInput {
    pub mobile_number: String,
    pub country_code: i32,
    pub otp_id: String,
    pub otp: String,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub user: User,
    pub token: String,
}

pub struct VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub users: U,
    pub otps: O,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U, O> VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub async fn execute(
        &self,
        input: VerifyOtpInput,
    ) -> Result<VerifyOtpOutput, AuthServiceError> {
        // 1. Resolve user by lookup key → 401 if absent
        let user = self
            .users
            .find_by_mobile(&input.mobile_number, input.country_code)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        // 2. Resolve the OTP; an unparseable id or another user's record reads as absent
        let otp_id = input
            .otp_id
            .parse::<Uuid>()
            .map_err(|_| AuthServiceError::OtpNotFound)?;
        let record = self
            .otps
            .find_by_id(otp_id)
            .await?
            .filter(|r| r.user_id == user.id)
            .ok_or(AuthServiceError::OtpNotFound)?;

        // 3-5. Code match, then prior use, then expiry
        if let Err(e) = record.check_attempt(&input.otp, Utc::now()) {
            tracing::info!(
                user_id = %user.id,
                otp_id = %record.id,
                reason = e.kind(),
                "otp rejected"
            );
            return Err(e);
        }

        // 6. Consume atomically; losing a concurrent race means the code was used
        if !self.otps.mark_verified(record.id).await? {
            tracing::info!(user_id = %user.id, otp_id = %record.id, "otp consumed concurrently");
            return Err(AuthServiceError::OtpAlreadyUsed);
        }

        let token = issue_session_token(&user, &self.jwt_secret, self.token_ttl_secs)?;
        tracing::info!(user_id = %user.id, otp_id = %record.id, "otp verified");

        Ok(VerifyOtpOutput { user, token })
    }
}
