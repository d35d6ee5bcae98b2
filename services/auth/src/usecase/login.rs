use anyhow::anyhow;
use chrono::Utc;

use otpgate_domain::mobile::is_valid_mobile_number;

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::types::User;
use crate::error::AuthServiceError;
use crate::usecase::otp::{IssueOtpInput, IssueOtpUseCase, OtpIssued};

pub struct MobileLoginInput {
    pub mobile_number: String,
    pub country_code: i32,
}

#[derive(Debug)]
pub struct MobileLoginOutput {
    pub user: User,
    pub otp: OtpIssued,
    /// `true` when this request created the user.
    pub created: bool,
}

/// Find-or-create the user for a mobile number, then issue an OTP.
///
/// If OTP issuance fails after the user was created, the user stays; the next
/// login attempt finds it and issues a fresh code.
pub struct MobileLoginUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub users: U,
    pub issuer: IssueOtpUseCase<O>,
}

impl<U, O> MobileLoginUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub async fn execute(
        &self,
        input: MobileLoginInput,
    ) -> Result<MobileLoginOutput, AuthServiceError> {
        // HTTP requests are already checked by `validation::parse`; this covers other callers.
        if !is_valid_mobile_number(&input.mobile_number) {
            return Err(AuthServiceError::Validation(vec![
                "Mobile number is not valid".to_owned(),
            ]));
        }

        if let Some(user) = self
            .users
            .find_by_mobile(&input.mobile_number, input.country_code)
            .await?
        {
            return self.issue_for(user, false).await;
        }

        let user = User::with_mobile(input.mobile_number, input.country_code, Utc::now());
        match self.users.create(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "user created");
                self.issue_for(user, true).await
            }
            // Another request registered the same number first; continue as its user.
            Err(AuthServiceError::UserAlreadyExists) => {
                let user = self
                    .users
                    .find_by_mobile(&user.mobile_number, user.country_code)
                    .await?
                    .ok_or_else(|| anyhow!("user missing after unique conflict"))?;
                self.issue_for(user, false).await
            }
            Err(e) => Err(e),
        }
    }

    async fn issue_for(
        &self,
        user: User,
        created: bool,
    ) -> Result<MobileLoginOutput, AuthServiceError> {
        let otp = self
            .issuer
            .execute(IssueOtpInput {
                user_id: user.id,
                country_code: user.country_code,
                mobile_number: user.mobile_number.clone(),
            })
            .await?;
        Ok(MobileLoginOutput { user, otp, created })
    }
}
