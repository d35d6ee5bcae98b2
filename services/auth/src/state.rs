use sea_orm::DatabaseConnection;

use otpgate_auth_types::identity::TokenSecret;

use crate::infra::db::{DbOtpRepository, DbTaskRepository, DbUserRepository};
use crate::usecase::otp::IssueOtpUseCase;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub otp_invalidate_previous: bool,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn task_repo(&self) -> DbTaskRepository {
        DbTaskRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_issuer(&self) -> IssueOtpUseCase<DbOtpRepository> {
        IssueOtpUseCase {
            otps: self.otp_repo(),
            invalidate_previous: self.otp_invalidate_previous,
        }
    }
}

impl TokenSecret for AppState {
    fn token_secret(&self) -> &str {
        &self.jwt_secret
    }
}
