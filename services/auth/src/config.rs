use serde::Deserialize;

use otpgate_core::config::Config;

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,
    /// Session token lifetime in seconds (default 4 hours). Env var: `TOKEN_TTL_SECS`.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Expire a user's outstanding OTPs whenever a new one is issued (default false).
    /// Env var: `OTP_INVALIDATE_PREVIOUS`.
    #[serde(default)]
    pub otp_invalidate_previous: bool,
}

fn default_auth_port() -> u16 {
    3112
}

fn default_token_ttl_secs() -> u64 {
    14400
}

impl Config for AuthConfig {}
