//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_session_token;

/// Access to the secret used to validate session tokens. Implemented by service state.
pub trait TokenSecret {
    fn token_secret(&self) -> &str;
}

/// Authenticated caller, taken from `Authorization: Bearer <token>`.
///
/// Returns 401 if the header is absent, not a bearer credential, or the token does
/// not validate against the state's secret.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub mobile_number: String,
}

impl<S> FromRequestParts<S> for Identity
where
    S: TokenSecret + Send + Sync,
{
    type Rejection = StatusCode;

    // Validation runs synchronously so the returned future borrows neither `parts`
    // nor `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(StatusCode::UNAUTHORIZED)
            .and_then(|token| {
                validate_session_token(token, state.token_secret()).map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer token");
                    StatusCode::UNAUTHORIZED
                })
            });

        async move {
            let info = result?;
            Ok(Self {
                user_id: info.user_id,
                mobile_number: info.mobile_number,
            })
        }
    }
}

/// Token from a `Bearer` credential. The scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
