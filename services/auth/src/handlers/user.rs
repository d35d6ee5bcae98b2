use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use otpgate_auth_types::identity::Identity;
use otpgate_domain::user::Gender;

use crate::domain::types::ProfileChanges;
use crate::error::AuthServiceError;
use crate::handlers::response::{UserResponse, envelope};
use crate::state::AppState;
use crate::usecase::profile::UpdateProfileUseCase;
use crate::validation::{RequestKind, parse};

pub const USER_SAVED_MESSAGE: &str = "User details saved.";

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl UpdateMeRequest {
    /// Empty strings count as absent.
    fn into_changes(self) -> Result<ProfileChanges, AuthServiceError> {
        let gender = non_empty(self.gender)
            .map(|g| g.parse::<Gender>())
            .transpose()
            .map_err(|e| AuthServiceError::Validation(vec![e.to_string()]))?;
        Ok(ProfileChanges {
            first_name: non_empty(self.name),
            email: non_empty(self.email),
            gender,
            facebook: non_empty(self.facebook),
            linkedin: non_empty(self.linkedin),
            instagram: non_empty(self.instagram),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Serialize)]
pub struct UpdateMeResponse {
    pub user: UserResponse,
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let req: UpdateMeRequest = parse(RequestKind::UpdateProfile, body)?;
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(identity.user_id, req.into_changes()?)
        .await?;
    Ok(envelope(
        StatusCode::OK,
        USER_SAVED_MESSAGE,
        UpdateMeResponse { user: user.into() },
    ))
}
