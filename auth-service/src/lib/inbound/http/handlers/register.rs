use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::AuthError;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Registration;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, AuthError> {
        RegisterCommand::new(self.email, self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Registration> for RegisterResponseData {
    fn from(registration: &Registration) -> Self {
        let credential = &registration.credential;
        Self {
            user_id: credential.id.to_string(),
            email: credential.email.as_str().to_string(),
            role: credential.role.clone(),
            access_token: registration.tokens.access_token.clone(),
            refresh_token: registration.tokens.refresh_token.clone(),
            expires_at: registration.tokens.expires_at,
            created_at: credential.created_at,
        }
    }
}
