use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use auth::AuthenticationError;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = payload?;
    let username = body.username.clone();

    // Password verification is CPU-bound; keep it off the async workers
    let authentication_service = Arc::clone(&state.authentication_service);
    let result = tokio::task::spawn_blocking(move || {
        authentication_service.login(&body.username, &body.password)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?;

    let token = result.map_err(|e| match e {
        AuthenticationError::Token(err) => {
            ApiError::InternalServerError(format!("Token generation failed: {}", err))
        }
        other => {
            tracing::warn!(username = %username, "Authentication failed");
            ApiError::from(other)
        }
    })?;

    tracing::info!(username = %username, "User authenticated");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData { token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
}
