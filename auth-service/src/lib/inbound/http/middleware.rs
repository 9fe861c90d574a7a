use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use auth::AuthenticationError;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that validates bearer tokens and adds the verified
/// `auth::Claims` to request extensions
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| ApiError::from(AuthenticationError::MalformedHeader))
        })
        .transpose()?;

    let claims = state
        .authentication_service
        .authorize(header)
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Authorization failed");
            ApiError::from(e)
        })?;

    tracing::debug!(username = %claims.username, role = %claims.role, "Request authorized");

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
