use axum::http::StatusCode;
use axum::Extension;

use auth::Claims;

use super::ApiSuccess;

/// Echo the caller's verified claims.
pub async fn get_claims(Extension(claims): Extension<Claims>) -> ApiSuccess<Claims> {
    ApiSuccess::new(StatusCode::OK, claims)
}
