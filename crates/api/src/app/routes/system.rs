use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use orderdesk_auth::ClaimSet;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The caller's verified claims.
pub async fn whoami(Extension(claims): Extension<ClaimSet>) -> impl IntoResponse {
    Json(claims)
}
