use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::Instrument;

use orderdesk_auth::OrderAccessController;

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub access: OrderAccessController,
}

/// Authenticate the bearer token and attach the caller's `ClaimSet`.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = authorization_header(req.headers());

    let claims = match state.access.authenticate(header.as_deref(), Utc::now()) {
        Ok(claims) => claims,
        Err(reason) => return errors::invalid_to_response(reason),
    };

    req.extensions_mut().insert(claims);
    next.run(req).await
}

// Non-UTF-8 bytes are replaced rather than rejected; such a header can never
// carry a valid token and fails verification later.
fn authorization_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// One span per request, closed with the response status and latency.
pub async fn trace_requests(req: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let started = Instant::now();
        let response = next.run(req).await;
        let status = response.status();
        let latency_ms = started.elapsed().as_millis() as u64;

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), latency_ms, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, "request completed");
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_authorization_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization_header(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(authorization_header(&headers).as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn non_utf8_header_is_kept_lossy() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xffabc").unwrap());
        let value = authorization_header(&headers).unwrap();
        assert!(value.starts_with("Bearer "));
    }
}
