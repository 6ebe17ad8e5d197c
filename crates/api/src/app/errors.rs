use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use orderdesk_auth::{DenyReason, InvalidReason, LookupError};
use orderdesk_core::DomainError;
use orderdesk_infra::StoreError;

pub fn deny_to_response(reason: DenyReason) -> axum::response::Response {
    let status = match reason {
        DenyReason::InsufficientRole | DenyReason::NotOwner => StatusCode::FORBIDDEN,
        DenyReason::InvalidStateForDeletion => StatusCode::BAD_REQUEST,
    };
    json_error(status, reason.code(), reason.to_string())
}

pub fn invalid_to_response(reason: InvalidReason) -> axum::response::Response {
    let status = match reason {
        InvalidReason::TokenMissing | InvalidReason::TokenMalformed | InvalidReason::TokenInvalid => {
            StatusCode::UNAUTHORIZED
        }
        InvalidReason::ResourceNotFound => StatusCode::NOT_FOUND,
    };
    json_error(status, reason.code(), reason.to_string())
}

pub fn lookup_error_to_response(err: LookupError) -> axum::response::Response {
    tracing::error!(error = %err, "order lookup failed during authorization");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "lookup_error", err.to_string())
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "resource_not_found", "resource not found"),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Validation(e) => domain_error_to_response(e),
        StoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "store unavailable");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_statuses() {
        assert_eq!(deny_to_response(DenyReason::InsufficientRole).status(), StatusCode::FORBIDDEN);
        assert_eq!(deny_to_response(DenyReason::NotOwner).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            deny_to_response(DenyReason::InvalidStateForDeletion).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(invalid_to_response(InvalidReason::TokenMissing).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid_to_response(InvalidReason::TokenMalformed).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid_to_response(InvalidReason::TokenInvalid).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            invalid_to_response(InvalidReason::ResourceNotFound).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn json_rejections_become_json_errors() {
        use axum::body::to_bytes;
        use axum::extract::FromRequest;
        use axum::http::{Request, header};

        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(r#"{"state":"ready"}"#))
            .unwrap();
        let rejection = axum::Json::<orderdesk_orders::OrderChanges>::from_request(request, &())
            .await
            .unwrap_err();

        let response = json_rejection_to_response(rejection);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "invalid_body");
    }

    #[test]
    fn store_error_statuses() {
        assert_eq!(store_error_to_response(StoreError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            store_error_to_response(StoreError::Conflict("order is now ready".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            store_error_to_response(StoreError::Validation(DomainError::validation("bad"))).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            store_error_to_response(StoreError::Unavailable("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            lookup_error_to_response(LookupError("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
