//! Authorization outcomes.
//!
//! Reasons are a fixed taxonomy so callers can branch on them; the HTTP layer
//! maps each one to a status code.

use serde::Serialize;
use thiserror::Error;

/// Caller is identified (or the target exists) but may not proceed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    #[error("role is not allowed to perform this operation")]
    InsufficientRole,

    #[error("order belongs to another user")]
    NotOwner,

    #[error("order can no longer be deleted in its current state")]
    InvalidStateForDeletion,
}

/// The request cannot be evaluated: bad credential or missing target.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    #[error("authorization token not provided")]
    TokenMissing,

    #[error("authorization header is not a bearer token")]
    TokenMalformed,

    #[error("authorization token is invalid")]
    TokenInvalid,

    #[error("order not found")]
    ResourceNotFound,
}

impl DenyReason {
    pub fn code(&self) -> &'static str {
        match self {
            DenyReason::InsufficientRole => "insufficient_role",
            DenyReason::NotOwner => "not_owner",
            DenyReason::InvalidStateForDeletion => "invalid_state_for_deletion",
        }
    }
}

impl InvalidReason {
    pub fn code(&self) -> &'static str {
        match self {
            InvalidReason::TokenMissing => "token_missing",
            InvalidReason::TokenMalformed => "token_malformed",
            InvalidReason::TokenInvalid => "token_invalid",
            InvalidReason::ResourceNotFound => "resource_not_found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum AuthDecision {
    Allow,
    Deny(DenyReason),
    Invalid(InvalidReason),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codes_match_serialized_names() {
        for reason in [
            DenyReason::InsufficientRole,
            DenyReason::NotOwner,
            DenyReason::InvalidStateForDeletion,
        ] {
            assert_eq!(serde_json::to_value(reason).unwrap(), json!(reason.code()));
        }
        for reason in [
            InvalidReason::TokenMissing,
            InvalidReason::TokenMalformed,
            InvalidReason::TokenInvalid,
            InvalidReason::ResourceNotFound,
        ] {
            assert_eq!(serde_json::to_value(reason).unwrap(), json!(reason.code()));
        }
    }

    #[test]
    fn decision_serializes_tagged() {
        let value = serde_json::to_value(AuthDecision::Deny(DenyReason::NotOwner)).unwrap();
        assert_eq!(value, json!({ "decision": "deny", "reason": "not_owner" }));

        let value = serde_json::to_value(AuthDecision::Allow).unwrap();
        assert_eq!(value, json!({ "decision": "allow" }));
    }
}
