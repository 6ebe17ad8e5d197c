use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Role, SubjectId};

/// Token payload as signed by the issuer.
///
/// `role` is kept as the raw string so an unknown value is reported as a
/// validation failure instead of a decoding error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject / user identifier.
    #[serde(rename = "_id")]
    pub sub: String,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Expiration, seconds since the unix epoch.
    pub exp: i64,

    /// Issued-at, seconds since the unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token could not be verified: {0}")]
    Verification(String),

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("token carries no role")]
    MissingRole,

    #[error("token carries unknown role '{0}'")]
    UnknownRole(String),

    #[error("token carries no email")]
    MissingEmail,
}

/// Deterministically validate the time window of a token payload.
///
/// Signature verification happens before this, in the [`crate::TokenValidator`].
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if let Some(iat) = claims.iat {
        if claims.exp <= iat {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
        if now < iat {
            return Err(TokenValidationError::NotYetValid);
        }
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Verified identity facts for a single request.
///
/// Only produced from a token whose signature and time window have been
/// checked; there is no public constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimSet {
    subject_id: SubjectId,
    email: String,
    role: Role,
}

impl ClaimSet {
    pub(crate) fn from_verified(claims: TokenClaims) -> Result<Self, TokenValidationError> {
        let role = match claims.role.as_deref() {
            None | Some("") => return Err(TokenValidationError::MissingRole),
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|e| TokenValidationError::UnknownRole(e.0))?,
        };
        if claims.email.trim().is_empty() {
            return Err(TokenValidationError::MissingEmail);
        }

        Ok(Self {
            subject_id: SubjectId::from(claims.sub),
            email: claims.email,
            role,
        })
    }

    #[cfg(test)]
    pub(crate) fn for_test(email: &str, role: Role) -> Self {
        Self {
            subject_id: SubjectId::new("507f1f77bcf86cd799439011"),
            email: email.to_string(),
            role,
        }
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn payload(role: Option<&str>) -> TokenClaims {
        TokenClaims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            email: "a@x.com".to_string(),
            role: role.map(str::to_string),
            exp: now().timestamp() + 3600,
            iat: Some(now().timestamp()),
        }
    }

    #[test]
    fn window_accepts_live_token() {
        assert_eq!(validate_claims(&payload(Some("admin")), now()), Ok(()));
    }

    #[test]
    fn window_rejects_expired_at_boundary() {
        let mut claims = payload(Some("admin"));
        claims.exp = now().timestamp();
        assert_eq!(validate_claims(&claims, now()), Err(TokenValidationError::Expired));
    }

    #[test]
    fn window_rejects_future_issue_time() {
        let mut claims = payload(Some("admin"));
        claims.iat = Some(now().timestamp() + 60);
        assert_eq!(validate_claims(&claims, now()), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn window_rejects_inverted_bounds() {
        let mut claims = payload(Some("admin"));
        claims.iat = Some(claims.exp);
        assert_eq!(
            validate_claims(&claims, now()),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn claim_set_requires_known_role() {
        assert_eq!(
            ClaimSet::from_verified(payload(None)),
            Err(TokenValidationError::MissingRole)
        );
        assert_eq!(
            ClaimSet::from_verified(payload(Some("user"))),
            Err(TokenValidationError::UnknownRole("user".to_string()))
        );

        let claims = ClaimSet::from_verified(payload(Some("dealer"))).unwrap();
        assert_eq!(claims.role(), Role::Dealer);
        assert_eq!(claims.email(), "a@x.com");
        assert_eq!(claims.subject_id().as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn claim_set_requires_email() {
        let mut claims = payload(Some("customer"));
        claims.email = " ".to_string();
        assert_eq!(
            ClaimSet::from_verified(claims),
            Err(TokenValidationError::MissingEmail)
        );
    }

    #[test]
    fn payload_uses_underscore_id_on_the_wire() {
        let value = serde_json::to_value(payload(Some("admin"))).unwrap();
        assert_eq!(value["_id"], "507f1f77bcf86cd799439011");
        assert!(value.get("sub").is_none());
    }
}
