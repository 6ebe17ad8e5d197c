//! Bearer credential parsing and token verification.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{ClaimSet, InvalidReason, TokenClaims, TokenValidationError, validate_claims};

const BEARER_SCHEME: &str = "Bearer";

/// Split an `Authorization` header value into its bearer credential.
///
/// The value must be exactly `Bearer <credential>`: one space, two parts, and
/// a non-empty credential.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, InvalidReason> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(InvalidReason::TokenMissing),
    };

    let mut parts = header.split(' ');
    let (Some(scheme), Some(credential), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InvalidReason::TokenMalformed);
    };
    if scheme != BEARER_SCHEME || credential.is_empty() {
        return Err(InvalidReason::TokenMalformed);
    }

    Ok(credential)
}

/// Verifies bearer credentials and turns them into a [`ClaimSet`].
///
/// Implementors only check the signature and decode the payload; the time
/// window and role checks are shared through [`TokenValidator::validate`].
pub trait TokenValidator: Send + Sync {
    fn verify(&self, credential: &str) -> Result<TokenClaims, TokenValidationError>;

    /// Validate a raw `Authorization` header value as of `now`.
    fn validate(&self, header: Option<&str>, now: DateTime<Utc>) -> Result<ClaimSet, InvalidReason> {
        let credential = parse_bearer(header)?;

        let checked = self.verify(credential).and_then(|claims| {
            validate_claims(&claims, now)?;
            ClaimSet::from_verified(claims)
        });

        checked.map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            InvalidReason::TokenInvalid
        })
    }
}

/// HS256 (shared secret) JWT validator.
pub struct Hs256TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate_claims`.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl TokenValidator for Hs256TokenValidator {
    fn verify(&self, credential: &str) -> Result<TokenClaims, TokenValidationError> {
        decode::<TokenClaims>(credential, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenValidationError::Verification(e.to_string()))
    }
}
