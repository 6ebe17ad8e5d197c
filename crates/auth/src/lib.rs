//! `orderdesk-auth`: authorization core for the order API.
//!
//! Token validation, claims, role/ownership/lifecycle guards and the
//! per-operation access controller. This crate is intentionally decoupled from
//! HTTP; storage is reached only through [`OrderSummarySource`].

pub mod authorize;
pub mod catalog;
pub mod claims;
pub mod controller;
pub mod decision;
pub mod lifecycle;
pub mod principal;
pub mod roles;
pub mod token;

pub use authorize::{authorize_roles, check_ownership, ownership_scope};
pub use catalog::{CatalogAction, authorize_catalog};
pub use claims::{ClaimSet, TokenClaims, TokenValidationError, validate_claims};
pub use controller::{
    LookupError, OrderAccessController, OrderAction, OrderOperation, OrderSummarySource,
};
pub use decision::{AuthDecision, DenyReason, InvalidReason};
pub use lifecycle::{check_deletion, deletable_states};
pub use principal::SubjectId;
pub use roles::{Role, UnknownRole};
pub use token::{Hs256TokenValidator, TokenValidator, parse_bearer};
