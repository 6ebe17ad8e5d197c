//! Per-operation access control for orders.
//!
//! The controller gates an operation; it never performs it. Checks run in a
//! fixed order and stop at the first failure:
//!
//! 1. bearer token → `Invalid(TokenMissing | TokenMalformed | TokenInvalid)`
//! 2. operation role set → `Deny(InsufficientRole)`
//! 3. customer on a specific order: existence → `Invalid(ResourceNotFound)`,
//!    then ownership → `Deny(NotOwner)`
//! 4. delete: lifecycle → `Deny(InvalidStateForDeletion)`
//!
//! The role check always precedes the existence check, so a caller without the
//! role cannot tell a missing order from a forbidden one.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use orderdesk_orders::{OrderId, OrderSummary};

use crate::{
    AuthDecision, ClaimSet, DenyReason, InvalidReason, Role, TokenValidator, authorize_roles,
    check_deletion, check_ownership,
};

/// Failure of the order lookup itself (not an authorization outcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("order lookup failed: {0}")]
pub struct LookupError(pub String);

/// Read access to the part of an order that access decisions need.
#[async_trait]
pub trait OrderSummarySource: Send + Sync {
    async fn fetch_order_summary(&self, id: &OrderId) -> Result<Option<OrderSummary>, LookupError>;
}

/// Operations on the order resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOperation {
    Create,
    GetAll,
    ListOwn,
    Get(OrderId),
    Update(OrderId),
    Delete(OrderId),
    ChangeStatus(OrderId),
}

/// What an [`OrderOperation`] does, without the order it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    Create,
    GetAll,
    ListOwn,
    Get,
    Update,
    Delete,
    ChangeStatus,
}

impl OrderAction {
    pub const ALL: [OrderAction; 7] = [
        OrderAction::Create,
        OrderAction::GetAll,
        OrderAction::ListOwn,
        OrderAction::Get,
        OrderAction::Update,
        OrderAction::Delete,
        OrderAction::ChangeStatus,
    ];

    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            OrderAction::Create => &[Role::Admin, Role::Customer],
            OrderAction::GetAll => &[Role::Admin, Role::Dealer],
            OrderAction::ListOwn | OrderAction::Get | OrderAction::Update => {
                &[Role::Admin, Role::Customer, Role::Dealer]
            }
            OrderAction::Delete => &[Role::Admin, Role::Customer],
            OrderAction::ChangeStatus => &[Role::Admin, Role::Dealer],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrderAction::Create => "create",
            OrderAction::GetAll => "get_all",
            OrderAction::ListOwn => "list_own",
            OrderAction::Get => "get",
            OrderAction::Update => "update",
            OrderAction::Delete => "delete",
            OrderAction::ChangeStatus => "change_status",
        }
    }
}

impl OrderOperation {
    pub fn action(&self) -> OrderAction {
        match self {
            OrderOperation::Create => OrderAction::Create,
            OrderOperation::GetAll => OrderAction::GetAll,
            OrderOperation::ListOwn => OrderAction::ListOwn,
            OrderOperation::Get(_) => OrderAction::Get,
            OrderOperation::Update(_) => OrderAction::Update,
            OrderOperation::Delete(_) => OrderAction::Delete,
            OrderOperation::ChangeStatus(_) => OrderAction::ChangeStatus,
        }
    }

    pub fn required_roles(&self) -> &'static [Role] {
        self.action().required_roles()
    }

    /// The order this operation acts on, if it targets a single one.
    pub fn target(&self) -> Option<OrderId> {
        match self {
            OrderOperation::Create | OrderOperation::GetAll | OrderOperation::ListOwn => None,
            OrderOperation::Get(id)
            | OrderOperation::Update(id)
            | OrderOperation::Delete(id)
            | OrderOperation::ChangeStatus(id) => Some(*id),
        }
    }

    pub fn name(&self) -> &'static str {
        self.action().name()
    }
}

/// Orchestrates token, role, ownership and lifecycle checks.
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Clone)]
pub struct OrderAccessController {
    tokens: Arc<dyn TokenValidator>,
    orders: Arc<dyn OrderSummarySource>,
}

impl OrderAccessController {
    pub fn new(tokens: Arc<dyn TokenValidator>, orders: Arc<dyn OrderSummarySource>) -> Self {
        Self { tokens, orders }
    }

    /// Step 1 alone: turn a raw `Authorization` header into verified claims.
    pub fn authenticate(&self, header: Option<&str>, now: DateTime<Utc>) -> Result<ClaimSet, InvalidReason> {
        self.tokens.validate(header, now).inspect_err(|reason| {
            tracing::debug!(reason = reason.code(), "authentication failed");
        })
    }

    /// Step 2 alone, for requests whose target order could not be identified.
    pub fn authorize_action(&self, claims: &ClaimSet, action: OrderAction) -> AuthDecision {
        match authorize_roles(claims, action.required_roles()) {
            Ok(()) => AuthDecision::Allow,
            Err(reason) => denied(claims, action, reason),
        }
    }

    /// Steps 2-5 for an already authenticated caller.
    pub async fn authorize(
        &self,
        claims: &ClaimSet,
        operation: OrderOperation,
    ) -> Result<AuthDecision, LookupError> {
        if let Err(reason) = authorize_roles(claims, operation.required_roles()) {
            return Ok(denied(claims, operation.action(), reason));
        }

        let summary = match (operation.target(), claims.role()) {
            (Some(id), Role::Customer) => match self.orders.fetch_order_summary(&id).await? {
                Some(summary) => Some(summary),
                None => return Ok(AuthDecision::Invalid(InvalidReason::ResourceNotFound)),
            },
            _ => None,
        };

        // Summaries are only fetched for customers; staff roles are neither
        // ownership- nor lifecycle-restricted.
        if let Some(summary) = &summary {
            if let Err(reason) = check_ownership(claims, &summary.owner_email) {
                return Ok(denied(claims, operation.action(), reason));
            }
            if let OrderOperation::Delete(_) = operation {
                if let Err(reason) = check_deletion(claims.role(), summary.state) {
                    return Ok(denied(claims, operation.action(), reason));
                }
            }
        }

        Ok(AuthDecision::Allow)
    }

    /// Full evaluation from a raw header.
    pub async fn decide(
        &self,
        header: Option<&str>,
        operation: OrderOperation,
        now: DateTime<Utc>,
    ) -> Result<AuthDecision, LookupError> {
        match self.authenticate(header, now) {
            Ok(claims) => self.authorize(&claims, operation).await,
            Err(reason) => Ok(AuthDecision::Invalid(reason)),
        }
    }
}

fn denied(claims: &ClaimSet, action: OrderAction, reason: DenyReason) -> AuthDecision {
    tracing::info!(
        operation = action.name(),
        role = claims.role().as_str(),
        subject = %claims.subject_id(),
        reason = reason.code(),
        "order access denied"
    );
    AuthDecision::Deny(reason)
}
