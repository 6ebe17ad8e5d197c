use std::sync::Arc;

use async_trait::async_trait;

use orderdesk_auth::{LookupError, OrderSummarySource};
use orderdesk_orders::{Order, OrderChanges, OrderId, OrderState, OrderSummary};

use crate::StoreError;

/// Expected current state for a state-dependent mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePrecondition {
    Any,
    OneOf(&'static [OrderState]),
}

impl StatePrecondition {
    pub fn allows(&self, state: OrderState) -> bool {
        match self {
            StatePrecondition::Any => true,
            StatePrecondition::OneOf(states) => states.contains(&state),
        }
    }
}

impl From<Option<&'static [OrderState]>> for StatePrecondition {
    fn from(value: Option<&'static [OrderState]>) -> Self {
        match value {
            None => StatePrecondition::Any,
            Some(states) => StatePrecondition::OneOf(states),
        }
    }
}

/// Expected owner for an owner-scoped mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerPrecondition {
    Any,
    Is(String),
}

impl OwnerPrecondition {
    pub fn allows(&self, owner: &str) -> bool {
        match self {
            OwnerPrecondition::Any => true,
            OwnerPrecondition::Is(expected) => expected == owner,
        }
    }
}

impl From<Option<&str>> for OwnerPrecondition {
    fn from(value: Option<&str>) -> Self {
        match value {
            None => OwnerPrecondition::Any,
            Some(owner) => OwnerPrecondition::Is(owner.to_string()),
        }
    }
}

/// Persistence for the order resource.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order. Fails with `Conflict` if the id is taken.
    async fn insert(&self, order: Order) -> Result<Order, StoreError>;

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// All orders, oldest id first.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Orders owned by `email`, oldest id first.
    async fn list_by_owner(&self, email: &str) -> Result<Vec<Order>, StoreError>;

    /// Merge `changes` into the stored order if it is still owned as `owner`
    /// expects, and return the result.
    async fn update(
        &self,
        id: &OrderId,
        owner: OwnerPrecondition,
        changes: OrderChanges,
    ) -> Result<Order, StoreError>;

    /// Move the order to `next` if its current state satisfies `expected`.
    async fn update_state(
        &self,
        id: &OrderId,
        expected: StatePrecondition,
        next: OrderState,
    ) -> Result<Order, StoreError>;

    /// Remove the order if its owner and current state satisfy the preconditions.
    async fn delete(
        &self,
        id: &OrderId,
        owner: OwnerPrecondition,
        expected: StatePrecondition,
    ) -> Result<Order, StoreError>;
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn insert(&self, order: Order) -> Result<Order, StoreError> {
        (**self).insert(order).await
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        (**self).list().await
    }

    async fn list_by_owner(&self, email: &str) -> Result<Vec<Order>, StoreError> {
        (**self).list_by_owner(email).await
    }

    async fn update(
        &self,
        id: &OrderId,
        owner: OwnerPrecondition,
        changes: OrderChanges,
    ) -> Result<Order, StoreError> {
        (**self).update(id, owner, changes).await
    }

    async fn update_state(
        &self,
        id: &OrderId,
        expected: StatePrecondition,
        next: OrderState,
    ) -> Result<Order, StoreError> {
        (**self).update_state(id, expected, next).await
    }

    async fn delete(
        &self,
        id: &OrderId,
        owner: OwnerPrecondition,
        expected: StatePrecondition,
    ) -> Result<Order, StoreError> {
        (**self).delete(id, owner, expected).await
    }
}

/// Exposes any [`OrderStore`] as the access controller's summary lookup.
pub struct StoreSummarySource<S> {
    store: S,
}

impl<S> StoreSummarySource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> OrderSummarySource for StoreSummarySource<S>
where
    S: OrderStore,
{
    async fn fetch_order_summary(&self, id: &OrderId) -> Result<Option<OrderSummary>, LookupError> {
        self.store
            .get(id)
            .await
            .map(|order| order.map(|o| o.summary()))
            .map_err(|e| LookupError(e.to_string()))
    }
}
