use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use orderdesk_orders::{Order, OrderChanges, OrderId, OrderState};

use super::r#trait::{OrderStore, OwnerPrecondition, StatePrecondition};
use crate::StoreError;

/// In-memory order store.
///
/// Intended for tests/dev. Every check-and-write runs under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<BTreeMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

fn check_owner(order: &Order, owner: &OwnerPrecondition) -> Result<(), StoreError> {
    if owner.allows(order.user()) {
        Ok(())
    } else {
        tracing::debug!(order_id = %order.id(), "owner precondition failed");
        Err(StoreError::Conflict("order owner has changed".to_string()))
    }
}

fn check_state(order: &Order, expected: StatePrecondition) -> Result<(), StoreError> {
    if expected.allows(order.state()) {
        Ok(())
    } else {
        tracing::debug!(order_id = %order.id(), state = %order.state(), "state precondition failed");
        Err(StoreError::Conflict(format!(
            "order is now {}",
            order.state()
        )))
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        if orders.contains_key(&order.id()) {
            return Err(StoreError::Conflict(format!("order {} already exists", order.id())));
        }
        orders.insert(order.id(), order.clone());
        Ok(order)
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.values().cloned().collect())
    }

    async fn list_by_owner(&self, email: &str) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.values().filter(|o| o.user() == email).cloned().collect())
    }

    async fn update(
        &self,
        id: &OrderId,
        owner: OwnerPrecondition,
        changes: OrderChanges,
    ) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let order = orders.get_mut(id).ok_or(StoreError::NotFound)?;
        check_owner(order, &owner)?;
        order.apply_changes(changes)?;
        Ok(order.clone())
    }

    async fn update_state(
        &self,
        id: &OrderId,
        expected: StatePrecondition,
        next: OrderState,
    ) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let order = orders.get_mut(id).ok_or(StoreError::NotFound)?;
        check_state(order, expected)?;
        order.set_state(next);
        Ok(order.clone())
    }

    async fn delete(
        &self,
        id: &OrderId,
        owner: OwnerPrecondition,
        expected: StatePrecondition,
    ) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let order = orders.get(id).ok_or(StoreError::NotFound)?;
        check_owner(order, &owner)?;
        check_state(order, expected)?;
        orders.remove(id).ok_or(StoreError::NotFound)
    }
}
