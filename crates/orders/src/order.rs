use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{AggregateId, DomainError, DomainResult};

use crate::OrderState;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Extra added on top of a product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    pub topping_id: String,
    pub quantity: u32,
}

/// Order line: product, quantity, toppings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub toppings: Vec<Topping>,
}

/// The slice of an order that access decisions depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub owner_email: String,
    pub state: OrderState,
}

/// Input for creating an order. New orders always start in `Pending`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrder {
    pub user: String,
    pub total: f64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    pub products: Vec<OrderLine>,
    pub address: String,
}

/// Partial replacement of an order's content.
///
/// State is absent and rejected if sent: it only moves through status changes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderChanges {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub products: Option<Vec<OrderLine>>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Order resource.
///
/// `user` is the owner's email address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OrderId,
    user: String,
    total: f64,
    date: DateTime<Utc>,
    state: OrderState,
    products: Vec<OrderLine>,
    address: String,
}

impl Order {
    pub fn create(id: OrderId, input: NewOrder, now: DateTime<Utc>) -> DomainResult<Self> {
        let order = Self {
            id,
            user: input.user.trim().to_string(),
            total: input.total,
            date: input.date.unwrap_or(now),
            state: OrderState::Pending,
            products: input.products,
            address: input.address,
        };
        order.validate()?;
        Ok(order)
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn products(&self) -> &[OrderLine] {
        &self.products
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            owner_email: self.user.clone(),
            state: self.state,
        }
    }

    /// Apply a partial update. The order is left untouched when the result
    /// would be invalid.
    pub fn apply_changes(&mut self, changes: OrderChanges) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(user) = changes.user {
            next.user = user.trim().to_string();
        }
        if let Some(total) = changes.total {
            next.total = total;
        }
        if let Some(date) = changes.date {
            next.date = date;
        }
        if let Some(products) = changes.products {
            next.products = products;
        }
        if let Some(address) = changes.address {
            next.address = address;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn set_state(&mut self, state: OrderState) {
        self.state = state;
    }

    fn validate(&self) -> DomainResult<()> {
        if self.user.is_empty() || !self.user.contains('@') {
            return Err(DomainError::validation("user must be an email address"));
        }
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(DomainError::validation("total must be a non-negative number"));
        }
        if self.address.trim().is_empty() {
            return Err(DomainError::validation("address is required"));
        }
        if self.products.is_empty() {
            return Err(DomainError::validation("order must contain at least one product"));
        }
        for line in &self.products {
            if line.product_id.trim().is_empty() {
                return Err(DomainError::validation("product_id is required"));
            }
            if line.quantity == 0 {
                return Err(DomainError::validation("quantity must be at least 1"));
            }
            if line.toppings.iter().any(|t| t.quantity == 0) {
                return Err(DomainError::validation("topping quantity must be at least 1"));
            }
        }
        Ok(())
    }
}
