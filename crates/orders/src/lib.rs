//! Orders domain module.
//!
//! This crate contains the order resource and its lifecycle, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;
pub mod state;

pub use order::{NewOrder, Order, OrderChanges, OrderId, OrderLine, OrderSummary, Topping};
pub use state::OrderState;
