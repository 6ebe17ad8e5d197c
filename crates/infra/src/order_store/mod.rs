//! Order persistence boundary.
//!
//! Mutations that depend on the order's current owner or state take them as
//! preconditions and check them atomically with the write, so a decision made
//! on an earlier read cannot be applied to an order that has since moved on.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryOrderStore;
pub use r#trait::{OrderStore, OwnerPrecondition, StatePrecondition, StoreSummarySource};
