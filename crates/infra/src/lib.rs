//! Infrastructure layer: order and product persistence behind storage-agnostic
//! traits.

pub mod error;
pub mod order_store;
pub mod product_store;

pub use error::StoreError;
pub use order_store::{
    InMemoryOrderStore, OrderStore, OwnerPrecondition, StatePrecondition, StoreSummarySource,
};
pub use product_store::{InMemoryProductStore, ProductStore};
