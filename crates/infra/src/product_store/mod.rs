//! Product catalog persistence. Product names are unique.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use r#trait::ProductStore;
