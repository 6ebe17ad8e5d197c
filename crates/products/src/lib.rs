//! Product catalog domain module.
//!
//! Products are what order lines refer to. Pure domain logic: no IO, no HTTP,
//! no storage.

pub mod product;

pub use product::{Category, NewProduct, Product, ProductChanges, ProductId};
