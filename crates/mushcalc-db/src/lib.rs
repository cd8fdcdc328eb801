//! Mushcalc DB - Durable attempt storage using native_db
//!
//! Persists named key-value slots. The event store keeps its whole attempt
//! collection in one slot, so a `DbSlot` is all it needs.

mod error;
mod models;
mod store;

pub use error::{Error, Result};
pub use store::{DbSlot, Store};
