//! Mushcalc Core - Attempt planning for timed creature fights
//!
//! This crate provides the planning model and its derived views:
//! - Opaque time types (`Timestamp`, `MonthKey`)
//! - The creature variant catalog, loaded from RON
//! - The damage-model solver and the form reducer built on it
//! - A lock-one-variable calculator and countdown helpers
//! - The event store: a sorted, persisted attempt collection with calendar views
//! - The share-token codec
//!
//! ## Storage
//!
//! The event store writes through the `AttemptSlot` trait. `MemorySlot` keeps
//! the payload in memory; `mushcalc-db` provides a durable slot.

pub mod attempt;
pub mod calendar;
pub mod catalog;
pub mod codec;
mod config;
pub mod countdown;
mod error;
pub mod form;
mod identity;
pub mod lock;
pub mod solver;
pub mod store;
pub mod time;

pub use attempt::{Attempt, AttemptPatch};
pub use calendar::{DayBucket, MonthEntry};
pub use catalog::{Catalog, CreatureVariant};
pub use config::PlannerConfig;
pub use countdown::{time_remaining, TimeRemaining};
pub use error::{Error, Result};
pub use form::{FormChange, FormState};
pub use identity::{AttemptId, VariantKey};
pub use lock::{Held, LockCalculator};
pub use solver::SolveTarget;
pub use store::{AttemptSlot, EventStore, MemorySlot};
pub use time::{MonthKey, Timestamp};
