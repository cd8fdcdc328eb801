//! Database models for persistent storage.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// One named slot holding an opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredSlot {
    /// Primary key - slot name.
    #[primary_key]
    pub key: String,
    /// Serialized contents, written whole on every save.
    pub payload: String,
}

impl StoredSlot {
    pub fn new(key: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
        }
    }
}
