//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use mushcalc_core::AttemptSlot;
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredSlot>().unwrap();
    models
});

/// Database store for persisted slots.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Builder::new()
            .create(&MODELS, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        debug!(path = %path.display(), "opened database");
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Read a slot's payload.
    pub fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredSlot> = r.get().primary(key.to_string())?;
        Ok(stored.map(|s| s.payload))
    }

    /// Replace a slot's payload.
    pub fn write_slot(&self, key: &str, payload: &str) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredSlot::new(key, payload))?;
        rw.commit()?;
        Ok(())
    }

    /// Remove a slot; missing slots are ignored.
    pub fn clear_slot(&self, key: &str) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        if let Some(slot) = rw.get().primary::<StoredSlot>(key.to_string())? {
            rw.remove(slot)?;
        }
        rw.commit()?;
        Ok(())
    }

    /// Names of all stored slots.
    pub fn slot_keys(&self) -> Result<Vec<String>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredSlot>()?;
        let iter = scan.all()?;
        let slots: std::result::Result<Vec<StoredSlot>, _> = iter.collect();
        let slots = slots.map_err(|e| Error::Database(e.to_string()))?;
        Ok(slots.into_iter().map(|s| s.key).collect())
    }

    /// Handle on one slot, usable as an event store backend.
    pub fn slot(&self, key: impl Into<String>) -> DbSlot<'_> {
        DbSlot {
            store: self,
            key: key.into(),
        }
    }
}

/// A named slot in a `Store`.
pub struct DbSlot<'a> {
    store: &'a Store,
    key: String,
}

impl DbSlot<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl AttemptSlot for DbSlot<'_> {
    fn read(&self) -> mushcalc_core::Result<Option<String>> {
        Ok(self.store.read_slot(&self.key)?)
    }

    fn write(&mut self, payload: &str) -> mushcalc_core::Result<()> {
        Ok(self.store.write_slot(&self.key, payload)?)
    }
}
