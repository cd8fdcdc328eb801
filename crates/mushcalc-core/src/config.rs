//! Planner configuration
//!
//! Read from a RON file; every field has a default, so an empty `()` is a
//! valid configuration.
//!
//! ```ron
//! (
//!     database_path: "mushcalc.db",
//!     storage_key: "mushroom_events",
//!     catalog_path: Some("catalog.ron"),
//!     log_filter: "mushcalc_core=debug,info",
//! )
//! ```

use crate::catalog::Catalog;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by the storage backend and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Database file holding the attempt slot
    pub database_path: PathBuf,
    /// Name of the slot the attempt collection is stored under
    pub storage_key: String,
    /// Catalog file replacing the built-in table
    pub catalog_path: Option<PathBuf>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("mushcalc.db"),
            storage_key: "mushroom_events".to_string(),
            catalog_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// The configured catalog, or the built-in one
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load_file(path),
            None => Catalog::builtin(),
        }
    }
}
