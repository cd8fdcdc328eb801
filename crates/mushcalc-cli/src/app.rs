//! Shared command context: configuration, catalog and storage

use anyhow::{Context, Result};
use mushcalc_core::{Catalog, PlannerConfig};
use mushcalc_db::Store;
use std::path::PathBuf;

pub struct App {
    pub config: PlannerConfig,
}

impl App {
    /// Read the configuration file if one was given, then apply overrides
    pub fn load(config_path: Option<PathBuf>, db_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => PlannerConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => PlannerConfig::default(),
        };
        if let Some(db_path) = db_path {
            config.database_path = db_path;
        }
        Ok(Self { config })
    }

    pub fn catalog(&self) -> Result<Catalog> {
        self.config.catalog().context("failed to load catalog")
    }

    pub fn open_store(&self) -> Result<Store> {
        let path = &self.config.database_path;
        Store::open(path).with_context(|| format!("failed to open database {}", path.display()))
    }
}
