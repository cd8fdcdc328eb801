//! Creature variant catalog
//!
//! Static reference table loaded from RON. The built-in table is embedded in
//! the binary; a replacement can be loaded from a file at startup.

use crate::error::{Error, Result};
use crate::identity::VariantKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.ron");

/// A creature variant and its base stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureVariant {
    /// Stable short identifier, unique within the catalog
    pub key: VariantKey,
    /// Display name (not guaranteed unique)
    pub label: String,
    /// Health pool of a fresh creature
    pub base_health: u64,
    /// Lowest AP the game allows against this variant
    pub minimum_ap: u64,
}

impl CreatureVariant {
    /// Create a new variant definition
    pub fn new(
        key: impl Into<VariantKey>,
        label: impl Into<String>,
        base_health: u64,
        minimum_ap: u64,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            base_health,
            minimum_ap,
        }
    }

    fn validate(&self) -> Result<()> {
        let key = self.key.as_str();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::InvalidDefinition(format!(
                "variant key {:?} must be non-empty and alphanumeric",
                key
            )));
        }
        if self.base_health == 0 {
            return Err(Error::InvalidDefinition(format!("{}: base health is zero", key)));
        }
        if self.minimum_ap == 0 {
            return Err(Error::InvalidDefinition(format!("{}: minimum AP is zero", key)));
        }
        Ok(())
    }
}

/// Read-only table of creature variants, keyed by `VariantKey`
///
/// Iteration follows definition order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variants: IndexMap<VariantKey, CreatureVariant>,
}

impl Catalog {
    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_ron_str(BUILTIN_CATALOG)
    }

    /// Load a catalog from a RON file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Load a catalog from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct CatalogFile {
            variants: Vec<CreatureVariant>,
        }

        let file: CatalogFile = ron::from_str(content)?;
        Self::from_variants(file.variants)
    }

    /// Build a catalog from already-parsed variants
    pub fn from_variants(variants: impl IntoIterator<Item = CreatureVariant>) -> Result<Self> {
        let mut catalog = Self::default();
        for variant in variants {
            variant.validate()?;
            let key = variant.key.clone();
            if catalog.variants.contains_key(&key) {
                return Err(Error::DuplicateDefinition(key.to_string()));
            }
            catalog.variants.insert(key, variant);
        }
        Ok(catalog)
    }

    /// Look up a variant by key
    pub fn get(&self, key: &str) -> Option<&CreatureVariant> {
        self.variants.get(&VariantKey::new(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatureVariant> {
        self.variants.values()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
