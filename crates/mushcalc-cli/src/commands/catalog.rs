//! List creature variants

use anyhow::Result;
use clap::Parser;

use crate::app::App;

/// List creature variants
#[derive(Parser, Debug)]
pub struct CatalogList {
    /// Only show variants whose label contains this text
    #[arg(value_name = "FILTER")]
    filter: Option<String>,
}

impl CatalogList {
    pub fn execute(self, app: &App) -> Result<()> {
        let catalog = app.catalog()?;
        let filter = self.filter.map(|f| f.to_lowercase());

        println!("{:<6} {:<28} {:>12} {:>7}", "KEY", "LABEL", "HEALTH", "MIN AP");
        for variant in catalog.iter() {
            if let Some(filter) = &filter {
                if !variant.label.to_lowercase().contains(filter) {
                    continue;
                }
            }
            println!(
                "{:<6} {:<28} {:>12} {:>7}",
                variant.key.as_str(), variant.label, variant.base_health, variant.minimum_ap
            );
        }
        Ok(())
    }
}
