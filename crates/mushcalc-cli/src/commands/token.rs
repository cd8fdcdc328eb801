//! Share-token commands

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mushcalc_core::{codec, AttemptId, EventStore};

use super::{parse_id, print_attempt};
use crate::app::App;

/// Print the share token of a saved attempt
#[derive(Parser, Debug)]
pub struct Encode {
    /// Attempt id
    #[arg(value_name = "ID", value_parser = parse_id)]
    id: AttemptId,
}

impl Encode {
    pub fn execute(self, app: &App) -> Result<()> {
        let store = app.open_store()?;
        let events = EventStore::open(store.slot(app.config.storage_key.as_str()));
        let attempt = events
            .get(self.id)
            .ok_or_else(|| anyhow!("no attempt with id {}", self.id))?;
        let token = codec::encode(attempt)
            .context("attempt cannot be shared: it has no creature variant")?;
        println!("{token}");
        Ok(())
    }
}

/// Show the plan inside a share token
#[derive(Parser, Debug)]
pub struct Decode {
    /// Share token
    #[arg(value_name = "TOKEN")]
    token: String,
}

impl Decode {
    pub fn execute(self, app: &App) -> Result<()> {
        let catalog = app.catalog()?;
        let attempt = codec::decode(&self.token, &catalog)
            .ok_or_else(|| anyhow!("not a valid share token: {}", self.token))?;
        print_attempt(&attempt);
        Ok(())
    }
}
