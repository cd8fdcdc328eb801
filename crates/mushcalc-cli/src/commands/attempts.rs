//! Saved attempt commands

use anyhow::{bail, Context, Result};
use clap::Parser;
use mushcalc_core::{AttemptId, EventStore, FormChange, FormState, SolveTarget, Timestamp};
use tracing::info;

use super::{lookup_variant, parse_id, parse_time, print_attempt};
use crate::app::App;

/// Save an attempt
#[derive(Parser, Debug)]
pub struct Add {
    /// Free-text label
    #[arg(short, long)]
    name: Option<String>,

    /// Take the plan from a share token
    #[arg(short, long, value_name = "TOKEN", conflicts_with_all = ["variant", "solve"])]
    token: Option<String>,

    /// Creature variant key
    #[arg(short, long, value_name = "KEY")]
    variant: Option<String>,

    /// Health, defaults to the variant's base health
    #[arg(long)]
    health: Option<f64>,

    /// Squad AP, defaults to the variant's minimum
    #[arg(long)]
    ap: Option<f64>,

    /// Start time (`now`, RFC 3339 or `YYYY-MM-DD HH:MM`)
    #[arg(long, value_parser = parse_time)]
    start: Option<Timestamp>,

    /// End time (`now`, RFC 3339 or `YYYY-MM-DD HH:MM`)
    #[arg(long, value_parser = parse_time)]
    end: Option<Timestamp>,

    /// Solve this field before saving
    #[arg(long, value_name = "TARGET")]
    solve: Option<SolveTarget>,
}

impl Add {
    fn form(&self, app: &App) -> Result<FormState> {
        let catalog = app.catalog()?;
        if let Some(token) = &self.token {
            return Ok(FormState::new().paste_token(token, &catalog));
        }

        let Some(key) = &self.variant else {
            bail!("give either --token or --variant");
        };
        let mut form = FormState::new().apply(FormChange::Variant(Some(lookup_variant(&catalog, key)?)));
        if let Some(health) = self.health {
            form = form.apply(FormChange::Health(Some(health)));
        }
        if let Some(ap) = self.ap {
            form = form.apply(FormChange::Ap(Some(ap)));
        }
        Ok(form
            .apply(FormChange::StartTime(self.start))
            .apply(FormChange::EndTime(self.end))
            .apply(FormChange::Target(self.solve)))
    }

    pub fn execute(self, app: &App) -> Result<()> {
        let form = self.form(app)?;
        let attempt = form
            .to_attempt(self.name.clone())
            .context("incomplete plan: a variant, start, end and positive health and AP are needed")?;

        let store = app.open_store()?;
        let mut events = EventStore::open(store.slot(app.config.storage_key.as_str()));
        let id = attempt.id;
        events.add(attempt)?;
        info!(%id, "saved attempt");

        if let Some(saved) = events.get(id) {
            print_attempt(saved);
        }
        Ok(())
    }
}

/// List saved attempts
#[derive(Parser, Debug)]
pub struct List {
    /// Print the stored JSON instead
    #[arg(long)]
    json: bool,
}

impl List {
    pub fn execute(self, app: &App) -> Result<()> {
        let store = app.open_store()?;
        let events = EventStore::open(store.slot(app.config.storage_key.as_str()));

        if self.json {
            println!("{}", serde_json::to_string_pretty(events.attempts())?);
            return Ok(());
        }
        if events.is_empty() {
            println!("No saved attempts");
            return Ok(());
        }
        for attempt in events.attempts() {
            print_attempt(attempt);
        }
        Ok(())
    }
}

/// Delete a saved attempt
#[derive(Parser, Debug)]
pub struct Delete {
    /// Attempt id
    #[arg(value_name = "ID", value_parser = parse_id)]
    id: AttemptId,
}

impl Delete {
    pub fn execute(self, app: &App) -> Result<()> {
        let store = app.open_store()?;
        let mut events = EventStore::open(store.slot(app.config.storage_key.as_str()));
        if events.get(self.id).is_none() {
            println!("No attempt with id {}", self.id);
            return Ok(());
        }
        events.delete(self.id)?;
        println!("Deleted {}", self.id);
        Ok(())
    }
}
