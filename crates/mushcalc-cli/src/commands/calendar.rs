//! Calendar view of saved attempts

use anyhow::Result;
use clap::Parser;
use mushcalc_core::{EventStore, MonthKey};

use crate::app::App;

/// Show months with attempts and the days of one month
#[derive(Parser, Debug)]
pub struct Calendar {
    /// Month to show (`YYYY-MM`), defaults to the first month with attempts
    #[arg(value_name = "MONTH")]
    month: Option<MonthKey>,

    /// Also list days without attempts
    #[arg(long)]
    all_days: bool,
}

impl Calendar {
    pub fn execute(self, app: &App) -> Result<()> {
        let store = app.open_store()?;
        let mut events = EventStore::open(store.slot(app.config.storage_key.as_str()));
        if let Some(month) = self.month {
            events.set_selected_month(month);
        }

        let months = events.months_with_attempts();
        if months.is_empty() {
            println!("No saved attempts");
        }
        for entry in &months {
            let marker = if Some(entry.key) == events.selected_month() { '*' } else { ' ' };
            println!("{marker} {}  {}", entry.key, entry.label);
        }

        let Some(selected) = events.selected_month() else {
            return Ok(());
        };
        println!();
        println!("{}", selected.display_name());
        for day in events.days() {
            if day.is_empty() && !self.all_days {
                continue;
            }
            println!("  {}  ({})", day.date_key(), day.attempts.len());
            for attempt in &day.attempts {
                let label = attempt.variant.as_ref().map_or("-", |v| v.label.as_str());
                println!(
                    "    {}  {}  {}",
                    attempt.end_time,
                    label,
                    attempt.name.as_deref().unwrap_or("(unnamed)")
                );
            }
        }
        Ok(())
    }
}
