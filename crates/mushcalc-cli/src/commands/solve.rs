//! Solve a plan from the command line

use anyhow::{bail, Result};
use clap::Parser;
use mushcalc_core::{FormChange, FormState, SolveTarget, Timestamp};

use super::{lookup_variant, parse_time};
use crate::app::App;

/// Solve one of health, AP, start or end from the other three
#[derive(Parser, Debug)]
pub struct Solve {
    /// Field to solve for: health, ap, startTime or endTime
    #[arg(value_name = "TARGET")]
    target: SolveTarget,

    /// Creature variant key
    #[arg(short, long, value_name = "KEY")]
    variant: String,

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
}

impl Solve {
    pub fn execute(self, app: &App) -> Result<()> {
        let catalog = app.catalog()?;
        let variant = lookup_variant(&catalog, &self.variant)?;

        let mut form = FormState::new().apply(FormChange::Variant(Some(variant)));
        if let Some(health) = self.health {
            form = form.apply(FormChange::Health(Some(health)));
        }
        if let Some(ap) = self.ap {
            form = form.apply(FormChange::Ap(Some(ap)));
        }
        form = form
            .apply(FormChange::StartTime(self.start))
            .apply(FormChange::EndTime(self.end))
            .apply(FormChange::Target(Some(self.target)));

        let missing = match self.target {
            SolveTarget::Health | SolveTarget::Ap => {
                form.start_time.is_none() || form.end_time.is_none()
            }
            SolveTarget::StartTime => form.end_time.is_none(),
            SolveTarget::EndTime => form.start_time.is_none(),
        };
        if missing {
            bail!("solving {} needs the other times set", self.target);
        }

        println!("health: {}", form.health);
        println!("ap:     {}", form.ap);
        if let Some(start) = form.start_time {
            println!("start:  {}  {}", start, start.chat_tag());
        }
        if let Some(end) = form.end_time {
            println!("end:    {}  {}", end, end.chat_tag());
        }
        if let Some(token) = form.share_token() {
            println!("token:  {token}");
        }
        Ok(())
    }
}
