//! Lock-one-variable calculator
//!
//! The start is always now. The held quantity is set first, then the one
//! other given quantity, which solves the third.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use mushcalc_core::{time_remaining, Held, LockCalculator, TimeRemaining, Timestamp};

use super::{lookup_variant, parse_time};
use crate::app::App;

/// Hold one of health, AP or end time and solve from now
#[derive(Parser, Debug)]
pub struct Lock {
    /// Quantity to hold constant
    #[arg(long, value_enum)]
    hold: HoldArg,

    /// Creature variant key, sets health
    #[arg(short, long, value_name = "KEY", conflicts_with = "health")]
    variant: Option<String>,

    /// Health
    #[arg(long)]
    health: Option<f64>,

    /// Squad AP, rounded up
    #[arg(long)]
    ap: Option<f64>,

    /// End time (`now`, RFC 3339 or `YYYY-MM-DD HH:MM`)
    #[arg(long, value_parser = parse_time, conflicts_with_all = ["days", "hours", "minutes"])]
    end: Option<Timestamp>,

    /// Days from now until the end
    #[arg(long)]
    days: Option<i64>,

    /// Hours from now until the end
    #[arg(long)]
    hours: Option<i64>,

    /// Minutes from now until the end
    #[arg(long)]
    minutes: Option<i64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HoldArg {
    Health,
    Ap,
    Time,
}

impl From<HoldArg> for Held {
    fn from(arg: HoldArg) -> Self {
        match arg {
            HoldArg::Health => Held::Health,
            HoldArg::Ap => Held::Ap,
            HoldArg::Time => Held::Time,
        }
    }
}

impl Lock {
    pub fn execute(self, app: &App) -> Result<()> {
        let now = Timestamp::now();
        let held = Held::from(self.hold);
        let end = self.end_time(&now)?;
        let given = |q: Held| match q {
            Held::Health => self.variant.is_some() || self.health.is_some(),
            Held::Ap => self.ap.is_some(),
            Held::Time => end.is_some(),
        };

        let mut calc = LockCalculator::new();
        if !given(held) {
            bail!("{} is held but not given. {}", held, calc.hint());
        }
        let free: Vec<Held> = [Held::Health, Held::Ap, Held::Time]
            .into_iter()
            .filter(|q| *q != held && given(*q))
            .collect();
        let [changed] = free.as_slice() else {
            bail!("give exactly one value besides the held one. {}", calc.hint());
        };

        self.set(&mut calc, held, end, app, &now)?;
        calc.set_held(Some(held));
        self.set(&mut calc, *changed, end, app, &now)?;

        println!("{}", calc.hint());
        println!("health: {}", calc.health);
        println!("ap:     {}", calc.ap);
        if calc.ap < calc.ap_min {
            println!("        below the variant minimum of {}", calc.ap_min);
        }
        if let Some(end) = calc.end_time {
            let left = time_remaining(&end, &now);
            println!("end:    {}  {}", end, end.chat_tag());
            println!(
                "left:   {}d {}h {}m {}s",
                left.days, left.hours, left.minutes, left.seconds
            );
        }
        Ok(())
    }

    fn end_time(&self, now: &Timestamp) -> Result<Option<Timestamp>> {
        if self.end.is_some() {
            return Ok(self.end);
        }
        if self.days.is_none() && self.hours.is_none() && self.minutes.is_none() {
            return Ok(None);
        }
        let duration = TimeRemaining::new(
            self.days.unwrap_or(0),
            self.hours.unwrap_or(0),
            self.minutes.unwrap_or(0),
            0,
        );
        if duration.is_zero() || duration.total_seconds() < 0 {
            bail!("the time until the end must be positive");
        }
        duration
            .end_from(now)
            .map(Some)
            .context("end time out of range")
    }

    fn set(
        &self,
        calc: &mut LockCalculator,
        quantity: Held,
        end: Option<Timestamp>,
        app: &App,
        now: &Timestamp,
    ) -> Result<()> {
        match quantity {
            Held::Health => match &self.variant {
                Some(key) => {
                    let catalog = app.catalog()?;
                    calc.set_variant(Some(lookup_variant(&catalog, key)?), now);
                }
                None => calc.set_health(self.health, now),
            },
            Held::Ap => calc.set_ap(self.ap, now),
            Held::Time => calc.set_end_time(end, now),
        }
        Ok(())
    }
}
