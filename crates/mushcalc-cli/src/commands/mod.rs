//! Command implementations
//!
//! Each command is a separate module with its own arguments and execution.

mod attempts;
mod calendar;
mod catalog;
mod lock;
mod solve;
mod token;

pub use attempts::{Add, Delete, List};
pub use calendar::Calendar;
pub use catalog::CatalogList;
pub use lock::Lock;
pub use solve::Solve;
pub use token::{Decode, Encode};

use anyhow::{anyhow, Result};
use mushcalc_core::{time_remaining, Attempt, AttemptId, Catalog, CreatureVariant, Timestamp};

/// Parse `now`, an RFC 3339 time or a local `YYYY-MM-DD HH:MM[:SS]`
fn parse_time(s: &str) -> std::result::Result<Timestamp, String> {
    if s.eq_ignore_ascii_case("now") {
        return Ok(Timestamp::now());
    }
    Timestamp::parse(s).ok_or_else(|| format!("unrecognized time: {s}"))
}

fn parse_id(s: &str) -> std::result::Result<AttemptId, String> {
    AttemptId::parse(s).ok_or_else(|| format!("not an attempt id: {s}"))
}

fn lookup_variant(catalog: &Catalog, key: &str) -> Result<CreatureVariant> {
    catalog
        .get(key)
        .cloned()
        .ok_or_else(|| anyhow!("unknown variant '{key}', see `mushcalc catalog`"))
}

fn print_attempt(attempt: &Attempt) {
    let variant = attempt
        .variant
        .as_ref()
        .map_or("-", |v| v.label.as_str());
    println!("{}  {}", attempt.id, attempt.name.as_deref().unwrap_or("(unnamed)"));
    println!("  variant: {variant}");
    println!("  health:  {}", attempt.health);
    println!("  ap:      {}", attempt.ap);
    if let Some(start) = attempt.start_time {
        println!("  start:   {}  {}", start, start.chat_tag());
    }
    println!("  end:     {}  {}", attempt.end_time, attempt.end_time.chat_tag());

    let remaining = time_remaining(&attempt.end_time, &Timestamp::now());
    if !remaining.is_zero() {
        println!(
            "  left:    {}d {}h {}m {}s",
            remaining.days, remaining.hours, remaining.minutes, remaining.seconds
        );
    }
}
