//! Derived-value solver
//!
//! The damage model is fixed: clearing a creature takes
//! `health * DAMAGE_FACTOR / ap` seconds. Each function solves for one of
//! health, AP, start or end given the other three.
//!
//! Only health is rounded (up, a partial segment still costs a full hit).
//! AP and times keep full precision.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed unit conversion of the game's damage model
pub const DAMAGE_FACTOR: f64 = 100.0;

/// Seconds needed to clear `health` at `ap`
///
/// Returns None when `ap` is not positive.
pub fn seconds_to_clear(health: f64, ap: f64) -> Option<f64> {
    (ap > 0.0).then(|| health * DAMAGE_FACTOR / ap)
}

/// AP needed to clear `health` between `start` and `end`
///
/// An empty or inverted window cannot be solved and yields `0.0`.
pub fn solve_ap(health: f64, start: &Timestamp, end: &Timestamp) -> f64 {
    let secs = start.secs_until(end);
    if secs <= 0 {
        return 0.0;
    }
    health * DAMAGE_FACTOR / secs as f64
}

/// Health that `ap` clears between `start` and `end`, rounded up
pub fn solve_health(ap: f64, start: &Timestamp, end: &Timestamp) -> f64 {
    let secs = start.secs_until(end);
    (ap * secs as f64 / DAMAGE_FACTOR).ceil()
}

/// Latest start that still clears `health` at `ap` by `end`
pub fn solve_start_time(health: f64, ap: f64, end: &Timestamp) -> Option<Timestamp> {
    end.sub_seconds(seconds_to_clear(health, ap)?)
}

/// When `health` is cleared at `ap` after starting at `start`
pub fn solve_end_time(health: f64, ap: f64, start: &Timestamp) -> Option<Timestamp> {
    start.add_seconds(seconds_to_clear(health, ap)?)
}

/// Which field the solver treats as its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolveTarget {
    Health,
    Ap,
    StartTime,
    EndTime,
}

impl SolveTarget {
    pub const ALL: [SolveTarget; 4] = [
        SolveTarget::Health,
        SolveTarget::Ap,
        SolveTarget::StartTime,
        SolveTarget::EndTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SolveTarget::Health => "health",
            SolveTarget::Ap => "ap",
            SolveTarget::StartTime => "startTime",
            SolveTarget::EndTime => "endTime",
        }
    }
}

impl fmt::Display for SolveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolveTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolveTarget::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown solve target: {s}"))
    }
}
