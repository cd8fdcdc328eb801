//! Countdown helpers
//!
//! Converts between an end time and a days/hours/minutes/seconds duration
//! measured from "now".

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// A duration split into calendar-free units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeRemaining {
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Split a whole number of seconds; negative input counts as zero
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            days: total / DAY,
            hours: total % DAY / HOUR,
            minutes: total % HOUR / MINUTE,
            seconds: total % MINUTE,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * DAY + self.hours * HOUR + self.minutes * MINUTE + self.seconds
    }

    /// An empty duration is not a usable countdown
    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }

    /// The instant this duration after `now`
    pub fn end_from(&self, now: &Timestamp) -> Option<Timestamp> {
        now.add_seconds(self.total_seconds() as f64)
    }
}

/// Time left until `target`, all zero once it has passed
pub fn time_remaining(target: &Timestamp, now: &Timestamp) -> TimeRemaining {
    TimeRemaining::from_seconds(now.secs_until(target))
}
