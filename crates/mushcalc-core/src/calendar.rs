//! Calendar views over a sorted attempt list
//!
//! Month entries and day buckets borrow from the canonical collection and are
//! rebuilt on every read.

use crate::attempt::Attempt;
use crate::time::MonthKey;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A month that has at least one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthEntry {
    pub key: MonthKey,
    /// e.g. `January 2024 (3)`
    pub label: String,
    pub count: usize,
}

/// One calendar day and the attempts ending on it
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub attempts: Vec<&'a Attempt>,
}

impl DayBucket<'_> {
    /// ISO day key (`YYYY-MM-DD`)
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}

/// Months that contain attempts, ascending, with per-month counts
pub fn months_with_attempts(attempts: &[Attempt]) -> Vec<MonthEntry> {
    let mut counts: BTreeMap<MonthKey, usize> = BTreeMap::new();
    for attempt in attempts {
        *counts.entry(attempt.end_time.month()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(key, count)| MonthEntry {
            key,
            label: format!("{} ({})", key.display_name(), count),
            count,
        })
        .collect()
}

/// One bucket per day of `month`, empty days included
///
/// Attempts keep their relative order from `attempts`.
pub fn days_for(attempts: &[Attempt], month: MonthKey) -> Vec<DayBucket<'_>> {
    let in_month: Vec<&Attempt> = attempts
        .iter()
        .filter(|a| a.end_time.month() == month)
        .collect();

    month
        .iter_days()
        .map(|date| DayBucket {
            date,
            attempts: in_month
                .iter()
                .copied()
                .filter(|a| a.end_time.day() == date)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    fn ending(year: i32, month: u32, day: u32, hour: u32) -> Attempt {
        let end = Timestamp::from_local(year, month, day, hour, 0, 0).unwrap();
        Attempt::new(1000.0, 100.0, end)
    }

    #[test]
    fn test_months_with_counts() {
        let attempts = vec![
            ending(2024, 1, 15, 12),
            ending(2024, 1, 20, 12),
            ending(2024, 2, 15, 12),
        ];
        let months = months_with_attempts(&attempts);

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].key.to_string(), "2024-01");
        assert_eq!(months[0].label, "January 2024 (2)");
        assert_eq!(months[1].key.to_string(), "2024-02");
        assert_eq!(months[1].label, "February 2024 (1)");
    }

    #[test]
    fn test_months_sorted_across_years() {
        let attempts = vec![ending(2024, 1, 1, 12), ending(2023, 12, 31, 12)];
        let months = months_with_attempts(&attempts);
        assert_eq!(months[0].key.to_string(), "2023-12");
        assert_eq!(months[1].key.to_string(), "2024-01");
    }

    #[test]
    fn test_days_cover_whole_month() {
        let feb_leap = MonthKey::new(2024, 2).unwrap();
        let feb = MonthKey::new(2023, 2).unwrap();
        let apr = MonthKey::new(2024, 4).unwrap();
        assert_eq!(days_for(&[], feb_leap).len(), 29);
        assert_eq!(days_for(&[], feb).len(), 28);
        assert_eq!(days_for(&[], apr).len(), 30);

        let days = days_for(&[], apr);
        assert_eq!(days[0].date_key(), "2024-04-01");
        assert_eq!(days[29].date_key(), "2024-04-30");
        assert!(days.iter().all(|d| d.is_empty()));
    }

    #[test]
    fn test_days_group_same_day() {
        let attempts = vec![ending(2024, 1, 15, 9), ending(2024, 1, 15, 15)];
        let days = days_for(&attempts, MonthKey::new(2024, 1).unwrap());
        let day15 = days.iter().find(|d| d.date_key() == "2024-01-15").unwrap();

        assert_eq!(day15.attempts.len(), 2);
        assert_eq!(day15.attempts[0].id, attempts[0].id);
        assert_eq!(day15.attempts[1].id, attempts[1].id);
    }

    #[test]
    fn test_days_only_selected_month() {
        let attempts = vec![ending(2024, 1, 15, 12), ending(2024, 2, 15, 12)];
        let days = days_for(&attempts, MonthKey::new(2024, 2).unwrap());
        let all: Vec<&Attempt> = days.iter().flat_map(|d| d.attempts.iter().copied()).collect();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, attempts[1].id);
    }
}
