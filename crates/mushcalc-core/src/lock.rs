//! Lock-one-variable calculator
//!
//! A simpler planner than the form: the start is always "now", one of health,
//! AP and end time is held constant, and editing a second one solves the
//! third. Health and AP results are rounded up to whole numbers.

use crate::catalog::CreatureVariant;
use crate::solver::DAMAGE_FACTOR;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_HEALTH: f64 = 1.0;
const DEFAULT_AP: f64 = 2.0;

/// The quantity held constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Held {
    Health,
    Ap,
    Time,
}

impl Held {
    pub fn as_str(&self) -> &'static str {
        match self {
            Held::Health => "health",
            Held::Ap => "ap",
            Held::Time => "time",
        }
    }
}

impl fmt::Display for Held {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// End time when `health` is cleared at `ap`, starting `now`
pub fn calculate_time(health: f64, ap: f64, now: &Timestamp) -> Option<Timestamp> {
    if ap <= 0.0 {
        return None;
    }
    now.add_seconds(health * DAMAGE_FACTOR / ap)
}

/// Whole AP needed to clear `health` by `end`; `0.0` if `end` is not after `now`
pub fn calculate_ap(health: f64, end: &Timestamp, now: &Timestamp) -> f64 {
    let secs = now.secs_until(end);
    if secs <= 0 {
        return 0.0;
    }
    (health * DAMAGE_FACTOR / secs as f64).ceil()
}

/// Whole health `ap` clears by `end`; `0.0` if `end` is not after `now`
pub fn calculate_health(ap: f64, end: &Timestamp, now: &Timestamp) -> f64 {
    let secs = now.secs_until(end);
    if secs <= 0 {
        return 0.0;
    }
    (ap * secs as f64 / DAMAGE_FACTOR).ceil()
}

/// State of the lock calculator
#[derive(Debug, Clone, PartialEq)]
pub struct LockCalculator {
    pub variant: Option<CreatureVariant>,
    pub health: f64,
    pub ap: f64,
    /// AP floor of the selected variant
    pub ap_min: f64,
    pub end_time: Option<Timestamp>,
    pub held: Option<Held>,
}

impl Default for LockCalculator {
    fn default() -> Self {
        Self {
            variant: None,
            health: DEFAULT_HEALTH,
            ap: DEFAULT_AP,
            ap_min: DEFAULT_AP,
            end_time: None,
            held: None,
        }
    }
}

impl LockCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the quantity to hold; `None` is ignored
    pub fn set_held(&mut self, held: Option<Held>) {
        if let Some(held) = held {
            self.held = Some(held);
        }
    }

    /// Select a creature: health follows it and AP is raised to its floor
    pub fn set_variant(&mut self, variant: Option<CreatureVariant>, now: &Timestamp) {
        match &variant {
            Some(v) => {
                self.health = v.base_health as f64;
                self.ap_min = v.minimum_ap as f64;
            }
            None => {
                self.health = DEFAULT_HEALTH;
                self.ap_min = DEFAULT_AP;
            }
        }
        if self.ap < self.ap_min {
            self.ap = self.ap_min;
        }
        self.variant = variant;
        self.calculate(Held::Health, now);
    }

    /// Enter health by hand; this deselects the creature
    pub fn set_health(&mut self, health: Option<f64>, now: &Timestamp) {
        self.variant = None;
        self.health = health.unwrap_or(DEFAULT_HEALTH);
        self.calculate(Held::Health, now);
    }

    /// Enter AP, rounded up
    pub fn set_ap(&mut self, ap: Option<f64>, now: &Timestamp) {
        self.ap = ap.unwrap_or(1.0).ceil();
        self.calculate(Held::Ap, now);
    }

    pub fn set_end_time(&mut self, end: Option<Timestamp>, now: &Timestamp) {
        self.end_time = end;
        self.calculate(Held::Time, now);
    }

    /// Solve the free quantity after `changed` was edited
    ///
    /// Does nothing when nothing is held, when the held quantity itself
    /// changed, or when an input is missing.
    fn calculate(&mut self, changed: Held, now: &Timestamp) {
        let Some(held) = self.held else {
            return;
        };
        let has_health = self.health > 0.0;
        let has_ap = self.ap > 0.0;

        match (held, changed) {
            (Held::Time, Held::Health) | (Held::Health, Held::Time) => {
                if let (true, Some(end)) = (has_health, self.end_time) {
                    self.ap = calculate_ap(self.health, &end, now);
                }
            }
            (Held::Time, Held::Ap) | (Held::Ap, Held::Time) => {
                if let (true, Some(end)) = (has_ap, self.end_time) {
                    self.health = calculate_health(self.ap, &end, now);
                }
            }
            (Held::Ap, Held::Health) | (Held::Health, Held::Ap) => {
                if has_health && has_ap {
                    self.end_time = calculate_time(self.health, self.ap, now);
                }
            }
            _ => {}
        }
    }

    /// Guidance on what to set next
    pub fn hint(&self) -> String {
        let Some(held) = self.held else {
            if self.variant.is_none() {
                return "Of creature health, total AP, and end time, set any two to calculate the third."
                    .to_string();
            }
            return "You'll need to pick one variable to hold constant, and then change \
                    one of the others. Then I can calculate the third for you."
                .to_string();
        };

        let free: Vec<Held> = [Held::Ap, Held::Time, Held::Health]
            .into_iter()
            .filter(|h| *h != held)
            .collect();
        format!(
            "{} is held constant; set {} to calculate {}, or vice versa",
            held, free[0], free[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn now() -> Timestamp {
        Timestamp::from_local(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn in_secs(secs: f64) -> Timestamp {
        now().add_seconds(secs).unwrap()
    }

    fn variant(key: &str) -> CreatureVariant {
        Catalog::builtin().unwrap().get(key).unwrap().clone()
    }

    #[test]
    fn test_calculations() {
        assert_eq!(calculate_time(1000.0, 100.0, &now()).unwrap(), in_secs(1000.0));
        assert!(calculate_time(1000.0, 0.0, &now()).is_none());

        assert_eq!(calculate_ap(1000.0, &in_secs(30.0), &now()), 3334.0);
        assert_eq!(calculate_ap(1000.0, &now(), &now()), 0.0);

        assert_eq!(calculate_health(33.0, &in_secs(10.0), &now()), 4.0);
        assert_eq!(calculate_health(33.0, &in_secs(-10.0), &now()), 0.0);
    }

    #[test]
    fn test_nothing_held_computes_nothing() {
        let mut calc = LockCalculator::new();
        calc.set_health(Some(1000.0), &now());
        calc.set_ap(Some(100.0), &now());
        assert_eq!(calc.end_time, None);
    }

    #[test]
    fn test_hold_ap_solves_time() {
        let mut calc = LockCalculator::new();
        calc.set_held(Some(Held::Ap));
        calc.set_ap(Some(100.0), &now());
        calc.set_health(Some(1000.0), &now());
        assert_eq!(calc.end_time, Some(in_secs(1000.0)));

        calc.set_end_time(Some(in_secs(10.0)), &now());
        assert_eq!(calc.health, 10.0);
    }

    #[test]
    fn test_hold_time_solves_other_two() {
        let mut calc = LockCalculator::new();
        calc.set_end_time(Some(in_secs(100.0)), &now());
        calc.set_held(Some(Held::Time));

        calc.set_health(Some(1000.0), &now());
        assert_eq!(calc.ap, 1000.0);

        calc.set_ap(Some(50.0), &now());
        assert_eq!(calc.health, 50.0);
    }

    #[test]
    fn test_hold_health_solves_other_two() {
        let mut calc = LockCalculator::new();
        calc.set_health(Some(1000.0), &now());
        calc.set_held(Some(Held::Health));

        calc.set_ap(Some(10.0), &now());
        assert_eq!(calc.end_time, Some(in_secs(10_000.0)));

        calc.set_end_time(Some(in_secs(100.0)), &now());
        assert_eq!(calc.ap, 1000.0);
    }

    #[test]
    fn test_changing_held_value_is_noop() {
        let mut calc = LockCalculator::new();
        calc.set_held(Some(Held::Ap));
        calc.set_health(Some(1000.0), &now());
        let before = calc.clone();
        calc.set_ap(Some(100.0), &now());
        assert_eq!(calc.end_time, before.end_time);
        assert_eq!(calc.health, before.health);
    }

    #[test]
    fn test_ap_rounds_up() {
        let mut calc = LockCalculator::new();
        calc.set_ap(Some(7.2), &now());
        assert_eq!(calc.ap, 8.0);
        calc.set_ap(None, &now());
        assert_eq!(calc.ap, 1.0);
    }

    #[test]
    fn test_variant_sets_floor() {
        let mut calc = LockCalculator::new();
        let fire = variant("nf");
        calc.set_variant(Some(fire.clone()), &now());
        assert_eq!(calc.health, fire.base_health as f64);
        assert_eq!(calc.ap_min, 100.0);
        assert_eq!(calc.ap, 100.0);

        // A higher AP survives a lower floor
        calc.set_variant(Some(variant("nr")), &now());
        assert_eq!(calc.ap_min, 2.0);
        assert_eq!(calc.ap, 100.0);

        calc.set_variant(None, &now());
        assert_eq!(calc.health, 1.0);
        assert_eq!(calc.ap_min, 2.0);
    }

    #[test]
    fn test_health_entry_clears_variant() {
        let mut calc = LockCalculator::new();
        calc.set_variant(Some(variant("nr")), &now());
        calc.set_health(None, &now());
        assert_eq!(calc.variant, None);
        assert_eq!(calc.health, 1.0);
    }

    #[test]
    fn test_set_held_none_ignored() {
        let mut calc = LockCalculator::new();
        calc.set_held(Some(Held::Time));
        calc.set_held(None);
        assert_eq!(calc.held, Some(Held::Time));
    }

    #[test]
    fn test_hint() {
        let mut calc = LockCalculator::new();
        assert!(calc.hint().starts_with("Of creature health"));

        calc.set_variant(Some(variant("nr")), &now());
        assert!(calc.hint().starts_with("You'll need to pick"));

        calc.set_held(Some(Held::Ap));
        assert_eq!(
            calc.hint(),
            "ap is held constant; set time to calculate health, or vice versa"
        );
        calc.set_held(Some(Held::Health));
        assert_eq!(
            calc.hint(),
            "health is held constant; set ap to calculate time, or vice versa"
        );
    }
}
