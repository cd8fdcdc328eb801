//! Planner form state machine
//!
//! Every input change goes through one reducer: apply the change with
//! [`update_inputs`], then re-solve the active target with
//! [`recompute_derived`]. Both take the whole state and return the next one.

use crate::attempt::Attempt;
use crate::catalog::{Catalog, CreatureVariant};
use crate::codec;
use crate::solver::{self, SolveTarget};
use crate::time::Timestamp;
use tracing::debug;

/// Health shown before anything is entered
pub const DEFAULT_HEALTH: f64 = 1.0;
/// AP shown before anything is entered
pub const DEFAULT_AP: f64 = 2.0;

/// Current planner inputs and the field being solved for
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub variant: Option<CreatureVariant>,
    pub health: f64,
    pub ap: f64,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    /// The field treated as output; None until the user picks one
    pub target: Option<SolveTarget>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            variant: None,
            health: DEFAULT_HEALTH,
            ap: DEFAULT_AP,
            start_time: None,
            end_time: None,
            target: None,
        }
    }
}

/// One user edit
///
/// A `None` payload means the field was cleared.
#[derive(Debug, Clone, PartialEq)]
pub enum FormChange {
    Variant(Option<CreatureVariant>),
    Health(Option<f64>),
    Ap(Option<f64>),
    StartTime(Option<Timestamp>),
    EndTime(Option<Timestamp>),
    Target(Option<SolveTarget>),
    /// Replace the inputs with a saved or decoded attempt
    Load(Attempt),
    /// Back to defaults
    Reset,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a change and re-solve the active target
    pub fn apply(self, change: FormChange) -> Self {
        let resolve = !matches!(change, FormChange::Load(_) | FormChange::Reset);
        let next = update_inputs(self, change);
        if resolve {
            recompute_derived(next)
        } else {
            next
        }
    }

    /// Whether the form describes a complete, savable plan
    pub fn is_valid(&self) -> bool {
        self.variant.is_some()
            && self.start_time.is_some()
            && self.end_time.is_some()
            && self.health > 0.0
            && self.ap > 0.0
    }

    /// Build a savable attempt with a fresh id
    pub fn to_attempt(&self, name: Option<String>) -> Option<Attempt> {
        if !self.is_valid() {
            return None;
        }
        let mut attempt = Attempt::new(self.health, self.ap, self.end_time?);
        attempt.name = name;
        attempt.variant = self.variant.clone();
        attempt.start_time = self.start_time;
        Some(attempt)
    }

    /// Share token of the current plan, once a target has been solved
    pub fn share_token(&self) -> Option<String> {
        self.target?;
        codec::encode(&self.to_attempt(None)?)
    }

    /// Populate the inputs from a pasted token
    ///
    /// A token that does not decode leaves the form as it was.
    pub fn paste_token(self, token: &str, catalog: &Catalog) -> Self {
        match codec::decode(token, catalog) {
            Some(attempt) => self.apply(FormChange::Load(attempt)),
            None => {
                debug!("pasted token did not decode, form unchanged");
                self
            }
        }
    }
}

/// Apply one change to the inputs without solving anything
pub fn update_inputs(mut state: FormState, change: FormChange) -> FormState {
    match change {
        FormChange::Variant(Some(variant)) => {
            state.health = variant.base_health as f64;
            // Only a still-default AP is raised to the variant floor
            if state.ap == DEFAULT_AP {
                state.ap = variant.minimum_ap as f64;
            }
            state.variant = Some(variant);
        }
        FormChange::Variant(None) => {
            state.variant = None;
            state.health = DEFAULT_HEALTH;
        }
        FormChange::Health(health) => state.health = health.unwrap_or(DEFAULT_HEALTH),
        FormChange::Ap(ap) => state.ap = ap.unwrap_or(DEFAULT_AP),
        FormChange::StartTime(start) => state.start_time = start,
        FormChange::EndTime(end) => state.end_time = end,
        FormChange::Target(target) => state.target = target,
        FormChange::Load(attempt) => {
            state.variant = attempt.variant;
            state.health = attempt.health;
            state.ap = attempt.ap;
            state.start_time = attempt.start_time;
            state.end_time = Some(attempt.end_time);
        }
        FormChange::Reset => state = FormState::default(),
    }
    state
}

/// Re-solve the active target from the current inputs
///
/// Leaves the state untouched when no variant is selected, no target is
/// active, or an input the target needs is missing.
pub fn recompute_derived(mut state: FormState) -> FormState {
    if state.variant.is_none() {
        return state;
    }
    let Some(target) = state.target else {
        return state;
    };

    match target {
        SolveTarget::Ap => {
            if let (Some(start), Some(end)) = (state.start_time, state.end_time) {
                state.ap = solver::solve_ap(state.health, &start, &end);
            }
        }
        SolveTarget::Health => {
            if let (Some(start), Some(end)) = (state.start_time, state.end_time) {
                if state.ap > 0.0 {
                    state.health = solver::solve_health(state.ap, &start, &end);
                }
            }
        }
        SolveTarget::StartTime => {
            if let Some(end) = state.end_time {
                if let Some(start) = solver::solve_start_time(state.health, state.ap, &end) {
                    state.start_time = Some(start);
                }
            }
        }
        SolveTarget::EndTime => {
            if let Some(start) = state.start_time {
                if let Some(end) = solver::solve_end_time(state.health, state.ap, &start) {
                    state.end_time = Some(end);
                }
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn variant(key: &str) -> CreatureVariant {
        catalog().get(key).unwrap().clone()
    }

    fn t0() -> Timestamp {
        Timestamp::from_local(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn after(secs: f64) -> Timestamp {
        t0().add_seconds(secs).unwrap()
    }

    fn with_variant() -> FormState {
        FormState::new().apply(FormChange::Variant(Some(variant("sr"))))
    }

    #[test]
    fn test_defaults() {
        let form = FormState::new();
        assert_eq!(form.health, 1.0);
        assert_eq!(form.ap, 2.0);
        assert_eq!(form.target, None);
        assert!(!form.is_valid());
    }

    #[test]
    fn test_variant_sets_health_and_ap_floor() {
        let yellow = variant("ny");
        let form = FormState::new().apply(FormChange::Variant(Some(yellow.clone())));
        assert_eq!(form.health, yellow.base_health as f64);
        assert_eq!(form.ap, 5.0);
    }

    #[test]
    fn test_variant_keeps_customized_ap() {
        let form = FormState::new()
            .apply(FormChange::Ap(Some(40.0)))
            .apply(FormChange::Variant(Some(variant("nf"))));
        assert_eq!(form.ap, 40.0);
    }

    #[test]
    fn test_clearing_fields_restores_defaults() {
        let form = with_variant()
            .apply(FormChange::Health(Some(500.0)))
            .apply(FormChange::Ap(Some(9.0)))
            .apply(FormChange::Health(None))
            .apply(FormChange::Ap(None));
        assert_eq!(form.health, 1.0);
        assert_eq!(form.ap, 2.0);

        let form = with_variant().apply(FormChange::Variant(None));
        assert_eq!(form.variant, None);
        assert_eq!(form.health, 1.0);
    }

    #[test]
    fn test_target_change_solves_immediately() {
        let form = with_variant()
            .apply(FormChange::Health(Some(1000.0)))
            .apply(FormChange::StartTime(Some(t0())))
            .apply(FormChange::EndTime(Some(after(1000.0))))
            .apply(FormChange::Target(Some(SolveTarget::Ap)));
        assert_eq!(form.ap, 100.0);
    }

    #[test]
    fn test_input_change_resolves_target() {
        let form = with_variant()
            .apply(FormChange::Target(Some(SolveTarget::Health)))
            .apply(FormChange::Ap(Some(33.0)))
            .apply(FormChange::StartTime(Some(t0())))
            .apply(FormChange::EndTime(Some(after(10.0))));
        assert_eq!(form.health, 4.0);

        let form = form.apply(FormChange::Ap(Some(100.0)));
        assert_eq!(form.health, 10.0);
    }

    #[test]
    fn test_solve_times() {
        let form = with_variant()
            .apply(FormChange::Health(Some(1000.0)))
            .apply(FormChange::Ap(Some(100.0)))
            .apply(FormChange::EndTime(Some(t0())))
            .apply(FormChange::Target(Some(SolveTarget::StartTime)));
        assert_eq!(form.start_time.unwrap().unix(), t0().unix() - 1000);

        let form = form
            .apply(FormChange::Target(Some(SolveTarget::EndTime)))
            .apply(FormChange::Ap(Some(50.0)));
        assert_eq!(form.end_time.unwrap().unix(), t0().unix() + 1000);
    }

    #[test]
    fn test_missing_inputs_leave_outputs_untouched() {
        let form = with_variant()
            .apply(FormChange::Ap(Some(7.0)))
            .apply(FormChange::StartTime(Some(t0())));
        let solved = recompute_derived(FormState {
            target: Some(SolveTarget::Ap),
            ..form.clone()
        });
        assert_eq!(solved.ap, 7.0);

        let cleared = FormState {
            ap: 0.0,
            target: Some(SolveTarget::EndTime),
            ..form
        };
        assert_eq!(recompute_derived(cleared.clone()), cleared);
    }

    #[test]
    fn test_no_solve_without_variant() {
        let form = FormState::new()
            .apply(FormChange::Health(Some(1000.0)))
            .apply(FormChange::StartTime(Some(t0())))
            .apply(FormChange::EndTime(Some(after(1000.0))))
            .apply(FormChange::Target(Some(SolveTarget::Ap)));
        assert_eq!(form.ap, 2.0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let form = with_variant()
            .apply(FormChange::Health(Some(1000.0)))
            .apply(FormChange::StartTime(Some(t0())))
            .apply(FormChange::EndTime(Some(after(30.0))))
            .apply(FormChange::Target(Some(SolveTarget::Ap)));
        assert_eq!(recompute_derived(form.clone()), form);
    }

    #[test]
    fn test_to_attempt() {
        assert!(with_variant().to_attempt(None).is_none());

        let form = with_variant()
            .apply(FormChange::StartTime(Some(t0())))
            .apply(FormChange::EndTime(Some(after(3600.0))));
        let attempt = form.to_attempt(Some("Raid".into())).unwrap();
        assert_eq!(attempt.name.as_deref(), Some("Raid"));
        assert_eq!(attempt.variant, form.variant);
        assert_eq!(attempt.start_time, Some(t0()));
        assert!(attempt.validate().is_ok());

        let other = form.to_attempt(None).unwrap();
        assert_ne!(attempt.id, other.id);
    }

    #[test]
    fn test_share_and_paste_token() {
        let form = with_variant()
            .apply(FormChange::Target(Some(SolveTarget::Ap)))
            .apply(FormChange::StartTime(Some(t0())))
            .apply(FormChange::EndTime(Some(after(3600.0))));
        let token = form.share_token().unwrap();

        let pasted = FormState::new().paste_token(&token, &catalog());
        assert_eq!(pasted.variant, form.variant);
        assert_eq!(pasted.health, form.health);
        assert_eq!(pasted.ap, form.ap.ceil());
        assert_eq!(pasted.start_time, form.start_time);
        assert_eq!(pasted.end_time, form.end_time);
    }

    #[test]
    fn test_share_token_needs_target() {
        let form = with_variant()
            .apply(FormChange::StartTime(Some(t0())))
            .apply(FormChange::EndTime(Some(after(3600.0))));
        assert!(form.is_valid());
        assert_eq!(form.share_token(), None);

        let solved = form.apply(FormChange::Target(Some(SolveTarget::Ap)));
        assert!(solved.share_token().is_some());
    }

    #[test]
    fn test_paste_bad_token_keeps_fields() {
        let form = with_variant().apply(FormChange::Ap(Some(12.0)));
        let pasted = form.clone().paste_token("not-a-token", &catalog());
        assert_eq!(pasted, form);
    }

    #[test]
    fn test_reset() {
        let form = with_variant()
            .apply(FormChange::Target(Some(SolveTarget::Ap)))
            .apply(FormChange::Reset);
        assert_eq!(form, FormState::default());
    }
}
