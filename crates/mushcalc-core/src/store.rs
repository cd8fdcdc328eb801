//! Event store - the canonical attempt collection
//!
//! The store owns every saved attempt, keeps them sorted by end time, and
//! writes the whole collection to its slot after each mutation. Calendar views
//! are derived on demand.
//!
//! One store serves one session. Two processes sharing a backing slot race
//! with last-write-wins.

use crate::attempt::{Attempt, AttemptPatch};
use crate::calendar::{self, DayBucket, MonthEntry};
use crate::error::Result;
use crate::identity::AttemptId;
use crate::time::MonthKey;
use tracing::{debug, info, warn};

/// A single durable key-value slot holding the serialized collection
pub trait AttemptSlot {
    /// Read the stored payload; `Ok(None)` when nothing was ever written
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored payload
    fn write(&mut self, payload: &str) -> Result<()>;
}

/// Slot kept in memory, for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing payload
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl AttemptSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

/// Owner of the canonical, end-time-sorted attempt collection
pub struct EventStore<S: AttemptSlot> {
    slot: S,
    attempts: Vec<Attempt>,
    selected_month: Option<MonthKey>,
}

impl<S: AttemptSlot> EventStore<S> {
    /// Open a store over `slot`, loading whatever it holds
    ///
    /// Missing, empty or unreadable data loads as an empty collection.
    pub fn open(slot: S) -> Self {
        let attempts = load_attempts(&slot);
        info!(count = attempts.len(), "opened event store");
        let mut store = Self {
            slot,
            attempts,
            selected_month: None,
        };
        store.ensure_selection();
        store
    }

    /// All attempts, ascending by end time
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn get(&self, id: AttemptId) -> Option<&Attempt> {
        self.attempts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Save a new attempt and switch the calendar to its month
    pub fn add(&mut self, attempt: Attempt) -> Result<()> {
        attempt.validate()?;
        let month = attempt.end_time.month();
        debug!(id = %attempt.id, month = %month, "adding attempt");

        let mut next = self.attempts.clone();
        next.push(attempt);
        self.commit(next, Some(month))
    }

    /// Merge `patch` into the attempt with `id`
    ///
    /// Unknown ids are ignored. A patch that would break the attempt's
    /// invariant is rejected and nothing changes.
    pub fn update(&mut self, id: AttemptId, patch: AttemptPatch) -> Result<()> {
        let Some(index) = self.attempts.iter().position(|a| a.id == id) else {
            debug!(id = %id, "update ignored, no such attempt");
            return Ok(());
        };

        let mut next = self.attempts.clone();
        next[index].apply(patch);
        next[index].validate()?;

        debug!(id = %id, "updating attempt");
        self.commit(next, self.selected_month)
    }

    /// Remove the attempt with `id`; unknown ids are ignored
    pub fn delete(&mut self, id: AttemptId) -> Result<()> {
        let mut next = self.attempts.clone();
        next.retain(|a| a.id != id);
        if next.len() == self.attempts.len() {
            debug!(id = %id, "delete ignored, no such attempt");
            return Ok(());
        }

        debug!(id = %id, "deleting attempt");
        self.commit(next, self.selected_month)
    }

    /// The month whose days are shown
    pub fn selected_month(&self) -> Option<MonthKey> {
        self.selected_month
    }

    pub fn set_selected_month(&mut self, month: MonthKey) {
        self.selected_month = Some(month);
    }

    /// Months that contain attempts, ascending
    pub fn months_with_attempts(&self) -> Vec<MonthEntry> {
        calendar::months_with_attempts(&self.attempts)
    }

    /// Day buckets of the selected month; empty when nothing is selected
    pub fn days(&self) -> Vec<DayBucket<'_>> {
        match self.selected_month {
            Some(month) => self.days_for(month),
            None => Vec::new(),
        }
    }

    /// Day buckets of any month
    pub fn days_for(&self, month: MonthKey) -> Vec<DayBucket<'_>> {
        calendar::days_for(&self.attempts, month)
    }

    /// The backing slot
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Select the earliest month when nothing is selected yet
    fn ensure_selection(&mut self) {
        if self.selected_month.is_none() {
            self.selected_month = self.months_with_attempts().first().map(|m| m.key);
        }
    }

    /// Sort and write `next`, then make it current along with `selected`
    ///
    /// A failed write leaves the collection and selection as they were.
    fn commit(&mut self, mut next: Vec<Attempt>, selected: Option<MonthKey>) -> Result<()> {
        next.sort_by_key(|a| a.end_time);
        let payload = serde_json::to_string(&next)?;
        if let Err(e) = self.slot.write(&payload) {
            warn!(error = %e, "could not persist attempts, change discarded");
            return Err(e);
        }
        debug!(count = next.len(), bytes = payload.len(), "persisted attempts");

        self.attempts = next;
        self.selected_month = selected;
        self.ensure_selection();
        Ok(())
    }
}

fn load_attempts<S: AttemptSlot>(slot: &S) -> Vec<Attempt> {
    let payload = match slot.read() {
        Ok(Some(payload)) if !payload.trim().is_empty() => payload,
        Ok(_) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "could not read attempt slot, starting empty");
            return Vec::new();
        }
    };

    let stored: Vec<Attempt> = match serde_json::from_str(&payload) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "stored attempts are corrupted, starting empty");
            return Vec::new();
        }
    };

    let mut attempts: Vec<Attempt> = stored
        .into_iter()
        .map(|mut a| {
            a.start_time.get_or_insert(a.end_time);
            a
        })
        .filter(|a| match a.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "dropping invalid stored attempt");
                false
            }
        })
        .collect();
    attempts.sort_by_key(|a| a.end_time);
    attempts
}
