//! Planned attempts

use crate::catalog::CreatureVariant;
use crate::error::{Error, Result};
use crate::identity::AttemptId;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A saved, solved plan against one creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    /// Assigned on creation, stable for the attempt's lifetime
    pub id: AttemptId,
    /// Free-text label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The creature this attempt targets
    #[serde(default)]
    pub variant: Option<CreatureVariant>,
    pub health: f64,
    /// Squad damage rate
    pub ap: f64,
    /// None means "starting now"
    #[serde(default)]
    pub start_time: Option<Timestamp>,
    pub end_time: Timestamp,
}

impl Attempt {
    /// Create a new attempt with a fresh ID
    pub fn new(health: f64, ap: f64, end_time: Timestamp) -> Self {
        Self {
            id: AttemptId::new(),
            name: None,
            variant: None,
            health,
            ap,
            start_time: None,
            end_time,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_variant(mut self, variant: CreatureVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_start(mut self, start_time: Timestamp) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Check the invariant every persisted attempt satisfies
    pub fn validate(&self) -> Result<()> {
        if self.health.is_nan() || self.health <= 0.0 {
            return Err(Error::InvalidAttempt(format!(
                "{}: health must be positive, got {}",
                self.id, self.health
            )));
        }
        if self.ap.is_nan() || self.ap <= 0.0 {
            return Err(Error::InvalidAttempt(format!(
                "{}: AP must be positive, got {}",
                self.id, self.ap
            )));
        }
        if let Some(start) = self.start_time {
            if start > self.end_time {
                return Err(Error::InvalidAttempt(format!(
                    "{}: start {} is after end {}",
                    self.id, start, self.end_time
                )));
            }
        }
        Ok(())
    }

    /// Merge a partial update into this attempt
    pub fn apply(&mut self, patch: AttemptPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(variant) = patch.variant {
            self.variant = Some(variant);
        }
        if let Some(health) = patch.health {
            self.health = health;
        }
        if let Some(ap) = patch.ap {
            self.ap = ap;
        }
        if let Some(start) = patch.start_time {
            self.start_time = Some(start);
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
    }
}

/// Partial update for an existing attempt; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttemptPatch {
    pub name: Option<String>,
    pub variant: Option<CreatureVariant>,
    pub health: Option<f64>,
    pub ap: Option<f64>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl AttemptPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn variant(mut self, variant: CreatureVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn health(mut self, health: f64) -> Self {
        self.health = Some(health);
        self
    }

    pub fn ap(mut self, ap: f64) -> Self {
        self.ap = Some(ap);
        self
    }

    pub fn start_time(mut self, start: Timestamp) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn end_time(mut self, end: Timestamp) -> Self {
        self.end_time = Some(end);
        self
    }
}
