//! Time slot model.
//!
//! Defines the interval type every other component measures against:
//! defense slots, breaks, and personal unavailability windows.
//!
//! # Time Model
//! All times are in minutes relative to a scheduling epoch, typically
//! midnight of the session date. The consumer defines what epoch means;
//! the engine only ever compares and subtracts these values.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A time interval [start, end) in epoch-relative minutes.
///
/// Half-open: includes start, excludes end. Two slots that merely touch
/// (`a.end_min == b.start_min`) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Interval start (minutes, inclusive).
    pub start_min: i64,
    /// Interval end (minutes, exclusive).
    pub end_min: i64,
}

impl TimeSlot {
    /// Creates a new time slot.
    ///
    /// Fails if `start_min` is not strictly before `end_min`.
    pub fn new(start_min: i64, end_min: i64) -> Result<Self, ModelError> {
        if start_min >= end_min {
            return Err(ModelError::InvalidTimeSlot { start_min, end_min });
        }
        Ok(Self { start_min, end_min })
    }

    /// Duration of this slot in minutes.
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Whether two slots overlap.
    ///
    /// Closed-open semantics: a slot ending exactly when another starts
    /// does not overlap it.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }
}
