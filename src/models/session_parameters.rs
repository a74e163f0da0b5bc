//! Session parameter model.
//!
//! Describes one defense session: the day, the working window, the
//! per-defense duration, how many rooms to use, and the breaks during
//! which no slot may be generated.

use serde::{Deserialize, Serialize};

use super::TimeSlot;
use crate::error::ModelError;

/// Parameters for a defense session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionParameters {
    /// ISO date label of the session (e.g. "2026-06-15"). The engine
    /// does not interpret it; all slot arithmetic is in minutes from
    /// midnight of this day.
    pub session_date: String,
    /// Session window start (minutes from midnight, inclusive).
    pub start_min: i64,
    /// Session window end (minutes from midnight, exclusive).
    pub end_min: i64,
    /// Length of one defense in minutes. Always positive.
    pub defense_duration_min: i64,
    /// Number of rooms to schedule into. Always positive.
    pub room_count: usize,
    /// Breaks; any candidate slot overlapping one is dropped.
    pub breaks: Vec<TimeSlot>,
}

impl SessionParameters {
    /// Creates session parameters with no breaks.
    ///
    /// Fails on a non-positive duration or room count, or when the
    /// window is empty or inverted.
    pub fn new(
        session_date: impl Into<String>,
        start_min: i64,
        end_min: i64,
        defense_duration_min: i64,
        room_count: usize,
    ) -> Result<Self, ModelError> {
        if defense_duration_min <= 0 {
            return Err(ModelError::InvalidDuration(defense_duration_min));
        }
        if room_count == 0 {
            return Err(ModelError::InvalidRoomCount(room_count));
        }
        if start_min >= end_min {
            return Err(ModelError::InvalidTimeSlot { start_min, end_min });
        }
        Ok(Self {
            session_date: session_date.into(),
            start_min,
            end_min,
            defense_duration_min,
            room_count,
            breaks: Vec::new(),
        })
    }

    /// Adds a break.
    pub fn with_break(mut self, slot: TimeSlot) -> Self {
        self.breaks.push(slot);
        self
    }
}
