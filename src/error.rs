//! Construction errors for domain models.
//!
//! Malformed input is rejected fail-fast at construction time, before any
//! scheduling begins. Scheduling *conflicts* are not errors; they are
//! ordinary data returned by the algorithms (see [`crate::conflict`]).

use thiserror::Error;

/// An invariant violation detected while constructing a domain model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A time slot whose start is not strictly before its end.
    #[error("time slot start ({start_min}) must be before end ({end_min})")]
    InvalidTimeSlot { start_min: i64, end_min: i64 },

    /// An email that is empty or structurally implausible.
    #[error("invalid email: {0:?}")]
    InvalidEmail(String),

    /// A required name field left empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// Supervisor and reviewer resolve to the same person.
    #[error("supervisor and reviewer must be different people ({0})")]
    SameSupervisorReviewer(String),

    /// Room capacity must be positive.
    #[error("room capacity must be positive, got {0}")]
    InvalidCapacity(i32),

    /// Defense duration must be positive.
    #[error("defense duration must be positive, got {0} minutes")]
    InvalidDuration(i64),

    /// Room count must be positive.
    #[error("room count must be positive, got {0}")]
    InvalidRoomCount(usize),
}
