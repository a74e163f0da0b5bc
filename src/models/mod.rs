//! Scheduling domain models.
//!
//! Core data types for defense session scheduling: the people and rooms
//! drawn on, the defenses to place, the session parameters that shape
//! the grid, and the grid itself.
//!
//! Identity conventions used throughout the engine:
//!
//! | Type | Identity key |
//! |---------|--------------|
//! | [`Person`] | email |
//! | [`Room`] | number |
//! | [`Defense`] | student name (reporting only) |

mod defense;
mod person;
mod room;
mod schedule;
mod session_parameters;
mod time_slot;

pub use defense::Defense;
pub use person::{Person, Role};
pub use room::Room;
pub use schedule::{Schedule, ScheduleCell};
pub use session_parameters::SessionParameters;
pub use time_slot::TimeSlot;
