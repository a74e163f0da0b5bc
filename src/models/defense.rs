//! Defense model.
//!
//! A thesis defense needing a supervisor, a reviewer, and (once placed
//! in the grid) a chairman, a time slot, and a room. The scheduling
//! fields are plain copies of the assigned cell's values, not references
//! into the grid; they are written only by
//! [`Schedule::assign`](super::Schedule::assign) and
//! [`Schedule::unassign`](super::Schedule::unassign) so the two sides
//! never drift apart.

use serde::{Deserialize, Serialize};

use super::{Person, Room, TimeSlot};
use crate::error::ModelError;

/// A thesis defense to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defense {
    /// Student defending. Used as the defense's reporting key.
    pub student_name: String,
    /// Thesis title.
    pub thesis_title: String,
    /// Supervisor. Differs from the reviewer by email.
    pub supervisor: Person,
    /// Reviewer.
    pub reviewer: Person,
    /// Chairman, set on assignment.
    pub chairman: Option<Person>,
    /// Assigned slot, set on assignment.
    pub time_slot: Option<TimeSlot>,
    /// Assigned room, set on assignment.
    pub room: Option<Room>,
}

impl Defense {
    /// Creates an unscheduled defense.
    ///
    /// Fails on empty student/title or when supervisor and reviewer are
    /// the same person (by email).
    pub fn new(
        student_name: impl Into<String>,
        thesis_title: impl Into<String>,
        supervisor: Person,
        reviewer: Person,
    ) -> Result<Self, ModelError> {
        let student_name = student_name.into();
        let thesis_title = thesis_title.into();
        if student_name.is_empty() {
            return Err(ModelError::EmptyField("student name"));
        }
        if thesis_title.is_empty() {
            return Err(ModelError::EmptyField("thesis title"));
        }
        if supervisor == reviewer {
            return Err(ModelError::SameSupervisorReviewer(supervisor.email));
        }
        Ok(Self {
            student_name,
            thesis_title,
            supervisor,
            reviewer,
            chairman: None,
            time_slot: None,
            room: None,
        })
    }

    /// Whether all three scheduling fields are set.
    pub fn is_scheduled(&self) -> bool {
        self.time_slot.is_some() && self.room.is_some() && self.chairman.is_some()
    }

    /// All committee members: supervisor, reviewer, and the chairman if
    /// one is assigned.
    pub fn committee(&self) -> Vec<&Person> {
        let mut members = vec![&self.supervisor, &self.reviewer];
        if let Some(chairman) = &self.chairman {
            members.push(chairman);
        }
        members
    }

    /// Clears all scheduling fields.
    pub(crate) fn clear_assignment(&mut self) {
        self.time_slot = None;
        self.room = None;
        self.chairman = None;
    }
}
