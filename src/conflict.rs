//! Conflict detection.
//!
//! Pure predicates answering whether a person or defense can occupy a
//! time slot given the defenses already placed. Conflicts are data, not
//! errors: each carries a human-readable message plus optional keys of
//! the offending defense (student name), person (email), and slot so a
//! caller can report precisely what blocked a placement.
//!
//! Identity comparisons are always by person email and room number.

use serde::{Deserialize, Serialize};

use crate::models::{Defense, Person, TimeSlot};

/// A reported reason a placement is infeasible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConflict {
    /// Human-readable description.
    pub message: String,
    /// Student name of the defense involved, if any.
    pub student: Option<String>,
    /// Email of the person involved, if any.
    pub person: Option<String>,
    /// Slot at which the conflict arises, if any.
    pub time_slot: Option<TimeSlot>,
}

impl SchedulingConflict {
    /// Creates a conflict with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            student: None,
            person: None,
            time_slot: None,
        }
    }

    /// Attaches the defense's student name.
    pub fn with_student(mut self, student: impl Into<String>) -> Self {
        self.student = Some(student.into());
        self
    }

    /// Attaches the person's email.
    pub fn with_person(mut self, email: impl Into<String>) -> Self {
        self.person = Some(email.into());
        self
    }

    /// Attaches the slot.
    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slot = Some(slot);
        self
    }
}

/// Checks whether a person is free at `slot`.
///
/// Returns a conflict when the person has declared themselves
/// unavailable, or already sits on the committee of a scheduled defense
/// whose slot overlaps. Only defenses with a set `time_slot` are
/// considered.
pub fn person_conflict(
    person: &Person,
    slot: &TimeSlot,
    scheduled: &[&Defense],
) -> Option<SchedulingConflict> {
    if !person.is_available_at(slot) {
        return Some(
            SchedulingConflict::new(format!(
                "{} is not available at {}-{}",
                person.name, slot.start_min, slot.end_min
            ))
            .with_person(&person.email)
            .with_time_slot(*slot),
        );
    }

    for defense in scheduled {
        let Some(other_slot) = &defense.time_slot else {
            continue;
        };
        if other_slot.overlaps(slot) && defense.committee().contains(&person) {
            return Some(
                SchedulingConflict::new(format!(
                    "{} is already scheduled for {}'s defense",
                    person.name, defense.student_name
                ))
                .with_student(&defense.student_name)
                .with_person(&person.email)
                .with_time_slot(*slot),
            );
        }
    }

    None
}

/// Collects every conflict blocking `defense` at `slot`.
///
/// Checks supervisor and reviewer only; the chairman is resolved
/// separately because it has not been chosen yet at feasibility time.
pub fn defense_conflicts(
    defense: &Defense,
    slot: &TimeSlot,
    scheduled: &[&Defense],
) -> Vec<SchedulingConflict> {
    [&defense.supervisor, &defense.reviewer]
        .into_iter()
        .filter_map(|p| person_conflict(p, slot, scheduled))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, Schedule, ScheduleCell};

    fn person(email: &str) -> Person {
        Person::new("P", email).unwrap()
    }

    fn slot(start: i64, end: i64) -> TimeSlot {
        TimeSlot::new(start, end).unwrap()
    }

    fn defense(student: &str, sup: &str, rev: &str) -> Defense {
        Defense::new(student, "Title", person(sup), person(rev)).unwrap()
    }

    #[test]
    fn test_unavailable_person_conflicts() {
        let p = person("a@x.org").with_unavailable(slot(540, 600));
        let conflict = person_conflict(&p, &slot(570, 630), &[]).unwrap();
        assert_eq!(conflict.person.as_deref(), Some("a@x.org"));
        assert_eq!(conflict.time_slot, Some(slot(570, 630)));

        // Touching the unavailability window is fine
        assert!(person_conflict(&p, &slot(600, 660), &[]).is_none());
    }

    #[test]
    fn test_committee_double_booking_conflicts() {
        let mut grid = Schedule::new();
        grid.push_cell(ScheduleCell::new(slot(540, 600), Room::new("Aula", "101").unwrap()));
        grid.assign(0, defense("S1", "sup@x.org", "rev@x.org"), person("chair@x.org"));
        let scheduled = grid.scheduled_defenses();

        // Every committee member is blocked at an overlapping slot
        for email in ["sup@x.org", "rev@x.org", "chair@x.org"] {
            let c = person_conflict(&person(email), &slot(540, 600), &scheduled).unwrap();
            assert_eq!(c.student.as_deref(), Some("S1"));
        }

        // A non-overlapping slot and an uninvolved person are free
        assert!(person_conflict(&person("sup@x.org"), &slot(600, 660), &scheduled).is_none());
        assert!(person_conflict(&person("other@x.org"), &slot(540, 600), &scheduled).is_none());
    }

    #[test]
    fn test_unscheduled_defenses_ignored() {
        let d = defense("S1", "sup@x.org", "rev@x.org");
        // No time_slot set: cannot block anyone
        assert!(person_conflict(&person("sup@x.org"), &slot(540, 600), &[&d]).is_none());
    }

    #[test]
    fn test_defense_conflicts_covers_supervisor_and_reviewer() {
        let sup = person("sup@x.org").with_unavailable(slot(540, 600));
        let rev = person("rev@x.org").with_unavailable(slot(540, 600));
        let d = Defense::new("S1", "Title", sup, rev).unwrap();

        let conflicts = defense_conflicts(&d, &slot(540, 600), &[]);
        assert_eq!(conflicts.len(), 2);

        let free = defense_conflicts(&d, &slot(600, 660), &[]);
        assert!(free.is_empty());
    }
}
