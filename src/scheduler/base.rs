//! Shared facilities for scheduling strategies.
//!
//! Slot generation, empty-grid construction, chairman ranking and
//! search, and the single-cell feasibility check. Every concrete
//! strategy composes a [`SchedulerBase`]; the backtracking search also
//! uses it to rebuild a fresh grid when replaying its best snapshot.

use crate::conflict::{defense_conflicts, person_conflict, SchedulingConflict};
use crate::models::{Defense, Person, Room, Schedule, ScheduleCell, SessionParameters, TimeSlot};

/// Shared state of one scheduling run: the session shape, the rooms,
/// and the chairman-eligible pool.
///
/// The pool is expected to be pre-filtered to persons carrying the
/// `Chairman` role; [`crate::validation::validate_input`] checks this
/// precondition. The ranking below does not re-filter by role.
#[derive(Debug, Clone)]
pub struct SchedulerBase {
    /// Session parameters.
    pub params: SessionParameters,
    /// Rooms, in configured order. Only the first `params.room_count`
    /// are used.
    pub rooms: Vec<Room>,
    /// Chairman-eligible persons, in caller order.
    pub chairmen: Vec<Person>,
}

impl SchedulerBase {
    /// Creates a new base.
    pub fn new(params: SessionParameters, rooms: Vec<Room>, chairmen: Vec<Person>) -> Self {
        Self {
            params,
            rooms,
            chairmen,
        }
    }

    /// Generates the ordered sequence of candidate time slots.
    ///
    /// Slots advance in `defense_duration_min` increments from the
    /// window start; a slot that would end past the window is not
    /// produced. A slot overlapping any break is dropped entirely, not
    /// shifted; the cursor still advances by one duration.
    pub fn generate_time_slots(&self) -> Vec<TimeSlot> {
        let mut slots = Vec::new();
        let duration = self.params.defense_duration_min;
        let mut current = self.params.start_min;

        while current + duration <= self.params.end_min {
            // Construction is infallible here: duration is validated positive.
            let slot = TimeSlot {
                start_min: current,
                end_min: current + duration,
            };
            if !self.params.breaks.iter().any(|b| b.overlaps(&slot)) {
                slots.push(slot);
            }
            current += duration;
        }

        slots
    }

    /// Builds the empty grid: every generated slot crossed with the
    /// first `room_count` rooms.
    ///
    /// Fewer rooms than `room_count` truncates silently. Cell order is
    /// slot-major, rooms in configured order.
    pub fn create_empty_schedule(&self) -> Schedule {
        let mut schedule = Schedule::new();
        let rooms = &self.rooms[..self.params.room_count.min(self.rooms.len())];

        for slot in self.generate_time_slots() {
            for room in rooms {
                schedule.push_cell(ScheduleCell::new(slot, room.clone()));
            }
        }

        schedule
    }

    /// Ranks the chairman pool for a defense: persons outside the
    /// defense's committee first, ties broken by email for determinism.
    ///
    /// Supervisor and reviewer stay in the list as a last-resort
    /// fallback; committee membership only demotes, never excludes.
    pub fn chairman_candidates(&self, defense: &Defense) -> Vec<&Person> {
        let mut candidates: Vec<&Person> = self.chairmen.iter().collect();
        candidates.sort_by(|a, b| {
            let a_key = (Self::on_committee(defense, a), a.email.as_str());
            let b_key = (Self::on_committee(defense, b), b.email.as_str());
            a_key.cmp(&b_key)
        });
        candidates
    }

    fn on_committee(defense: &Defense, person: &Person) -> bool {
        person.email == defense.supervisor.email || person.email == defense.reviewer.email
    }

    /// First ranked candidate with no conflict at `slot`, or `None`.
    pub fn find_available_chairman(
        &self,
        defense: &Defense,
        slot: &TimeSlot,
        scheduled: &[&Defense],
    ) -> Option<&Person> {
        self.chairman_candidates(defense)
            .into_iter()
            .find(|c| person_conflict(c, slot, scheduled).is_none())
    }

    /// Checks whether `defense` can go into the cell at `index`.
    ///
    /// True iff supervisor and reviewer are conflict-free at the cell's
    /// slot and a chairman can be found for it. A missing chairman is
    /// itself reported as a conflict.
    pub fn can_place(
        &self,
        defense: &Defense,
        index: usize,
        schedule: &Schedule,
    ) -> (bool, Vec<SchedulingConflict>) {
        let slot = schedule.cells()[index].time_slot;
        let scheduled = schedule.scheduled_defenses();

        let conflicts = defense_conflicts(defense, &slot, &scheduled);
        if !conflicts.is_empty() {
            return (false, conflicts);
        }

        if self.find_available_chairman(defense, &slot, &scheduled).is_none() {
            let conflict = SchedulingConflict::new(format!(
                "No chairman available for {}-{}",
                slot.start_min, slot.end_min
            ))
            .with_student(&defense.student_name)
            .with_time_slot(slot);
            return (false, vec![conflict]);
        }

        (true, Vec::new())
    }

    /// Free cells where `defense` can be placed, ordered by
    /// (slot start, room number) ascending.
    pub(crate) fn feasible_cells(&self, defense: &Defense, schedule: &Schedule) -> Vec<usize> {
        let mut feasible: Vec<usize> = schedule
            .free_cells()
            .into_iter()
            .filter(|&i| self.can_place(defense, i, schedule).0)
            .collect();

        feasible.sort_by(|&a, &b| {
            let ca = &schedule.cells()[a];
            let cb = &schedule.cells()[b];
            (ca.time_slot.start_min, ca.room.number.as_str())
                .cmp(&(cb.time_slot.start_min, cb.room.number.as_str()))
        });

        feasible
    }

    /// One conflict per input defense that is absent from the grid.
    pub(crate) fn conflicts_for_unplaced(
        defenses: &[Defense],
        schedule: &Schedule,
    ) -> Vec<SchedulingConflict> {
        let placed: Vec<&str> = schedule
            .scheduled_defenses()
            .iter()
            .map(|d| d.student_name.as_str())
            .collect();

        defenses
            .iter()
            .filter(|d| !placed.contains(&d.student_name.as_str()))
            .map(|d| {
                SchedulingConflict::new(format!(
                    "Could not schedule defense for {}",
                    d.student_name
                ))
                .with_student(&d.student_name)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn person(email: &str) -> Person {
        Person::new("P", email).unwrap()
    }

    fn chairman(email: &str) -> Person {
        person(email).with_role(Role::Chairman)
    }

    fn room(number: &str) -> Room {
        Room::new("Room", number).unwrap()
    }

    fn params(start: i64, end: i64, duration: i64, rooms: usize) -> SessionParameters {
        SessionParameters::new("2026-06-15", start, end, duration, rooms).unwrap()
    }

    fn defense(student: &str, sup: &str, rev: &str) -> Defense {
        Defense::new(student, "Title", person(sup), person(rev)).unwrap()
    }

    #[test]
    fn test_slot_generation_fills_window() {
        let base = SchedulerBase::new(params(540, 720, 60, 1), vec![room("101")], vec![]);
        let slots = base.generate_time_slots();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], TimeSlot::new(540, 600).unwrap());
        assert_eq!(slots[2], TimeSlot::new(660, 720).unwrap());
    }

    #[test]
    fn test_partial_trailing_slot_not_produced() {
        // 540..700 fits two 60-minute slots; the third would end at 720 > 700
        let base = SchedulerBase::new(params(540, 700, 60, 1), vec![room("101")], vec![]);
        assert_eq!(base.generate_time_slots().len(), 2);
    }

    #[test]
    fn test_break_drops_slot_without_shifting() {
        let p = params(540, 780, 60, 1).with_break(TimeSlot::new(630, 660).unwrap());
        let base = SchedulerBase::new(p, vec![room("101")], vec![]);
        let slots = base.generate_time_slots();

        // 600..660 overlaps the break and is dropped; 660..720 survives
        assert_eq!(slots.len(), 3);
        for slot in &slots {
            assert!(!slot.overlaps(&TimeSlot::new(630, 660).unwrap()));
        }
        assert_eq!(slots[1], TimeSlot::new(660, 720).unwrap());
    }

    #[test]
    fn test_empty_schedule_cell_count() {
        let base = SchedulerBase::new(
            params(540, 720, 60, 2),
            vec![room("101"), room("102"), room("103")],
            vec![],
        );
        // 3 slots x min(2, 3) rooms
        assert_eq!(base.create_empty_schedule().cell_count(), 6);
    }

    #[test]
    fn test_room_count_truncates_silently() {
        let base = SchedulerBase::new(params(540, 720, 60, 5), vec![room("101")], vec![]);
        // Only one room exists despite room_count = 5
        assert_eq!(base.create_empty_schedule().cell_count(), 3);
    }

    #[test]
    fn test_chairman_candidates_demote_committee() {
        let base = SchedulerBase::new(
            params(540, 720, 60, 1),
            vec![room("101")],
            vec![chairman("sup@x.org"), chairman("b@x.org"), chairman("a@x.org")],
        );
        let d = defense("S", "sup@x.org", "rev@x.org");

        let ranked: Vec<&str> = base
            .chairman_candidates(&d)
            .iter()
            .map(|p| p.email.as_str())
            .collect();
        // Outsiders first in email order, committee member last
        assert_eq!(ranked, vec!["a@x.org", "b@x.org", "sup@x.org"]);
    }

    #[test]
    fn test_find_available_chairman_skips_busy() {
        let busy = chairman("a@x.org").with_unavailable(TimeSlot::new(540, 600).unwrap());
        let base = SchedulerBase::new(
            params(540, 720, 60, 1),
            vec![room("101")],
            vec![busy, chairman("b@x.org")],
        );
        let d = defense("S", "sup@x.org", "rev@x.org");

        let found = base
            .find_available_chairman(&d, &TimeSlot::new(540, 600).unwrap(), &[])
            .unwrap();
        assert_eq!(found.email, "b@x.org");
    }

    #[test]
    fn test_can_place_reports_missing_chairman() {
        let base = SchedulerBase::new(params(540, 720, 60, 1), vec![room("101")], vec![]);
        let schedule = base.create_empty_schedule();
        let d = defense("S", "sup@x.org", "rev@x.org");

        let (ok, conflicts) = base.can_place(&d, 0, &schedule);
        assert!(!ok);
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].message.contains("No chairman"));
        assert_eq!(conflicts[0].student.as_deref(), Some("S"));
    }

    #[test]
    fn test_can_place_ok() {
        let base = SchedulerBase::new(
            params(540, 720, 60, 1),
            vec![room("101")],
            vec![chairman("c@x.org")],
        );
        let schedule = base.create_empty_schedule();
        let d = defense("S", "sup@x.org", "rev@x.org");

        let (ok, conflicts) = base.can_place(&d, 0, &schedule);
        assert!(ok);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_feasible_cells_ordered_by_start_then_room() {
        let base = SchedulerBase::new(
            params(540, 660, 60, 2),
            vec![room("102"), room("101")],
            vec![chairman("c@x.org")],
        );
        let schedule = base.create_empty_schedule();
        let d = defense("S", "sup@x.org", "rev@x.org");

        let cells = base.feasible_cells(&d, &schedule);
        let keys: Vec<(i64, &str)> = cells
            .iter()
            .map(|&i| {
                let c = &schedule.cells()[i];
                (c.time_slot.start_min, c.room.number.as_str())
            })
            .collect();
        // Room "101" sorts before "102" within each slot even though the
        // grid lists "102" first
        assert_eq!(
            keys,
            vec![(540, "101"), (540, "102"), (600, "101"), (600, "102")]
        );
    }
}
