//! Schedule grid model.
//!
//! The grid spans every (generated time slot × configured room) pair.
//! It is the sole owner of placed defenses: a cell holds its occupant by
//! value, and the occupant's `time_slot`/`room`/`chairman` fields are
//! plain copies of the cell's values. Both sides are written only by
//! [`Schedule::assign`] and the removal operations, which keeps them
//! consistent and avoids any cyclic ownership.

use serde::{Deserialize, Serialize};

use super::{Defense, Person, Room, TimeSlot};

/// One (time slot, room) cell in the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCell {
    /// The cell's time slot.
    pub time_slot: TimeSlot,
    /// The cell's room.
    pub room: Room,
    occupant: Option<Defense>,
}

impl ScheduleCell {
    /// Creates a free cell.
    pub fn new(time_slot: TimeSlot, room: Room) -> Self {
        Self {
            time_slot,
            room,
            occupant: None,
        }
    }

    /// Whether no defense occupies this cell.
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// The occupying defense, if any.
    pub fn occupant(&self) -> Option<&Defense> {
        self.occupant.as_ref()
    }
}

/// The schedule grid: an ordered collection of cells.
///
/// Cell order is slot-major (time ascending, then rooms in configured
/// order), as produced by
/// [`SchedulerBase::create_empty_schedule`](crate::scheduler::SchedulerBase::create_empty_schedule).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    cells: Vec<ScheduleCell>,
}

impl Schedule {
    /// Creates an empty grid with no cells.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_cell(&mut self, cell: ScheduleCell) {
        self.cells.push(cell);
    }

    /// All cells, in grid order.
    pub fn cells(&self) -> &[ScheduleCell] {
        &self.cells
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Places a defense into the cell at `index` with the given chairman.
    ///
    /// Copies the cell's slot and room plus the chairman into the
    /// defense before storing it. Assigning into an occupied cell is a
    /// no-op that keeps the existing occupant, so a replayed assignment
    /// with a duplicate (slot, room) key cannot drop a defense.
    pub fn assign(&mut self, index: usize, mut defense: Defense, chairman: Person) {
        let cell = &mut self.cells[index];
        if !cell.is_free() {
            return;
        }
        defense.time_slot = Some(cell.time_slot);
        defense.room = Some(cell.room.clone());
        defense.chairman = Some(chairman);
        cell.occupant = Some(defense);
    }

    /// Removes and returns the occupant of the cell at `index`, with its
    /// scheduling fields cleared.
    pub fn take(&mut self, index: usize) -> Option<Defense> {
        let mut defense = self.cells[index].occupant.take()?;
        defense.clear_assignment();
        Some(defense)
    }

    /// Removes the defense identified by `student_name` from the grid.
    ///
    /// Returns the defense with its scheduling fields cleared, or `None`
    /// if no cell holds it.
    pub fn unassign(&mut self, student_name: &str) -> Option<Defense> {
        let index = self
            .cells
            .iter()
            .position(|c| c.occupant().is_some_and(|d| d.student_name == student_name))?;
        self.take(index)
    }

    /// All placed defenses, in grid order.
    pub fn scheduled_defenses(&self) -> Vec<&Defense> {
        self.cells.iter().filter_map(|c| c.occupant()).collect()
    }

    /// Number of placed defenses.
    pub fn scheduled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_free()).count()
    }

    /// Indices of all free cells, in grid order.
    pub fn free_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_free())
            .map(|(i, _)| i)
            .collect()
    }

    /// Finds the cell with the given slot and room number.
    pub fn find_cell(&self, time_slot: &TimeSlot, room_number: &str) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.time_slot == *time_slot && c.room.number == room_number)
    }
}
