//! Local-search schedule optimizer.
//!
//! Improves an already-placed schedule against a weighted multi-term
//! cost function without ever reducing the number of placed defenses.
//! Each pass runs a full swap scan (all cell pairs) followed by a move
//! scan (occupied cell into a free cell, first improvement ends the
//! scan); the loop stops at the first pass with no improvement, or at
//! the pass cap.
//!
//! A candidate move is committed only when it is feasible (conflict
//! re-check plus a fresh chairman search for every relocated defense)
//! and strictly lowers the best cost seen so far. Anything else is
//! reverted exactly to the pre-move state, original chairman included.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::models::{Defense, Person, Schedule};
use crate::scheduler::SchedulerBase;

/// Cost of a schedule with nothing placed. Large so the optimizer never
/// prefers emptying the grid.
pub const EMPTY_SCHEDULE_COST: f64 = 10_000.0;

/// Default cap on optimization passes.
pub const DEFAULT_MAX_PASSES: usize = 300;

/// Weights for the cost terms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationWeights {
    /// Idle-gap minutes per room and per committee member.
    pub gap: f64,
    /// Bonus for shared people between consecutive rounds.
    pub group: f64,
    /// Overall session span in minutes.
    pub span: f64,
    /// Bonus for contiguous same-room chairman runs.
    pub chair_block: f64,
}

impl Default for OptimizationWeights {
    fn default() -> Self {
        Self {
            gap: 1.0,
            group: 1.0,
            span: 0.5,
            chair_block: 1.0,
        }
    }
}

/// Occupant of a cell captured before a move, for exact reverts.
type Saved = Option<(Defense, Person)>;

/// Swap/move local search over one schedule.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptimizer {
    weights: OptimizationWeights,
    max_passes: usize,
}

impl ScheduleOptimizer {
    /// Creates an optimizer with default weights and pass cap.
    pub fn new() -> Self {
        Self {
            weights: OptimizationWeights::default(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Sets the term weights.
    pub fn with_weights(mut self, weights: OptimizationWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the pass cap.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Runs the local search in place and returns the final cost.
    ///
    /// Both neighborhood moves relocate existing occupants, so the
    /// placed-defense count can never decrease.
    pub fn optimize(&self, base: &SchedulerBase, schedule: &mut Schedule) -> f64 {
        let mut best_cost = self.cost(schedule);
        let cell_count = schedule.cell_count();

        for pass in 0..self.max_passes {
            let mut improved = false;

            // Full swap scan; accepted swaps stay and scanning continues.
            for i in 0..cell_count {
                for j in (i + 1)..cell_count {
                    let Some(saved) = Self::apply_swap(base, schedule, i, j) else {
                        continue;
                    };
                    let cost = self.cost(schedule);
                    if cost < best_cost {
                        best_cost = cost;
                        improved = true;
                        trace!(pass, i, j, cost, "swap accepted");
                    } else {
                        Self::undo_swap(schedule, i, j, saved);
                    }
                }
            }

            // Move scan; the first improvement ends the scan.
            'moves: for src in 0..cell_count {
                if schedule.cells()[src].is_free() {
                    continue;
                }
                for dst in schedule.free_cells() {
                    let Some(saved) = Self::apply_move(base, schedule, src, dst) else {
                        continue;
                    };
                    let cost = self.cost(schedule);
                    if cost < best_cost {
                        best_cost = cost;
                        improved = true;
                        trace!(pass, src, dst, cost, "move accepted");
                        break 'moves;
                    }
                    Self::undo_move(schedule, src, dst, saved);
                }
            }

            if !improved {
                debug!(passes = pass, cost = best_cost, "local optimum reached");
                break;
            }
        }

        best_cost
    }

    // --- moves ---

    fn save(schedule: &Schedule, index: usize) -> Saved {
        let defense = schedule.cells()[index].occupant()?;
        let chairman = defense.chairman.clone()?;
        Some((defense.clone(), chairman))
    }

    /// Puts saved occupants back into their original cells. The cells
    /// must be free.
    fn restore(schedule: &mut Schedule, i: usize, a: Saved, j: usize, b: Saved) {
        if let Some((defense, chairman)) = a {
            schedule.assign(i, defense, chairman);
        }
        if let Some((defense, chairman)) = b {
            schedule.assign(j, defense, chairman);
        }
    }

    /// Exchanges the occupants of two cells (one side may be empty).
    ///
    /// Every relocated defense is re-validated at its new cell and gets
    /// a freshly selected chairman. Returns the saved pre-swap
    /// occupants on success, `None` after a full revert.
    fn apply_swap(base: &SchedulerBase, schedule: &mut Schedule, i: usize, j: usize) -> Option<(Saved, Saved)> {
        let saved_a = Self::save(schedule, i);
        let saved_b = Self::save(schedule, j);
        if saved_a.is_none() && saved_b.is_none() {
            return None;
        }

        let defense_a = schedule.take(i);
        let defense_b = schedule.take(j);

        let feasible = defense_a
            .as_ref()
            .map_or(true, |d| base.can_place(d, j, schedule).0)
            && defense_b
                .as_ref()
                .map_or(true, |d| base.can_place(d, i, schedule).0);
        if !feasible {
            Self::restore(schedule, i, saved_a, j, saved_b);
            return None;
        }

        if let Some(defense) = defense_a {
            let slot = schedule.cells()[j].time_slot;
            let chairman = {
                let scheduled = schedule.scheduled_defenses();
                base.find_available_chairman(&defense, &slot, &scheduled).cloned()
            };
            match chairman {
                Some(chairman) => schedule.assign(j, defense, chairman),
                None => {
                    Self::restore(schedule, i, saved_a, j, saved_b);
                    return None;
                }
            }
        }

        if let Some(defense) = defense_b {
            let slot = schedule.cells()[i].time_slot;
            let chairman = {
                let scheduled = schedule.scheduled_defenses();
                base.find_available_chairman(&defense, &slot, &scheduled).cloned()
            };
            match chairman {
                Some(chairman) => schedule.assign(i, defense, chairman),
                None => {
                    // The first leg may already be in place; clear it too.
                    schedule.take(j);
                    Self::restore(schedule, i, saved_a, j, saved_b);
                    return None;
                }
            }
        }

        Some((saved_a, saved_b))
    }

    /// Relocates the occupant of `src` into the free cell `dst`.
    ///
    /// Returns the saved pre-move occupant of `src` on success, `None`
    /// after a full revert.
    fn apply_move(base: &SchedulerBase, schedule: &mut Schedule, src: usize, dst: usize) -> Option<(Defense, Person)> {
        let saved = Self::save(schedule, src)?;
        if !schedule.cells()[dst].is_free() {
            return None;
        }

        let defense = schedule.take(src)?;
        if !base.can_place(&defense, dst, schedule).0 {
            schedule.assign(src, defense, saved.1);
            return None;
        }

        let slot = schedule.cells()[dst].time_slot;
        let chairman = {
            let scheduled = schedule.scheduled_defenses();
            base.find_available_chairman(&defense, &slot, &scheduled).cloned()
        };
        match chairman {
            Some(chairman) => {
                schedule.assign(dst, defense, chairman);
                Some(saved)
            }
            None => {
                schedule.assign(src, defense, saved.1);
                None
            }
        }
    }

    fn undo_move(schedule: &mut Schedule, src: usize, dst: usize, saved: (Defense, Person)) {
        schedule.take(dst);
        schedule.assign(src, saved.0, saved.1);
    }

    /// Reverts a committed swap: clears both cells, then puts the saved
    /// occupants back where they were.
    fn undo_swap(schedule: &mut Schedule, i: usize, j: usize, saved: (Saved, Saved)) {
        schedule.take(i);
        schedule.take(j);
        Self::restore(schedule, i, saved.0, j, saved.1);
    }

    // --- cost ---

    /// Weighted total cost; lower is better. An empty schedule costs the
    /// fixed [`EMPTY_SCHEDULE_COST`] sentinel.
    pub fn cost(&self, schedule: &Schedule) -> f64 {
        if schedule.scheduled_count() == 0 {
            return EMPTY_SCHEDULE_COST;
        }
        self.weights.gap * Self::gap_penalty(schedule)
            + self.weights.group * Self::group_bonus(schedule)
            + self.weights.chair_block * Self::chairman_block_bonus(schedule)
            + self.weights.span * Self::span_penalty(schedule)
    }

    /// Sum of positive gaps (minutes) in every room timeline and every
    /// committee member timeline.
    fn gap_penalty(schedule: &Schedule) -> f64 {
        fn timeline_gaps(mut intervals: Vec<(i64, i64)>) -> f64 {
            intervals.sort_unstable();
            intervals
                .windows(2)
                .map(|w| (w[1].0 - w[0].1).max(0) as f64)
                .sum()
        }

        let mut by_room: BTreeMap<&str, Vec<(i64, i64)>> = BTreeMap::new();
        let mut by_person: BTreeMap<&str, Vec<(i64, i64)>> = BTreeMap::new();

        for cell in schedule.cells() {
            let Some(defense) = cell.occupant() else {
                continue;
            };
            let interval = (cell.time_slot.start_min, cell.time_slot.end_min);
            by_room.entry(&cell.room.number).or_default().push(interval);
            for person in defense.committee() {
                by_person.entry(&person.email).or_default().push(interval);
            }
        }

        by_room.into_values().map(timeline_gaps).sum::<f64>()
            + by_person.into_values().map(timeline_gaps).sum::<f64>()
    }

    /// −0.5 per person shared between two chronologically adjacent
    /// start-time rounds.
    fn group_bonus(schedule: &Schedule) -> f64 {
        let mut rounds: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
        for cell in schedule.cells() {
            let Some(defense) = cell.occupant() else {
                continue;
            };
            let emails = rounds.entry(cell.time_slot.start_min).or_default();
            for person in defense.committee() {
                if !emails.contains(&person.email.as_str()) {
                    emails.push(&person.email);
                }
            }
        }

        let rounds: Vec<&Vec<&str>> = rounds.values().collect();
        let mut bonus = 0.0;
        for pair in rounds.windows(2) {
            let overlap = pair[1].iter().filter(|e| pair[0].contains(e)).count();
            bonus -= overlap as f64 * 0.5;
        }
        bonus
    }

    /// −0.75 × (run length − 1) for every maximal run of back-to-back,
    /// same-room cells chaired by the same person.
    fn chairman_block_bonus(schedule: &Schedule) -> f64 {
        let mut by_chairman: BTreeMap<&str, Vec<(i64, i64, &str)>> = BTreeMap::new();
        for cell in schedule.cells() {
            let Some(chairman) = cell.occupant().and_then(|d| d.chairman.as_ref()) else {
                continue;
            };
            by_chairman.entry(&chairman.email).or_default().push((
                cell.time_slot.start_min,
                cell.time_slot.end_min,
                &cell.room.number,
            ));
        }

        let mut bonus = 0.0;
        for mut cells in by_chairman.into_values() {
            cells.sort_unstable();
            let mut run = 1;
            for pair in cells.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.1 == b.0 && a.2 == b.2 {
                    run += 1;
                } else {
                    if run > 1 {
                        bonus -= (run - 1) as f64 * 0.75;
                    }
                    run = 1;
                }
            }
            if run > 1 {
                bonus -= (run - 1) as f64 * 0.75;
            }
        }
        bonus
    }

    /// Latest occupied end minus earliest occupied start, in minutes.
    fn span_penalty(schedule: &Schedule) -> f64 {
        let occupied: Vec<_> = schedule
            .cells()
            .iter()
            .filter(|c| !c.is_free())
            .map(|c| c.time_slot)
            .collect();
        let first = occupied.iter().map(|s| s.start_min).min().unwrap_or(0);
        let last = occupied.iter().map(|s| s.end_min).max().unwrap_or(0);
        (last - first) as f64
    }
}
