//! Greedy first-fit schedulers.
//!
//! Both strategies scan free cells in grid order and take the first
//! feasible one; they differ only in how the defense list is ordered
//! before the scan. Neither backtracks: a defense that finds no cell is
//! reported as unresolved and the loop moves on.

use tracing::debug;

use super::{DefenseScheduler, SchedulerBase, SchedulingOutcome};
use crate::models::{Defense, Schedule};

/// Places defenses one by one into the first feasible free cell.
///
/// Returns `false` when no cell fits. A defense is either fully placed
/// (slot, room, and chairman all set by the grid) or not placed at all.
fn place_first_fit(base: &SchedulerBase, schedule: &mut Schedule, defense: &Defense) -> bool {
    for index in schedule.free_cells() {
        if !base.can_place(defense, index, schedule).0 {
            continue;
        }

        let slot = schedule.cells()[index].time_slot;
        let chairman = {
            let scheduled = schedule.scheduled_defenses();
            base.find_available_chairman(defense, &slot, &scheduled).cloned()
        };
        // can_place already proved a chairman exists
        if let Some(chairman) = chairman {
            schedule.assign(index, defense.clone(), chairman);
            return true;
        }
    }
    false
}

fn schedule_in_order(base: &SchedulerBase, ordered: &[&Defense], all: &[Defense]) -> SchedulingOutcome {
    let mut schedule = base.create_empty_schedule();

    for &defense in ordered {
        place_first_fit(base, &mut schedule, defense);
    }

    let conflicts = SchedulerBase::conflicts_for_unplaced(all, &schedule);
    debug!(
        placed = schedule.scheduled_count(),
        unresolved = conflicts.len(),
        "greedy pass finished"
    );
    SchedulingOutcome { schedule, conflicts }
}

/// Greedy scheduler in input order.
///
/// Deterministic, O(defenses × cells), no backtracking.
#[derive(Debug, Clone)]
pub struct SimpleGreedyScheduler {
    base: SchedulerBase,
}

impl SimpleGreedyScheduler {
    /// Creates a new simple greedy scheduler.
    pub fn new(base: SchedulerBase) -> Self {
        Self { base }
    }
}

impl DefenseScheduler for SimpleGreedyScheduler {
    fn schedule(&self, defenses: &[Defense]) -> SchedulingOutcome {
        let ordered: Vec<&Defense> = defenses.iter().collect();
        schedule_in_order(&self.base, &ordered, defenses)
    }

    fn name(&self) -> &str {
        "simple-greedy"
    }
}

/// Greedy scheduler with contention-based precedence.
///
/// Defenses whose principals are heavily shared or heavily constrained
/// are placed first, while degrees of freedom are still high. The sort
/// is stable: equal scores keep input order.
#[derive(Debug, Clone)]
pub struct PriorityGreedyScheduler {
    base: SchedulerBase,
}

impl PriorityGreedyScheduler {
    /// Creates a new priority greedy scheduler.
    pub fn new(base: SchedulerBase) -> Self {
        Self { base }
    }

    /// Contention score: shared principals weigh double, declared
    /// unavailability weighs half.
    fn contention(defense: &Defense, all: &[Defense]) -> f64 {
        let shared_sup = all
            .iter()
            .filter(|d| {
                d.student_name != defense.student_name
                    && d.supervisor.email == defense.supervisor.email
            })
            .count();
        let shared_rev = all
            .iter()
            .filter(|d| {
                d.student_name != defense.student_name
                    && d.reviewer.email == defense.reviewer.email
            })
            .count();
        let unavailability =
            defense.supervisor.unavailable.len() + defense.reviewer.unavailable.len();

        2.0 * shared_sup as f64 + 2.0 * shared_rev as f64 + 0.5 * unavailability as f64
    }
}

impl DefenseScheduler for PriorityGreedyScheduler {
    fn schedule(&self, defenses: &[Defense]) -> SchedulingOutcome {
        let mut ordered: Vec<&Defense> = defenses.iter().collect();
        ordered.sort_by(|a, b| {
            Self::contention(b, defenses).total_cmp(&Self::contention(a, defenses))
        });
        schedule_in_order(&self.base, &ordered, defenses)
    }

    fn name(&self) -> &str {
        "priority-greedy"
    }
}
