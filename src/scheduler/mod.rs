//! Scheduling algorithms.
//!
//! Three strategies behind one trait, sharing [`SchedulerBase`] by
//! composition:
//!
//! - [`SimpleGreedyScheduler`]: input order, first feasible cell.
//! - [`PriorityGreedyScheduler`]: contention-scored order, first feasible cell.
//! - [`BacktrackingScheduler`]: any-time CSP search with MRV ordering,
//!   min-conflicts chairman selection, and a wall-clock/node budget.
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6 (CSPs, MRV, min-conflicts)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

mod backtracking;
mod base;
mod greedy;

pub use backtracking::BacktrackingScheduler;
pub use base::SchedulerBase;
pub use greedy::{PriorityGreedyScheduler, SimpleGreedyScheduler};

use crate::conflict::SchedulingConflict;
use crate::models::{Defense, Schedule};

/// Result of one scheduling run: the populated grid plus one conflict
/// per defense that could not be placed.
#[derive(Debug, Clone)]
pub struct SchedulingOutcome {
    /// The populated grid.
    pub schedule: Schedule,
    /// Unresolved conflicts, one per unplaced defense.
    pub conflicts: Vec<SchedulingConflict>,
}

/// A scheduling strategy.
///
/// Implementations never mutate the input defenses; they work on clones
/// owned by the returned grid.
pub trait DefenseScheduler {
    /// Places the given defenses into a fresh grid.
    fn schedule(&self, defenses: &[Defense]) -> SchedulingOutcome;

    /// Name of the strategy, for reporting.
    fn name(&self) -> &str;
}
