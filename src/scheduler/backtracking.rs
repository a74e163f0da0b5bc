//! Any-time backtracking scheduler.
//!
//! A budgeted CSP search over the (slot × room) grid:
//!
//! - warm start from the better of the two greedy baselines, so the
//!   result is never worse than naive greedy,
//! - MRV variable ordering (most constrained defense first),
//! - min-conflicts chairman selection (pick the candidate that blocks
//!   the fewest other free cells),
//! - wall-clock and node budgets checked at every recursion entry,
//! - best-partial snapshot so budget exhaustion still yields the best
//!   assignment seen so far.
//!
//! The search is fully deterministic: identical inputs and budgets give
//! identical output.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::{
    DefenseScheduler, PriorityGreedyScheduler, SchedulerBase, SchedulingOutcome,
    SimpleGreedyScheduler,
};
use crate::conflict::person_conflict;
use crate::models::{Defense, Person, Schedule, TimeSlot};

/// Default wall-clock budget for the search.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(90);
/// Default node-visit budget (candidate placements tried).
pub const DEFAULT_NODE_LIMIT: u64 = 1_000_000;

/// One assignment captured in a best-partial snapshot, keyed so the
/// grid can be rebuilt from scratch.
#[derive(Debug, Clone)]
struct Snapshot {
    defense: Defense,
    time_slot: TimeSlot,
    room_number: String,
    chairman: Person,
}

/// Mutable search state threaded explicitly through the recursion.
struct SearchContext {
    started: Instant,
    nodes: u64,
    best_count: usize,
    best: Vec<Snapshot>,
}

/// Any-time backtracking scheduler with a resource budget.
#[derive(Debug, Clone)]
pub struct BacktrackingScheduler {
    base: SchedulerBase,
    time_limit: Duration,
    node_limit: u64,
}

impl BacktrackingScheduler {
    /// Creates a scheduler with the default budgets.
    pub fn new(base: SchedulerBase) -> Self {
        Self {
            base,
            time_limit: DEFAULT_TIME_LIMIT,
            node_limit: DEFAULT_NODE_LIMIT,
        }
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the node-visit budget.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = limit;
        self
    }

    /// Recursive placement. Returns `true` only when every remaining
    /// defense was placed within budget.
    fn search(
        &self,
        schedule: &mut Schedule,
        remaining: &mut Vec<Defense>,
        ctx: &mut SearchContext,
    ) -> bool {
        if ctx.started.elapsed() > self.time_limit || ctx.nodes > self.node_limit {
            return false;
        }

        let placed_now = schedule.scheduled_count();
        if placed_now > ctx.best_count {
            ctx.best_count = placed_now;
            ctx.best = Self::capture(schedule);
            trace!(placed = placed_now, nodes = ctx.nodes, "new best partial solution");
        }

        if remaining.is_empty() {
            return true;
        }

        // MRV: the defense with the smallest non-empty domain. An empty
        // domain is a silent dead end; the unplaced defense is reported
        // only at the top level, against the final schedule.
        let (index, domain) = self.pick_mrv(remaining, schedule);
        if domain.is_empty() {
            return false;
        }
        let defense = remaining.remove(index);

        for cell in domain {
            ctx.nodes += 1;

            let Some(chairman) = self.min_conflicts_chairman(&defense, cell, schedule) else {
                continue;
            };

            schedule.assign(cell, defense.clone(), chairman);
            if self.search(schedule, remaining, ctx) {
                return true;
            }
            schedule.take(cell);
        }

        remaining.insert(index, defense);
        false
    }

    /// Index into `remaining` of the defense with the smallest current
    /// domain, plus that domain ordered by (slot start, room number).
    fn pick_mrv(&self, remaining: &[Defense], schedule: &Schedule) -> (usize, Vec<usize>) {
        let mut best_index = 0;
        let mut best_domain = self.base.feasible_cells(&remaining[0], schedule);

        for (i, defense) in remaining.iter().enumerate().skip(1) {
            let domain = self.base.feasible_cells(defense, schedule);
            if best_domain.is_empty() || (!domain.is_empty() && domain.len() < best_domain.len()) {
                best_index = i;
                best_domain = domain;
            }
        }

        (best_index, best_domain)
    }

    /// Min-conflicts chairman for placing `defense` into `cell`: among
    /// available candidates, the one unavailable in the fewest other
    /// free cells (cells sharing this slot's start are not counted).
    /// Ties keep the committee-exclusion candidate order.
    fn min_conflicts_chairman(
        &self,
        defense: &Defense,
        cell: usize,
        schedule: &Schedule,
    ) -> Option<Person> {
        let slot = schedule.cells()[cell].time_slot;
        let scheduled = schedule.scheduled_defenses();
        let free = schedule.free_cells();

        let mut best: Option<&Person> = None;
        let mut best_score = usize::MAX;

        for candidate in self.base.chairman_candidates(defense) {
            if person_conflict(candidate, &slot, &scheduled).is_some() {
                continue;
            }

            let score = free
                .iter()
                .filter(|&&other| {
                    let other_slot = schedule.cells()[other].time_slot;
                    other_slot != slot
                        && person_conflict(candidate, &other_slot, &scheduled).is_some()
                })
                .count();

            if score < best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        best.cloned()
    }

    /// Snapshots every current assignment, keyed by (slot, room number).
    fn capture(schedule: &Schedule) -> Vec<Snapshot> {
        schedule
            .cells()
            .iter()
            .filter_map(|c| {
                let defense = c.occupant()?;
                let chairman = defense.chairman.clone()?;
                Some(Snapshot {
                    defense: defense.clone(),
                    time_slot: c.time_slot,
                    room_number: c.room.number.clone(),
                    chairman,
                })
            })
            .collect()
    }

    /// Rebuilds a fresh grid from the best snapshot.
    fn rebuild(&self, snapshots: &[Snapshot]) -> Schedule {
        let mut schedule = self.base.create_empty_schedule();
        for snap in snapshots {
            if let Some(index) = schedule.find_cell(&snap.time_slot, &snap.room_number) {
                if schedule.cells()[index].is_free() {
                    schedule.assign(index, snap.defense.clone(), snap.chairman.clone());
                }
            }
        }
        schedule
    }
}

impl DefenseScheduler for BacktrackingScheduler {
    fn schedule(&self, defenses: &[Defense]) -> SchedulingOutcome {
        // Warm start: the better greedy result bounds us from below.
        let simple = SimpleGreedyScheduler::new(self.base.clone()).schedule(defenses);
        let priority = PriorityGreedyScheduler::new(self.base.clone()).schedule(defenses);
        let baseline = if priority.schedule.scheduled_count() >= simple.schedule.scheduled_count()
        {
            priority
        } else {
            simple
        };
        debug!(
            baseline = baseline.schedule.scheduled_count(),
            total = defenses.len(),
            "warm start baseline"
        );

        let mut schedule = self.base.create_empty_schedule();
        let mut remaining: Vec<Defense> = defenses.to_vec();
        let mut ctx = SearchContext {
            started: Instant::now(),
            nodes: 0,
            best_count: 0,
            best: Vec::new(),
        };

        let complete = self.search(&mut schedule, &mut remaining, &mut ctx);
        debug!(
            complete,
            nodes = ctx.nodes,
            best = ctx.best_count,
            "backtracking search finished"
        );

        let rebuilt = self.rebuild(&ctx.best);
        if rebuilt.scheduled_count() >= baseline.schedule.scheduled_count() {
            let conflicts = SchedulerBase::conflicts_for_unplaced(defenses, &rebuilt);
            SchedulingOutcome {
                schedule: rebuilt,
                conflicts,
            }
        } else {
            baseline
        }
    }

    fn name(&self) -> &str {
        "backtracking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, Room, SessionParameters};

    fn person(email: &str) -> Person {
        Person::new("P", email).unwrap()
    }

    fn chairman(email: &str) -> Person {
        person(email).with_role(Role::Chairman)
    }

    fn room(number: &str) -> Room {
        Room::new("Room", number).unwrap()
    }

    fn slot(start: i64, end: i64) -> TimeSlot {
        TimeSlot::new(start, end).unwrap()
    }

    fn defense(student: &str, sup: Person, rev: Person) -> Defense {
        Defense::new(student, "Title", sup, rev).unwrap()
    }

    /// Two defenses, one room, two slots. Both greedy orders place the
    /// flexible defense into the only slot the other one can use; the
    /// search must recover both placements.
    fn greedy_trap() -> (SchedulerBase, Vec<Defense>) {
        let params = SessionParameters::new("2026-06-15", 540, 660, 60, 1).unwrap();
        let base = SchedulerBase::new(
            params,
            vec![room("101")],
            vec![chairman("c1@x.org"), chairman("c2@x.org")],
        );

        // "flex" fits both slots but carries two (irrelevant, evening)
        // unavailabilities, so the priority order also tries it first.
        let flex_sup = person("flex.sup@x.org")
            .with_unavailable(slot(1080, 1140))
            .with_unavailable(slot(1200, 1260));
        // "tight" only fits the first slot.
        let tight_sup = person("tight.sup@x.org").with_unavailable(slot(600, 660));

        let defenses = vec![
            defense("flex", flex_sup, person("flex.rev@x.org")),
            defense("tight", tight_sup, person("tight.rev@x.org")),
        ];
        (base, defenses)
    }

    #[test]
    fn test_search_beats_both_greedy_baselines() {
        let (base, defenses) = greedy_trap();

        let simple = SimpleGreedyScheduler::new(base.clone()).schedule(&defenses);
        let priority = PriorityGreedyScheduler::new(base.clone()).schedule(&defenses);
        assert_eq!(simple.schedule.scheduled_count(), 1);
        assert_eq!(priority.schedule.scheduled_count(), 1);

        let outcome = BacktrackingScheduler::new(base).schedule(&defenses);
        assert_eq!(outcome.schedule.scheduled_count(), 2);
        assert!(outcome.conflicts.is_empty());

        // MRV placed "tight" into the first slot
        let tight = outcome
            .schedule
            .scheduled_defenses()
            .into_iter()
            .find(|d| d.student_name == "tight")
            .unwrap();
        assert_eq!(tight.time_slot, Some(slot(540, 600)));
    }

    #[test]
    fn test_never_worse_than_baselines() {
        let params = SessionParameters::new("2026-06-15", 540, 720, 60, 2).unwrap();
        let shared = person("shared@x.org");
        let base = SchedulerBase::new(
            params,
            vec![room("101"), room("102")],
            vec![chairman("c1@x.org"), chairman("c2@x.org")],
        );
        let defenses = vec![
            defense("S1", shared.clone(), person("r1@x.org")),
            defense("S2", shared.clone(), person("r2@x.org")),
            defense("S3", shared, person("r3@x.org")),
            defense("S4", person("s4@x.org"), person("r4@x.org")),
        ];

        let simple = SimpleGreedyScheduler::new(base.clone()).schedule(&defenses);
        let priority = PriorityGreedyScheduler::new(base.clone()).schedule(&defenses);
        let outcome = BacktrackingScheduler::new(base).schedule(&defenses);

        let floor = simple
            .schedule
            .scheduled_count()
            .max(priority.schedule.scheduled_count());
        assert!(outcome.schedule.scheduled_count() >= floor);
    }

    /// Pool of one chairman who also supervises two of three defenses,
    /// both pinned to the same round: the same person cannot chair two
    /// overlapping committees, so exactly one of those two places while
    /// the unconflicted third defense still does.
    #[test]
    fn test_single_chairman_cannot_chair_overlapping_committees() {
        let params = SessionParameters::new("2026-06-15", 540, 660, 60, 2).unwrap();
        let chair_sup = chairman("chair@x.org");
        let base = SchedulerBase::new(
            params,
            vec![room("101"), room("102")],
            vec![chair_sup.clone()],
        );
        // Both reviewers are gone for the second slot, so S1 and S2 can
        // only take the overlapping 09:00 round.
        let r1 = person("r1@x.org").with_unavailable(slot(600, 660));
        let r2 = person("r2@x.org").with_unavailable(slot(600, 660));
        let defenses = vec![
            defense("S1", chair_sup.clone(), r1),
            defense("S2", chair_sup, r2),
            defense("S3", person("s3@x.org"), person("r3@x.org")),
        ];

        let outcome = BacktrackingScheduler::new(base).schedule(&defenses);
        assert_eq!(outcome.schedule.scheduled_count(), 2);
        assert_eq!(outcome.conflicts.len(), 1);

        let unplaced = outcome.conflicts[0].student.as_deref().unwrap();
        assert!(unplaced == "S1" || unplaced == "S2");
        assert!(outcome
            .schedule
            .scheduled_defenses()
            .iter()
            .any(|d| d.student_name == "S3"));
    }

    #[test]
    fn test_exhausted_node_budget_degrades_to_baseline() {
        let (base, defenses) = greedy_trap();

        let outcome = BacktrackingScheduler::new(base.clone())
            .with_node_limit(0)
            .schedule(&defenses);

        // The search cannot expand a single node, so the greedy baseline
        // (1 placed) is returned instead of the 2-placement optimum.
        let simple = SimpleGreedyScheduler::new(base.clone()).schedule(&defenses);
        let priority = PriorityGreedyScheduler::new(base).schedule(&defenses);
        let floor = simple
            .schedule
            .scheduled_count()
            .max(priority.schedule.scheduled_count());
        assert_eq!(outcome.schedule.scheduled_count(), floor);
    }

    #[test]
    fn test_deterministic_output() {
        let (base, defenses) = greedy_trap();
        let scheduler = BacktrackingScheduler::new(base);

        let a = scheduler.schedule(&defenses);
        let b = scheduler.schedule(&defenses);

        let names = |s: &Schedule| -> Vec<Option<String>> {
            s.cells()
                .iter()
                .map(|c| c.occupant().map(|d| d.student_name.clone()))
                .collect()
        };
        assert_eq!(names(&a.schedule), names(&b.schedule));
        assert_eq!(a.conflicts, b.conflicts);
    }

    #[test]
    fn test_name() {
        let params = SessionParameters::new("2026-06-15", 540, 600, 60, 1).unwrap();
        let base = SchedulerBase::new(params, vec![room("101")], vec![]);
        assert_eq!(BacktrackingScheduler::new(base).name(), "backtracking");
    }
}
