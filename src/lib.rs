//! Scheduling engine for thesis defense sessions.
//!
//! Assigns defenses (each needing a supervisor, a reviewer, and a
//! chairman from a faculty pool) to a grid of (time slot × room) cells
//! under availability and no-double-booking constraints, then improves
//! the assignment with a cost-driven local search.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `Person`, `Room`,
//!   `Defense`, `SessionParameters`, `Schedule`
//! - **`conflict`**: Pure feasibility predicates; conflicts are data,
//!   not errors
//! - **`scheduler`**: Strategies behind one trait: two greedy
//!   baselines and an any-time backtracking search with MRV ordering,
//!   min-conflicts chairman selection, and a node/time budget
//! - **`optimizer`**: Swap/move local search over a placed schedule
//!   (idle gaps, grouping, chairman contiguity, session span)
//! - **`validation`**: Input integrity checks (duplicate IDs, chairman
//!   role precondition)
//! - **`error`**: Fail-fast construction errors for malformed input
//!
//! # Guarantees
//!
//! Results are best-effort, deterministic, and budget-bounded, not
//! globally optimal in general. The backtracking search never returns
//! fewer placements than the better greedy baseline, and the optimizer
//! only accepts strictly improving, feasible moves.
//!
//! All operations are synchronous and single-threaded over one
//! caller-owned [`models::Schedule`].
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6 (Constraint Satisfaction Problems)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod conflict;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod scheduler;
pub mod validation;
