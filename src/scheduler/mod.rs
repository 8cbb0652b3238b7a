//! Scheduling strategies and the run entry point.
//!
//! Two interchangeable strategies produce a [`Schedule`] from the same
//! validated input:
//!
//! - [`GreedyScheduler`]: fast day-by-day pass with a relaxation ladder.
//!   Always terminates, may leave slots empty under tight constraints.
//! - [`ExactScheduler`]: 0-1 integer program that enforces the strict
//!   rules globally and balances hours across staff. May report the
//!   instance infeasible.
//!
//! [`schedule_roster`] validates the input once and dispatches on
//! [`Strategy`]; `ExactThenGreedyFallback` retries solver failures with
//! the greedy pass.
//!
//! # Reference
//! Pinedo, M. (2016). Scheduling: Theory, Algorithms, and Systems.

use std::time::Duration;

use crate::eligibility::RelaxationLevel;
use crate::error::{Result, ScheduleError};
use crate::models::{Horizon, Roster, Schedule};
use crate::validation::validate_roster;

mod exact;
mod greedy;

pub use exact::ExactScheduler;
pub use greedy::GreedyScheduler;

/// What an empty slot means for the run as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Every slot must be filled; any gap fails the run.
    #[default]
    MustFillEveryDay,
    /// Gaps are recorded in [`Schedule::unfilled`] and the run succeeds.
    BestEffort,
}

/// Which strategy resolves the slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Day-by-day greedy pass with relaxation.
    #[default]
    Greedy,
    /// Exact 0-1 integer program.
    Exact,
    /// Exact first; on solver failure, rerun with the greedy pass.
    ExactThenGreedyFallback,
}

/// Run configuration shared by both strategies.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Gap handling, default [`FillMode::MustFillEveryDay`].
    pub fill_mode: FillMode,
    /// Strategy selection, default [`Strategy::Greedy`].
    pub strategy: Strategy,
    /// Relaxation ceiling for the greedy pass, default the full ladder.
    pub max_relaxation: RelaxationLevel,
    /// Advisory wall-clock budget for the exact solver.
    pub solver_time_budget: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::default(),
            strategy: Strategy::default(),
            max_relaxation: RelaxationLevel::MAX,
            solver_time_budget: Duration::from_secs(10),
        }
    }
}

impl SchedulerConfig {
    /// Sets the fill mode.
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the relaxation ladder. Level 0 keeps every rule strict.
    pub fn with_max_relaxation(mut self, level: RelaxationLevel) -> Self {
        self.max_relaxation = level;
        self
    }

    /// Sets the solver time budget.
    pub fn with_solver_time_budget(mut self, budget: Duration) -> Self {
        self.solver_time_budget = budget;
        self
    }
}

/// Validates the input and runs the configured strategy.
///
/// This is the main entry point of the crate.
///
/// # Errors
/// - [`ScheduleError::MalformedRoster`] before any slot is processed
/// - [`ScheduleError::ScheduleIncomplete`] in must-fill mode with gaps
/// - [`ScheduleError::SolverInfeasible`] and friends from the exact
///   strategy (unless the fallback variant is selected)
pub fn schedule_roster(
    roster: &Roster,
    horizon: &Horizon,
    config: &SchedulerConfig,
) -> Result<Schedule> {
    validate_roster(roster, horizon).map_err(ScheduleError::MalformedRoster)?;

    match config.strategy {
        Strategy::Greedy => GreedyScheduler::new(config.clone()).schedule(roster, horizon),
        Strategy::Exact => ExactScheduler::new(config.clone()).solve(roster, horizon),
        Strategy::ExactThenGreedyFallback => {
            match ExactScheduler::new(config.clone()).solve(roster, horizon) {
                Ok(schedule) => Ok(schedule),
                Err(
                    err @ (ScheduleError::SolverInfeasible
                    | ScheduleError::SolverTimeout
                    | ScheduleError::Solver(_)),
                ) => {
                    tracing::warn!(%err, "exact strategy failed, falling back to greedy");
                    GreedyScheduler::new(config.clone()).schedule(roster, horizon)
                }
                Err(err) => Err(err),
            }
        }
    }
}
