//! Error taxonomy for scheduling runs.
//!
//! Malformed input is fatal and surfaced before any slot is processed.
//! Per-slot failures are recoverable through the relaxation ladder and
//! only become an error when the ladder is exhausted in must-fill mode.
//! Solver failures are recoverable only by falling back to the greedy
//! strategy; they are never treated as success.

use crate::models::Unfilled;
use crate::validation::RosterDefect;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors produced by a scheduling run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScheduleError {
    /// The roster or horizon failed structural validation. No partial
    /// schedule is produced.
    #[error("malformed roster: {}", format_defects(.0))]
    MalformedRoster(Vec<RosterDefect>),

    /// Relaxation was exhausted for one or more slots in
    /// must-fill mode. Carries each gap with its reason class.
    #[error("schedule incomplete: {} slot(s) unfillable after full relaxation", .0.len())]
    ScheduleIncomplete(Vec<Unfilled>),

    /// The exact model admits no feasible assignment.
    #[error("solver reported the model infeasible")]
    SolverInfeasible,

    /// The solver did not finish within the configured time budget.
    #[error("solver exceeded its time budget")]
    SolverTimeout,

    /// Any other backend failure (numeric trouble, unbounded model).
    #[error("solver failure: {0}")]
    Solver(String),
}

fn format_defects(defects: &[RosterDefect]) -> String {
    defects
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
