//! Exact scheduler: 0-1 integer program over (staff, slot) decisions.
//!
//! One binary variable per admissible pairing of a staff member and a
//! duty slot. The strict rules become linear constraints; no relaxation
//! ladder exists here, which is why an over-constrained instance is
//! reported infeasible instead of partially filled.
//!
//! Constraints, per ledger id:
//! - exactly one staff member per modelled slot
//! - total hours within the cap
//! - at most one duty per day across roles and sites
//! - no duties on adjacent days, regardless of role
//! - no day care within two days after a night duty
//!
//! The objective minimizes the largest per-person hour total, which
//! spreads load instead of piling it onto whoever is cheapest.
//!
//! Slots with no admissible candidate at all (everyone blocked or
//! unavailable) are excluded from the model and reported as gaps.

use std::collections::HashMap;
use std::time::Instant;

use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};

use crate::eligibility::RelaxationLevel;
use crate::error::{Result, ScheduleError};
use crate::models::{
    Assignment, DutySlot, Horizon, Hours, Role, Roster, Schedule, Staff, Unfilled,
    UnfillableReason,
};
use crate::scheduler::{FillMode, SchedulerConfig};

/// MILP-backed scheduler producing load-balanced, globally strict
/// schedules.
#[derive(Debug, Clone)]
pub struct ExactScheduler {
    config: SchedulerConfig,
}

/// One binary decision: `staff` fills `slot`.
struct Decision<'a> {
    slot: DutySlot,
    staff: &'a Staff,
    var: Variable,
}

impl ExactScheduler {
    /// Creates a scheduler with the given configuration.
    ///
    /// The bundled backend has no deadline hook, so the time budget is
    /// checked after the solve: a run that finished but overran the
    /// budget is reported as a timeout, never as success. Typical
    /// monthly instances (a few hundred binaries) solve well inside it.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Builds and solves the assignment model.
    ///
    /// Input is assumed structurally valid, as with
    /// [`GreedyScheduler::schedule`](crate::scheduler::GreedyScheduler::schedule).
    pub fn solve(&self, roster: &Roster, horizon: &Horizon) -> Result<Schedule> {
        let mut vars = variables!();
        let mut decisions: Vec<Decision<'_>> = Vec::new();
        // Indices into `decisions`, grouped per slot in resolution order.
        let mut slot_groups: Vec<Vec<usize>> = Vec::new();
        let mut gaps: Vec<Unfilled> = Vec::new();

        for day in horizon.iter() {
            for site in &roster.sites {
                for role in Role::ALL {
                    let slot = DutySlot::new(&site.id, role, day.day);
                    let mut group = Vec::new();
                    for staff in site.staff_in_role(role) {
                        if staff.is_blocked_on(day.day) || !staff.availability.permits(day) {
                            continue;
                        }
                        group.push(decisions.len());
                        decisions.push(Decision {
                            slot: slot.clone(),
                            staff,
                            var: vars.add(variable().binary()),
                        });
                    }
                    if group.is_empty() {
                        tracing::warn!(slot = %slot, "no admissible candidate, slot left out of model");
                        gaps.push(Unfilled {
                            slot,
                            reason: UnfillableReason::NoEligibleCandidate,
                        });
                    } else {
                        slot_groups.push(group);
                    }
                }
            }
        }

        if self.config.fill_mode == FillMode::MustFillEveryDay && !gaps.is_empty() {
            return Err(ScheduleError::ScheduleIncomplete(gaps));
        }

        // Decision indices per ledger id, plus that person's hour cap.
        let mut by_staff: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut caps: HashMap<&str, Hours> = HashMap::new();
        for (i, d) in decisions.iter().enumerate() {
            by_staff.entry(&d.staff.id).or_default().push(i);
            // Records sharing an id carry the same cap (validated).
            if let Some(cap) = d.staff.cap {
                caps.entry(&d.staff.id).or_insert(cap);
            }
        }
        // HashMap iteration order does not reach the model deterministically
        // otherwise.
        let mut staff_ids: Vec<&str> = by_staff.keys().copied().collect();
        staff_ids.sort_unstable();

        let load_bound = vars.add(variable().min(0.0));
        let mut problem = vars.minimise(load_bound).using(default_solver);

        for group in &slot_groups {
            let filled = sum_vars(&decisions, group);
            problem = problem.with(constraint!(filled == 1.0));
        }

        for id in &staff_ids {
            let indices = &by_staff[id];

            let load = indices.iter().fold(Expression::from(0.0), |acc, &i| {
                acc + decisions[i].staff.role.shift_hours().as_f64() * decisions[i].var
            });
            if let Some(cap) = caps.get(id) {
                problem = problem.with(constraint!(load.clone() <= cap.as_f64()));
            }
            problem = problem.with(constraint!(load <= load_bound));

            // At most one duty per day, across roles and sites.
            let mut per_day: HashMap<u8, Vec<usize>> = HashMap::new();
            for &i in indices {
                per_day.entry(decisions[i].slot.day).or_default().push(i);
            }
            let mut days: Vec<u8> = per_day.keys().copied().collect();
            days.sort_unstable();
            for day in &days {
                let on_day = sum_vars(&decisions, &per_day[day]);
                problem = problem.with(constraint!(on_day <= 1.0));
            }

            // Adjacent-day ban: at most one duty over any two adjacent
            // days, whatever the roles. Stricter than the greedy pass's
            // same-role rule; this model has no relaxation ladder.
            for pair in days.windows(2) {
                if pair[1] != pair[0] + 1 {
                    continue;
                }
                let adjacent = sum_vars(&decisions, &per_day[&pair[0]])
                    + sum_vars(&decisions, &per_day[&pair[1]]);
                problem = problem.with(constraint!(adjacent <= 1.0));
            }

            // Night on day d blocks day care on d+1 and d+2.
            for &i in indices {
                if decisions[i].slot.role != Role::NightDuty {
                    continue;
                }
                let night_day = decisions[i].slot.day;
                for &j in indices {
                    if decisions[j].slot.role != Role::DayCare {
                        continue;
                    }
                    let diff = decisions[j].slot.day.wrapping_sub(night_day);
                    if diff == 1 || diff == 2 {
                        let conflict = Expression::from(decisions[i].var) + decisions[j].var;
                        problem = problem.with(constraint!(conflict <= 1.0));
                    }
                }
            }
        }

        let started = Instant::now();
        let solution = problem.solve().map_err(map_solver_error)?;
        let elapsed = started.elapsed();
        if elapsed > self.config.solver_time_budget {
            tracing::warn!(
                ?elapsed,
                budget = ?self.config.solver_time_budget,
                "solver overran its time budget"
            );
            return Err(ScheduleError::SolverTimeout);
        }

        let mut schedule = Schedule::new();
        for d in &decisions {
            if solution.value(d.var) > 0.5 {
                tracing::debug!(slot = %d.slot, staff = %d.staff.name, "assigned");
                schedule.add_assignment(Assignment {
                    slot: d.slot.clone(),
                    staff_id: d.staff.id.clone(),
                    staff_name: d.staff.name.clone(),
                    hours: d.slot.role.shift_hours(),
                    relaxation: RelaxationLevel::STRICT,
                });
            }
        }
        for gap in gaps {
            schedule.add_unfilled(gap);
        }
        Ok(schedule)
    }
}

fn sum_vars(decisions: &[Decision<'_>], indices: &[usize]) -> Expression {
    indices
        .iter()
        .fold(Expression::from(0.0), |acc, &i| acc + decisions[i].var)
}

fn map_solver_error(err: ResolutionError) -> ScheduleError {
    match err {
        ResolutionError::Infeasible => ScheduleError::SolverInfeasible,
        other => ScheduleError::Solver(other.to_string()),
    }
}
