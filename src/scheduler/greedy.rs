//! Greedy day-by-day scheduler with a constraint-relaxation ladder.
//!
//! # Algorithm
//!
//! 1. Process days in horizon order, sites in roster order, and within a
//!    site night duty before day care (care eligibility depends on the
//!    night ledger entry).
//! 2. Per slot, collect candidates at the strict level; on an empty set,
//!    escalate one relaxation level at a time up to the configured
//!    maximum.
//! 3. Select the candidate with the smallest remaining capacity
//!    (`cap - hours_worked`, unbounded caps last), ties broken by name.
//!    No randomness: identical inputs yield identical output.
//! 4. On success update the ledger; on exhaustion record the slot as
//!    unfillable with a reason class derived from the final rejections.
//!
//! # Complexity
//! O(days × slots × staff), single-threaded, no I/O in the hot path.

use std::cmp::Ordering;

use crate::eligibility::{self, RejectionReason, RelaxationLevel};
use crate::error::{Result, ScheduleError};
use crate::ledger::WorkLedger;
use crate::models::{
    Assignment, CalendarDay, DutySlot, Horizon, Role, Roster, Schedule, Site, Staff, Unfilled,
    UnfillableReason,
};
use crate::scheduler::{FillMode, SchedulerConfig};

/// Priority-driven greedy scheduler.
///
/// # Example
///
/// ```
/// use duty_roster::models::{Horizon, Role, Roster, Site, Staff};
/// use duty_roster::scheduler::{GreedyScheduler, SchedulerConfig};
///
/// let roster = Roster::new().with_site(
///     Site::new("GH1")
///         .with_staff(Staff::new("N1", Role::NightDuty))
///         .with_staff(Staff::new("C1", Role::DayCare)),
/// );
/// let scheduler = GreedyScheduler::new(SchedulerConfig::default());
/// let schedule = scheduler.schedule(&roster, &Horizon::month(3)).unwrap();
/// assert_eq!(schedule.assignment_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyScheduler {
    config: SchedulerConfig,
}

impl GreedyScheduler {
    /// Creates a scheduler with the given configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Runs the assignment pass over the whole horizon.
    ///
    /// Input is assumed structurally valid; run it through
    /// [`validate_roster`](crate::validation::validate_roster) first (the
    /// [`schedule_roster`](crate::scheduler::schedule_roster) entry point
    /// does this).
    pub fn schedule(&self, roster: &Roster, horizon: &Horizon) -> Result<Schedule> {
        let mut ledger = WorkLedger::new();
        let mut schedule = Schedule::new();

        for day in horizon.iter() {
            for site in &roster.sites {
                for role in Role::ALL {
                    let slot = DutySlot::new(&site.id, role, day.day);
                    match self.fill_slot(site, role, day, &ledger) {
                        Ok((staff, level)) => {
                            let hours = role.shift_hours();
                            ledger.record(&staff.id, role, day.day, hours);
                            tracing::debug!(
                                slot = %slot,
                                staff = %staff.name,
                                level = %level,
                                "assigned"
                            );
                            schedule.add_assignment(Assignment {
                                slot,
                                staff_id: staff.id.clone(),
                                staff_name: staff.name.clone(),
                                hours,
                                relaxation: level,
                            });
                        }
                        Err(reason) => {
                            tracing::warn!(slot = %slot, ?reason, "slot unfillable");
                            schedule.add_unfilled(Unfilled { slot, reason });
                        }
                    }
                }
            }
        }

        if self.config.fill_mode == FillMode::MustFillEveryDay && !schedule.is_complete() {
            return Err(ScheduleError::ScheduleIncomplete(schedule.unfilled));
        }
        Ok(schedule)
    }

    /// Resolves one slot, escalating the relaxation ladder as needed.
    fn fill_slot<'a>(
        &self,
        site: &'a Site,
        role: Role,
        day: &CalendarDay,
        ledger: &WorkLedger,
    ) -> std::result::Result<(&'a Staff, RelaxationLevel), UnfillableReason> {
        let mut level = RelaxationLevel::STRICT;
        loop {
            let mut candidates: Vec<&Staff> = Vec::new();
            let mut rejections: Vec<RejectionReason> = Vec::new();

            for staff in site.staff_in_role(role) {
                match eligibility::check(staff, role, day, ledger, level) {
                    Ok(()) => candidates.push(staff),
                    Err(reason) => rejections.push(reason),
                }
            }

            if let Some(best) = select_candidate(candidates, ledger) {
                return Ok((best, level));
            }

            match level.next().filter(|n| *n <= self.config.max_relaxation) {
                Some(next) => {
                    tracing::debug!(
                        site = %site.id,
                        %role,
                        day = day.day,
                        from = %level,
                        to = %next,
                        "escalating relaxation"
                    );
                    level = next;
                }
                None => return Err(classify_rejections(&rejections)),
            }
        }
    }
}

/// Picks the candidate with the smallest remaining capacity; unbounded
/// caps sort last; ties break by name for determinism.
fn select_candidate<'a>(candidates: Vec<&'a Staff>, ledger: &WorkLedger) -> Option<&'a Staff> {
    candidates.into_iter().min_by(|a, b| {
        let ra = a.cap.map(|c| c - ledger.hours(&a.id));
        let rb = b.cap.map(|c| c - ledger.hours(&b.id));
        match (ra, rb) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        }
    })
}

/// Derives the reason class from the final round of rejections.
fn classify_rejections(rejections: &[RejectionReason]) -> UnfillableReason {
    if !rejections.is_empty()
        && rejections.iter().all(|r| *r == RejectionReason::CapExceeded)
    {
        UnfillableReason::CapExceededForAll
    } else if !rejections.is_empty()
        && rejections
            .iter()
            .all(|r| *r == RejectionReason::RestIntervalViolated)
    {
        UnfillableReason::RestIntervalViolatedForAll
    } else {
        UnfillableReason::NoEligibleCandidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hours;
    use crate::scheduler::Strategy;

    fn config(fill_mode: FillMode) -> SchedulerConfig {
        SchedulerConfig::default()
            .with_fill_mode(fill_mode)
            .with_strategy(Strategy::Greedy)
    }

    /// Two sites, two staff per role group, caps wide enough for a full week.
    fn two_site_roster() -> Roster {
        let site = |id: &str| {
            Site::new(id)
                .with_staff(
                    Staff::new(format!("{id}-N1"), Role::NightDuty)
                        .with_cap(Hours::from_tenths(500)),
                )
                .with_staff(
                    Staff::new(format!("{id}-N2"), Role::NightDuty)
                        .with_cap(Hours::from_tenths(500)),
                )
                .with_staff(
                    Staff::new(format!("{id}-C1"), Role::DayCare).with_cap(Hours::from_hours(24)),
                )
                .with_staff(
                    Staff::new(format!("{id}-C2"), Role::DayCare).with_cap(Hours::from_hours(24)),
                )
        };
        Roster::new().with_site(site("GH1")).with_site(site("GH2"))
    }

    fn assert_invariants(schedule: &Schedule, roster: &Roster) {
        // Cap invariant.
        for entry in &schedule.workload(roster).entries {
            if let Some(cap) = entry.cap {
                assert!(entry.total <= cap, "{} over cap", entry.staff_id);
            }
        }
        // No double-booking.
        for a in &schedule.assignments {
            let same_day = schedule
                .assignments
                .iter()
                .filter(|b| b.staff_id == a.staff_id && b.slot.day == a.slot.day)
                .count();
            assert_eq!(same_day, 1, "{} double-booked on day {}", a.staff_id, a.slot.day);
        }
        // Fixed-block invariant.
        for a in &schedule.assignments {
            let staff = roster
                .find_staff(&a.slot.site, a.slot.role, &a.staff_name)
                .unwrap();
            assert!(!staff.is_blocked_on(a.slot.day));
        }
    }

    #[test]
    fn test_full_week_two_sites() {
        let roster = two_site_roster();
        let scheduler = GreedyScheduler::new(config(FillMode::MustFillEveryDay));
        let schedule = scheduler.schedule(&roster, &Horizon::month(7)).unwrap();

        // 7 days × 2 sites × 2 roles
        assert_eq!(schedule.assignment_count(), 28);
        assert!(schedule.is_complete());
        assert_invariants(&schedule, &roster);
    }

    #[test]
    fn test_determinism() {
        let roster = two_site_roster();
        let scheduler = GreedyScheduler::new(config(FillMode::MustFillEveryDay));
        let first = scheduler.schedule(&roster, &Horizon::month(7)).unwrap();
        let second = scheduler.schedule(&roster, &Horizon::month(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_consecutive_ban_forces_alternation() {
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("A", Role::NightDuty))
                .with_staff(Staff::new("B", Role::NightDuty))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::BestEffort));
        let schedule = scheduler.schedule(&roster, &Horizon::month(4)).unwrap();

        let nights: Vec<&str> = schedule
            .assignments
            .iter()
            .filter(|a| a.slot.role == Role::NightDuty)
            .map(|a| a.staff_name.as_str())
            .collect();
        // Tie on day 1 goes to "A" by name; the strict ban then alternates.
        assert_eq!(nights, vec!["A", "B", "A", "B"]);
        assert!(schedule
            .assignments
            .iter()
            .all(|a| a.relaxation == RelaxationLevel::STRICT || a.slot.role == Role::DayCare));
    }

    #[test]
    fn test_cap_exactly_one_shift() {
        // Cap equal to one night shift: exactly one assignment, then
        // CapExceededForAll for the rest.
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("A", Role::NightDuty).with_cap(Hours::from_tenths(125)))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::BestEffort));
        let schedule = scheduler.schedule(&roster, &Horizon::month(3)).unwrap();

        assert_eq!(schedule.assignments_for_staff("A").len(), 1);
        let night_gaps: Vec<&Unfilled> = schedule
            .unfilled
            .iter()
            .filter(|u| u.slot.role == Role::NightDuty)
            .collect();
        assert_eq!(night_gaps.len(), 2);
        assert!(night_gaps
            .iter()
            .all(|u| u.reason == UnfillableReason::CapExceededForAll));
    }

    #[test]
    fn test_tight_caps_leave_gap() {
        // Two night staff at 3 shifts each cannot cover 7 days.
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("A", Role::NightDuty).with_cap(Hours::from_tenths(375)))
                .with_staff(Staff::new("B", Role::NightDuty).with_cap(Hours::from_tenths(375)))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::BestEffort));
        let schedule = scheduler.schedule(&roster, &Horizon::month(7)).unwrap();

        let nights = schedule
            .assignments
            .iter()
            .filter(|a| a.slot.role == Role::NightDuty)
            .count();
        assert_eq!(nights, 6);
        assert_eq!(schedule.unfilled.len(), 1);
        assert_eq!(schedule.unfilled[0].slot.day, 7);
        assert_eq!(
            schedule.unfilled[0].reason,
            UnfillableReason::CapExceededForAll
        );
        assert_invariants(&schedule, &roster);
    }

    #[test]
    fn test_must_fill_mode_fails_on_gap() {
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("A", Role::NightDuty).with_cap(Hours::from_tenths(125)))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::MustFillEveryDay));
        let err = scheduler
            .schedule(&roster, &Horizon::month(2))
            .unwrap_err();
        match err {
            ScheduleError::ScheduleIncomplete(gaps) => {
                assert_eq!(gaps.len(), 1);
                assert_eq!(gaps[0].reason, UnfillableReason::CapExceededForAll);
            }
            other => panic!("expected ScheduleIncomplete, got {other}"),
        }
    }

    /// "Aoki" works night duty on day 1 (name tie-break over "Zed") and
    /// is the only care candidate on day 2, one day after that night.
    fn rest_pressured_roster() -> Roster {
        Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("Aoki", Role::NightDuty).with_id("aoki"))
                .with_staff(Staff::new("Zed", Role::NightDuty))
                .with_staff(Staff::new("Aoki", Role::DayCare).with_id("aoki")),
        )
    }

    #[test]
    fn test_rest_rule_requires_relaxation_and_records_level() {
        // Night on day 1 blocks Aoki's care on day 2 until the ladder
        // reaches gap 1 (level 2).
        let roster = rest_pressured_roster();
        let scheduler = GreedyScheduler::new(config(FillMode::BestEffort));
        let schedule = scheduler.schedule(&roster, &Horizon::from_days([1, 2])).unwrap();

        assert_eq!(
            schedule
                .assignment_for_slot(&DutySlot::new("GH1", Role::NightDuty, 1))
                .unwrap()
                .staff_id,
            "aoki"
        );
        let care_day2 = schedule
            .assignment_for_slot(&DutySlot::new("GH1", Role::DayCare, 2))
            .expect("care slot should fill after relaxation");
        assert_eq!(care_day2.staff_id, "aoki");
        assert_eq!(care_day2.relaxation, RelaxationLevel::new(2));
        assert_eq!(schedule.max_relaxation_used(), RelaxationLevel::new(2));
    }

    #[test]
    fn test_relaxation_ceiling_is_honored() {
        let roster = rest_pressured_roster();
        let scheduler = GreedyScheduler::new(
            config(FillMode::BestEffort).with_max_relaxation(RelaxationLevel::new(1)),
        );
        let schedule = scheduler.schedule(&roster, &Horizon::from_days([1, 2])).unwrap();

        let gap = schedule
            .unfilled
            .iter()
            .find(|u| u.slot.role == Role::DayCare && u.slot.day == 2)
            .expect("care slot should stay empty below level 2");
        assert_eq!(gap.reason, UnfillableReason::RestIntervalViolatedForAll);
    }

    #[test]
    fn test_relaxation_monotonicity() {
        // Lowering the ceiling never fills more slots.
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("P (night)", Role::NightDuty).with_id("p"))
                .with_staff(Staff::new("P (care)", Role::DayCare).with_id("p")),
        );
        let horizon = Horizon::month(5);
        let mut previous = usize::MAX;
        for ceiling in (0..=3).rev() {
            let scheduler = GreedyScheduler::new(
                config(FillMode::BestEffort).with_max_relaxation(RelaxationLevel::new(ceiling)),
            );
            let schedule = scheduler.schedule(&roster, &horizon).unwrap();
            assert!(schedule.assignment_count() <= previous);
            previous = schedule.assignment_count();
            if ceiling == 0 {
                assert!(schedule
                    .assignments
                    .iter()
                    .all(|a| a.relaxation == RelaxationLevel::STRICT));
            }
        }
    }

    #[test]
    fn test_fixed_blocked_cells_respected() {
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("A", Role::NightDuty).with_blocked_days([1, 3]))
                .with_staff(Staff::new("B", Role::NightDuty))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::MustFillEveryDay));
        let schedule = scheduler.schedule(&roster, &Horizon::month(4)).unwrap();

        for day in [1u8, 3] {
            let a = schedule
                .assignment_for_slot(&DutySlot::new("GH1", Role::NightDuty, day))
                .unwrap();
            assert_eq!(a.staff_name, "B");
        }
        assert_invariants(&schedule, &roster);
    }

    #[test]
    fn test_prefers_candidate_closest_to_cap() {
        // B has less remaining capacity and is picked first even though
        // A sorts earlier by name.
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("A", Role::NightDuty).with_cap(Hours::from_tenths(500)))
                .with_staff(Staff::new("B", Role::NightDuty).with_cap(Hours::from_tenths(250)))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::BestEffort));
        let schedule = scheduler.schedule(&roster, &Horizon::from_days([1])).unwrap();

        let night = schedule
            .assignment_for_slot(&DutySlot::new("GH1", Role::NightDuty, 1))
            .unwrap();
        assert_eq!(night.staff_name, "B");
    }

    #[test]
    fn test_unbounded_cap_sorts_last() {
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(Staff::new("A", Role::NightDuty))
                .with_staff(Staff::new("B", Role::NightDuty).with_cap(Hours::from_tenths(500)))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::BestEffort));
        let schedule = scheduler.schedule(&roster, &Horizon::from_days([1])).unwrap();
        assert_eq!(
            schedule
                .assignment_for_slot(&DutySlot::new("GH1", Role::NightDuty, 1))
                .unwrap()
                .staff_name,
            "B"
        );
    }

    #[test]
    fn test_availability_rule_in_schedule() {
        use crate::models::AvailabilityRule;
        // A works only in the first 7-day window; B covers the rest.
        let roster = Roster::new().with_site(
            Site::new("GH1")
                .with_staff(
                    Staff::new("A", Role::NightDuty)
                        .with_availability(AvailabilityRule::MonthlyFrequency(1)),
                )
                .with_staff(Staff::new("B", Role::NightDuty))
                .with_staff(Staff::new("C", Role::DayCare)),
        );
        let scheduler = GreedyScheduler::new(config(FillMode::MustFillEveryDay));
        let schedule = scheduler.schedule(&roster, &Horizon::month(10)).unwrap();

        for a in schedule.assignments.iter().filter(|a| a.staff_name == "A") {
            assert!(a.slot.day <= 7);
        }
    }

    #[test]
    fn test_classify_rejections() {
        use RejectionReason::*;
        assert_eq!(
            classify_rejections(&[CapExceeded, CapExceeded]),
            UnfillableReason::CapExceededForAll
        );
        assert_eq!(
            classify_rejections(&[RestIntervalViolated]),
            UnfillableReason::RestIntervalViolatedForAll
        );
        assert_eq!(
            classify_rejections(&[CapExceeded, FixedBlocked]),
            UnfillableReason::NoEligibleCandidate
        );
        assert_eq!(
            classify_rejections(&[]),
            UnfillableReason::NoEligibleCandidate
        );
    }
}
