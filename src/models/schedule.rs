//! Schedule (solution) model.
//!
//! A schedule is the set of slot assignments produced by one run, plus
//! the slots that could not be filled and why. An external collaborator
//! renders this into a grid or file; the engine only provides queries
//! and the per-staff workload summary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::eligibility::RelaxationLevel;
use crate::models::{DutySlot, Hours, Roster};

/// A filled duty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The slot that was filled.
    pub slot: DutySlot,
    /// Ledger key of the assigned staff member.
    pub staff_id: String,
    /// Display name of the assigned staff member.
    pub staff_name: String,
    /// Hours credited for this assignment.
    pub hours: Hours,
    /// The relaxation level that was required to fill the slot.
    pub relaxation: RelaxationLevel,
}

/// Why no candidate could fill a slot, even after full relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnfillableReason {
    /// No candidate passed the checks, for mixed or structural reasons.
    NoEligibleCandidate,
    /// Every remaining candidate was rejected by the hour cap.
    CapExceededForAll,
    /// Every remaining candidate was rejected by the rest-interval rule.
    RestIntervalViolatedForAll,
}

/// A slot left empty, with its diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unfilled {
    /// The slot that stayed empty.
    pub slot: DutySlot,
    /// Reason class derived from the final round of rejections.
    pub reason: UnfillableReason,
}

/// A complete scheduling result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Successful slot assignments, in slot resolution order.
    pub assignments: Vec<Assignment>,
    /// Slots left empty (best-effort mode only; must-fill runs fail instead).
    pub unfilled: Vec<Unfilled>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Records an unfilled slot.
    pub fn add_unfilled(&mut self, unfilled: Unfilled) {
        self.unfilled.push(unfilled);
    }

    /// Whether every processed slot was filled.
    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Finds the assignment for a slot, if any.
    pub fn assignment_for_slot(&self, slot: &DutySlot) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.slot == slot)
    }

    /// All assignments for one staff member.
    pub fn assignments_for_staff(&self, staff_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.staff_id == staff_id)
            .collect()
    }

    /// Total hours credited to one staff member.
    pub fn total_hours(&self, staff_id: &str) -> Hours {
        self.assignments
            .iter()
            .filter(|a| a.staff_id == staff_id)
            .map(|a| a.hours)
            .sum()
    }

    /// The highest relaxation level any assignment required.
    pub fn max_relaxation_used(&self) -> RelaxationLevel {
        self.assignments
            .iter()
            .map(|a| a.relaxation)
            .max()
            .unwrap_or(RelaxationLevel::STRICT)
    }

    /// Computes the per-staff totals-vs-caps summary for this schedule.
    pub fn workload(&self, roster: &Roster) -> WorkloadSummary {
        let mut totals: HashMap<&str, (String, Hours)> = HashMap::new();
        for a in &self.assignments {
            let entry = totals
                .entry(&a.staff_id)
                .or_insert_with(|| (a.staff_name.clone(), Hours::ZERO));
            entry.1 += a.hours;
        }

        let mut entries = Vec::new();
        let mut seen: HashMap<&str, ()> = HashMap::new();
        for (_, staff) in roster.all_staff() {
            if seen.insert(staff.id.as_str(), ()).is_some() {
                continue; // one row per ledger key
            }
            let total = totals
                .get(staff.id.as_str())
                .map(|(_, h)| *h)
                .unwrap_or(Hours::ZERO);
            entries.push(StaffWorkload {
                staff_id: staff.id.clone(),
                name: staff.name.clone(),
                total,
                cap: staff.cap,
                remaining: staff.cap.map(|c| c - total),
            });
        }
        entries.sort_by(|a, b| a.staff_id.cmp(&b.staff_id));
        WorkloadSummary { entries }
    }
}

/// One row of the workload summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffWorkload {
    /// Ledger key.
    pub staff_id: String,
    /// Display name.
    pub name: String,
    /// Total assigned hours across all roles and sites.
    pub total: Hours,
    /// Hour cap, if bounded.
    pub cap: Option<Hours>,
    /// `cap - total` for bounded staff.
    pub remaining: Option<Hours>,
}

/// Per-staff totals against caps, sorted by staff id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkloadSummary {
    /// One entry per ledger key appearing in the roster.
    pub entries: Vec<StaffWorkload>,
}

impl WorkloadSummary {
    /// Entries whose total exceeds their cap (always empty for schedules
    /// produced by this engine; useful when auditing external edits).
    pub fn over_cap(&self) -> Vec<&StaffWorkload> {
        self.entries
            .iter()
            .filter(|e| matches!(e.remaining, Some(r) if r < Hours::ZERO))
            .collect()
    }
}
