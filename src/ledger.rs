//! Work ledger: per-run mutable record of hours and last-worked days.
//!
//! Created empty at the start of a scheduling run, written only by
//! successful assignment, read by the eligibility evaluator. Each
//! strategy owns its own ledger for the duration of one run; nothing is
//! shared across runs.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Hours, Role};

#[derive(Debug, Clone, Default)]
struct LedgerEntry {
    hours: Hours,
    days_assigned: BTreeSet<u8>,
    last_night: Option<u8>,
    last_care: Option<u8>,
}

/// Mutable accumulator keyed by staff ledger id.
#[derive(Debug, Clone, Default)]
pub struct WorkLedger {
    entries: HashMap<String, LedgerEntry>,
}

impl WorkLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful assignment.
    pub fn record(&mut self, staff_id: &str, role: Role, day: u8, hours: Hours) {
        let entry = self.entries.entry(staff_id.to_string()).or_default();
        entry.hours += hours;
        entry.days_assigned.insert(day);
        match role {
            Role::NightDuty => entry.last_night = Some(day),
            Role::DayCare => entry.last_care = Some(day),
        }
    }

    /// Cumulative hours across all roles and sites.
    pub fn hours(&self, staff_id: &str) -> Hours {
        self.entries
            .get(staff_id)
            .map(|e| e.hours)
            .unwrap_or(Hours::ZERO)
    }

    /// Whether the staff member already has an assignment on `day`.
    pub fn worked_on(&self, staff_id: &str, day: u8) -> bool {
        self.entries
            .get(staff_id)
            .is_some_and(|e| e.days_assigned.contains(&day))
    }

    /// Last day assigned in the given role, if any.
    pub fn last_day_in_role(&self, staff_id: &str, role: Role) -> Option<u8> {
        let entry = self.entries.get(staff_id)?;
        match role {
            Role::NightDuty => entry.last_night,
            Role::DayCare => entry.last_care,
        }
    }

    /// Last day assigned in any role, if any.
    pub fn last_day_any(&self, staff_id: &str) -> Option<u8> {
        self.entries
            .get(staff_id)
            .and_then(|e| e.days_assigned.iter().next_back().copied())
    }
}
