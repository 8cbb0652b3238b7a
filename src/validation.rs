//! Structural validation of rosters and horizons.
//!
//! Checks input integrity before any scheduling happens. Detects:
//! - Duplicate or empty site ids
//! - Missing role groups (a site without night or care staff)
//! - Duplicate staff names or ledger ids within a site+role group
//! - Conflicting hour caps on records sharing a ledger id
//! - Non-positive hour caps
//! - Blocked days outside the 1–31 range
//! - Empty, non-increasing, or out-of-range horizons
//!
//! Any defect is fatal: the scheduler refuses to produce a partial
//! schedule from malformed input.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Horizon, Hours, Role, Roster};

/// Validation result: all defects are collected before failing.
pub type ValidationResult = Result<(), Vec<RosterDefect>>;

/// A structural defect in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterDefect {
    /// Defect category.
    pub kind: RosterDefectKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterDefectKind {
    /// Two sites share an id, or a site id is empty.
    InvalidSiteId,
    /// A site has no staff for one of the two roles.
    MissingRoleGroup,
    /// Two staff in the same site+role group share a name.
    DuplicateStaffName,
    /// Two staff in the same site+role group share a ledger id.
    DuplicateStaffId,
    /// Records sharing a ledger id disagree on the hour cap.
    InconsistentCap,
    /// A bounded hour cap is zero or negative.
    NonPositiveCap,
    /// A fixed-blocked day is outside 1–31.
    InvalidBlockedDay,
    /// The horizon is empty, not strictly increasing, or out of range.
    InvalidHorizon,
}

impl RosterDefect {
    pub(crate) fn new(kind: RosterDefectKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster and horizon for scheduling.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(defects)` with every detected issue.
pub fn validate_roster(roster: &Roster, horizon: &Horizon) -> ValidationResult {
    let mut defects = Vec::new();

    check_horizon(horizon, &mut defects);

    let mut site_ids = HashSet::new();
    for site in &roster.sites {
        if site.id.is_empty() {
            defects.push(RosterDefect::new(
                RosterDefectKind::InvalidSiteId,
                "site with empty id",
            ));
        }
        if !site_ids.insert(site.id.as_str()) {
            defects.push(RosterDefect::new(
                RosterDefectKind::InvalidSiteId,
                format!("duplicate site id '{}'", site.id),
            ));
        }

        for role in Role::ALL {
            if site.staff_in_role(role).next().is_none() {
                defects.push(RosterDefect::new(
                    RosterDefectKind::MissingRoleGroup,
                    format!("site '{}' has no {} staff", site.id, role),
                ));
            }

            let mut names = HashSet::new();
            let mut ids = HashSet::new();
            for staff in site.staff_in_role(role) {
                if !names.insert(staff.name.as_str()) {
                    defects.push(RosterDefect::new(
                        RosterDefectKind::DuplicateStaffName,
                        format!(
                            "duplicate staff name '{}' in {} group of site '{}'",
                            staff.name, role, site.id
                        ),
                    ));
                }
                // Shared ids are legal across groups (one person, two
                // roles) but not within one group.
                if !ids.insert(staff.id.as_str()) {
                    defects.push(RosterDefect::new(
                        RosterDefectKind::DuplicateStaffId,
                        format!(
                            "duplicate staff id '{}' in {} group of site '{}'",
                            staff.id, role, site.id
                        ),
                    ));
                }
            }
        }

        for staff in &site.staff {
            if let Some(cap) = staff.cap {
                if cap <= Hours::ZERO {
                    defects.push(RosterDefect::new(
                        RosterDefectKind::NonPositiveCap,
                        format!(
                            "hour cap for '{}' at site '{}' is not positive ({})",
                            staff.name, site.id, cap
                        ),
                    ));
                }
            }
            for &day in &staff.blocked_days {
                if !(1..=31).contains(&day) {
                    defects.push(RosterDefect::new(
                        RosterDefectKind::InvalidBlockedDay,
                        format!(
                            "blocked day {} for '{}' at site '{}' is outside 1-31",
                            day, staff.name, site.id
                        ),
                    ));
                }
            }
        }
    }

    // The ledger applies one cap per id, across sites and roles, so
    // records sharing an id must agree on it.
    let mut caps_by_id: HashMap<&str, Option<Hours>> = HashMap::new();
    let mut flagged: HashSet<&str> = HashSet::new();
    for (_, staff) in roster.all_staff() {
        let prior = caps_by_id.entry(staff.id.as_str()).or_insert(staff.cap);
        if *prior != staff.cap && flagged.insert(staff.id.as_str()) {
            defects.push(RosterDefect::new(
                RosterDefectKind::InconsistentCap,
                format!("staff id '{}' has conflicting hour caps", staff.id),
            ));
        }
    }

    if defects.is_empty() {
        Ok(())
    } else {
        Err(defects)
    }
}

fn check_horizon(horizon: &Horizon, defects: &mut Vec<RosterDefect>) {
    if horizon.is_empty() {
        defects.push(RosterDefect::new(
            RosterDefectKind::InvalidHorizon,
            "horizon is empty",
        ));
        return;
    }

    let days = horizon.days();
    for d in days {
        if !(1..=31).contains(&d.day) {
            defects.push(RosterDefect::new(
                RosterDefectKind::InvalidHorizon,
                format!("day number {} is outside 1-31", d.day),
            ));
        }
    }
    for pair in days.windows(2) {
        if pair[1].day <= pair[0].day {
            defects.push(RosterDefect::new(
                RosterDefectKind::InvalidHorizon,
                format!(
                    "day numbers must be strictly increasing ({} then {})",
                    pair[0].day, pair[1].day
                ),
            ));
        }
    }
}
