//! Eligibility evaluator: may staff X fill slot (site, role, day)?
//!
//! A pure predicate over the staff record, the slot, the current work
//! ledger, and a relaxation level. It never raises; it only returns an
//! enumerated rejection reason, which the scheduler aggregates for
//! diagnosis.
//!
//! # Check Order
//! 1. Fixed-blocked cell
//! 2. Availability rule
//! 3. Hour cap (exact fixed-point comparison)
//! 4. Same-day exclusivity
//! 5. Night→care rest interval (relaxable)
//! 6. Same-role consecutive-day ban (relaxable)
//!
//! Same-day exclusivity is never relaxed.

use serde::{Deserialize, Serialize};

use crate::ledger::WorkLedger;
use crate::models::{CalendarDay, Role, Staff};

/// An ordinal knob that progressively loosens soft constraints when
/// strict matching fails for a slot.
///
/// | level | consecutive-day ban | night→care rest gap |
/// |-------|--------------------|---------------------|
/// | 0     | active             | 3 days              |
/// | 1     | off                | 3 days              |
/// | 2     | off                | 1 day               |
/// | 3     | off                | 0 days              |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct RelaxationLevel(u8);

impl RelaxationLevel {
    /// Level 0: all rules strict.
    pub const STRICT: RelaxationLevel = RelaxationLevel(0);
    /// The last rung of the ladder.
    pub const MAX: RelaxationLevel = RelaxationLevel(3);

    /// Creates a level, clamped to the ladder.
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX.0))
    }

    /// The ordinal value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The next rung, if not already at the top.
    pub fn next(&self) -> Option<RelaxationLevel> {
        (self.0 < Self::MAX.0).then(|| RelaxationLevel(self.0 + 1))
    }

    /// Minimum days between a night duty and a subsequent day-care duty.
    ///
    /// A gap of 3 means night at day `d` blocks care at `d+1` and `d+2`.
    pub fn rest_gap(&self) -> u8 {
        match self.0 {
            0 | 1 => 3,
            2 => 1,
            _ => 0,
        }
    }

    /// Whether the same-role consecutive-day ban applies.
    pub fn consecutive_ban_active(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for RelaxationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Why a candidate was rejected for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The (staff, day) cell is fixed-blocked.
    FixedBlocked,
    /// The availability rule excludes this day.
    Unavailable,
    /// Adding the slot's hours would exceed the hour cap.
    CapExceeded,
    /// The staff member already has an assignment on this day.
    AlreadyAssignedToday,
    /// A recent night duty is within the required rest gap.
    RestIntervalViolated,
    /// The staff member worked the same role the previous day.
    ConsecutiveDay,
}

/// Checks whether `staff` may fill the slot `(role, day)` given the
/// current ledger state, at the given relaxation level.
///
/// Returns the first failing check; `Ok(())` means eligible. The slot's
/// site is irrelevant here: staff records already live inside their
/// site, and the ledger spans sites.
pub fn check(
    staff: &Staff,
    role: Role,
    day: &CalendarDay,
    ledger: &WorkLedger,
    level: RelaxationLevel,
) -> Result<(), RejectionReason> {
    if staff.is_blocked_on(day.day) {
        return Err(RejectionReason::FixedBlocked);
    }

    if !staff.availability.permits(day) {
        return Err(RejectionReason::Unavailable);
    }

    if let Some(cap) = staff.cap {
        if ledger.hours(&staff.id) + role.shift_hours() > cap {
            return Err(RejectionReason::CapExceeded);
        }
    }

    if ledger.worked_on(&staff.id, day.day) {
        return Err(RejectionReason::AlreadyAssignedToday);
    }

    if role == Role::DayCare {
        if let Some(last_night) = ledger.last_day_in_role(&staff.id, Role::NightDuty) {
            let gap = level.rest_gap();
            if day.day > last_night && day.day - last_night < gap {
                return Err(RejectionReason::RestIntervalViolated);
            }
        }
    }

    if level.consecutive_ban_active() {
        if let Some(last) = ledger.last_day_in_role(&staff.id, role) {
            if last + 1 == day.day {
                return Err(RejectionReason::ConsecutiveDay);
            }
        }
    }

    Ok(())
}

/// Boolean convenience wrapper over [`check`].
pub fn eligible(
    staff: &Staff,
    role: Role,
    day: &CalendarDay,
    ledger: &WorkLedger,
    level: RelaxationLevel,
) -> bool {
    check(staff, role, day, ledger, level).is_ok()
}
