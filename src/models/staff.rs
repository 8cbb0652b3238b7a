//! Staff model: duty roles, exact hour arithmetic, availability rules.
//!
//! # Hour Model
//! Hours are fixed-point tenths of an hour (`Hours`). Cap checks and
//! equality comparisons are exact; a 12.5h night shift is 125 tenths.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering"

use std::collections::BTreeSet;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use super::{CalendarDay, Weekday};

/// A duration in tenths of an hour.
///
/// Exact fixed-point representation so accumulated totals can be
/// compared against caps without floating-point drift.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Hours(i64);

impl Hours {
    /// Zero hours.
    pub const ZERO: Hours = Hours(0);

    /// Creates a duration from tenths of an hour (125 → 12.5h).
    pub const fn from_tenths(tenths: i64) -> Self {
        Self(tenths)
    }

    /// Creates a duration from whole hours.
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours * 10)
    }

    /// The raw value in tenths of an hour.
    #[inline]
    pub const fn tenths(&self) -> i64 {
        self.0
    }

    /// Lossless conversion to `f64` hours (for solver coefficients).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 10.0
    }

    /// Whether the duration is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Add for Hours {
    type Output = Hours;
    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Hours) {
        self.0 += rhs.0;
    }
}

impl Sub for Hours {
    type Output = Hours;
    fn sub(self, rhs: Hours) -> Hours {
        Hours(self.0 - rhs.0)
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Hours>>(iter: I) -> Hours {
        iter.fold(Hours::ZERO, |acc, h| acc + h)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 10 == 0 {
            write!(f, "{}h", self.0 / 10)
        } else {
            write!(f, "{}.{}h", self.0 / 10, (self.0 % 10).abs())
        }
    }
}

/// The two duty roles.
///
/// Night duty is always resolved before day care within a day because
/// care eligibility depends on the night ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Overnight duty shift (12.5h per assignment).
    NightDuty,
    /// Daytime care shift (6h per assignment).
    DayCare,
}

impl Role {
    /// Fixed per-assignment hour value for this role.
    pub const fn shift_hours(&self) -> Hours {
        match self {
            Role::NightDuty => Hours::from_tenths(125),
            Role::DayCare => Hours::from_tenths(60),
        }
    }

    /// Both roles in within-day resolution order (night first).
    pub const ALL: [Role; 2] = [Role::NightDuty, Role::DayCare];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::NightDuty => write!(f, "night-duty"),
            Role::DayCare => write!(f, "day-care"),
        }
    }
}

/// When a staff member may be placed in a slot at all.
///
/// Attached to a [`Staff`] at creation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvailabilityRule {
    /// No restriction.
    #[default]
    Unrestricted,
    /// Eligible only on the listed weekdays.
    Weekdays(BTreeSet<Weekday>),
    /// Eligible only on the listed day numbers.
    DaysOfMonth(BTreeSet<u8>),
    /// Eligible only within the first `n` canonical 7-day windows of the
    /// month (window `k` covers days `7k+1..=7k+7`). A documented
    /// heuristic, not a calendar-accurate "n times per month" counter.
    MonthlyFrequency(u8),
}

impl AvailabilityRule {
    /// Convenience constructor for a weekday restriction.
    pub fn weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self::Weekdays(days.into_iter().collect())
    }

    /// Convenience constructor for a specific-days restriction.
    pub fn days_of_month(days: impl IntoIterator<Item = u8>) -> Self {
        Self::DaysOfMonth(days.into_iter().collect())
    }

    /// Whether this rule permits work on the given day.
    pub fn permits(&self, day: &CalendarDay) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Weekdays(set) => set.contains(&day.weekday),
            Self::DaysOfMonth(set) => set.contains(&day.day),
            Self::MonthlyFrequency(n) => u16::from(day.day) <= u16::from(*n) * 7,
        }
    }
}

/// A staff member belonging to one site+role group.
///
/// `id` is the ledger key: the same person working in two role groups
/// shares one id, so hours and rest intervals accumulate across groups.
/// `name` must be unique within a site+role group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Ledger key (defaults to `name`).
    pub id: String,
    /// Display name, unique within the site+role group.
    pub name: String,
    /// Duty role of the group this record belongs to.
    pub role: Role,
    /// Total-hours cap across all roles; `None` = unbounded.
    pub cap: Option<Hours>,
    /// Availability restriction for this staff member.
    pub availability: AvailabilityRule,
    /// Day numbers whose cells are fixed-blocked ("0" cells): never
    /// assignable regardless of any other rule.
    pub blocked_days: BTreeSet<u8>,
}

impl Staff {
    /// Creates a staff member with no cap, no restriction, no blocked days.
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            role,
            cap: None,
            availability: AvailabilityRule::Unrestricted,
            blocked_days: BTreeSet::new(),
        }
    }

    /// Overrides the ledger key (for people working in multiple groups).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the total-hours cap.
    pub fn with_cap(mut self, cap: Hours) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Sets the availability rule.
    pub fn with_availability(mut self, rule: AvailabilityRule) -> Self {
        self.availability = rule;
        self
    }

    /// Marks day numbers as fixed-blocked.
    pub fn with_blocked_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.blocked_days.extend(days);
        self
    }

    /// Whether the (staff, day) cell is fixed-blocked.
    #[inline]
    pub fn is_blocked_on(&self, day: u8) -> bool {
        self.blocked_days.contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_arithmetic() {
        let night = Hours::from_tenths(125);
        let care = Hours::from_hours(6);
        assert_eq!((night + care).tenths(), 185);
        assert_eq!((night - care).tenths(), 65);

        let mut acc = Hours::ZERO;
        acc += night;
        acc += night;
        assert_eq!(acc, Hours::from_tenths(250));
    }

    #[test]
    fn test_hours_exact_cap_comparison() {
        // Three 12.5h shifts against a 37.5h cap: exactly at the cap.
        let total: Hours = (0..3).map(|_| Hours::from_tenths(125)).sum();
        let cap = Hours::from_tenths(375);
        assert!(total <= cap);
        assert!(total + Hours::from_tenths(125) > cap);
    }

    #[test]
    fn test_hours_display() {
        assert_eq!(Hours::from_tenths(125).to_string(), "12.5h");
        assert_eq!(Hours::from_hours(6).to_string(), "6h");
        assert_eq!(Hours::ZERO.to_string(), "0h");
    }

    #[test]
    fn test_role_shift_hours() {
        assert_eq!(Role::NightDuty.shift_hours(), Hours::from_tenths(125));
        assert_eq!(Role::DayCare.shift_hours(), Hours::from_hours(6));
        assert_eq!(Role::ALL[0], Role::NightDuty);
    }

    #[test]
    fn test_availability_unrestricted() {
        let rule = AvailabilityRule::Unrestricted;
        assert!(rule.permits(&CalendarDay::new(1)));
        assert!(rule.permits(&CalendarDay::new(31)));
    }

    #[test]
    fn test_availability_weekdays() {
        let rule = AvailabilityRule::weekdays([Weekday::Tue, Weekday::Wed]);
        assert!(rule.permits(&CalendarDay::new(2))); // Tue
        assert!(rule.permits(&CalendarDay::new(3))); // Wed
        assert!(!rule.permits(&CalendarDay::new(4))); // Thu
    }

    #[test]
    fn test_availability_days_of_month() {
        let rule = AvailabilityRule::days_of_month([5, 15, 25]);
        assert!(rule.permits(&CalendarDay::new(15)));
        assert!(!rule.permits(&CalendarDay::new(16)));
    }

    #[test]
    fn test_availability_monthly_frequency() {
        // n=1 → first window only (days 1-7)
        let once = AvailabilityRule::MonthlyFrequency(1);
        assert!(once.permits(&CalendarDay::new(7)));
        assert!(!once.permits(&CalendarDay::new(8)));

        // n=2 → first two windows (days 1-14)
        let twice = AvailabilityRule::MonthlyFrequency(2);
        assert!(twice.permits(&CalendarDay::new(14)));
        assert!(!twice.permits(&CalendarDay::new(15)));

        // n=0 permits nothing
        let never = AvailabilityRule::MonthlyFrequency(0);
        assert!(!never.permits(&CalendarDay::new(1)));
    }

    #[test]
    fn test_staff_builder() {
        let s = Staff::new("Tanaka", Role::NightDuty)
            .with_cap(Hours::from_tenths(500))
            .with_availability(AvailabilityRule::weekdays([Weekday::Mon]))
            .with_blocked_days([4, 11]);

        assert_eq!(s.id, "Tanaka");
        assert_eq!(s.cap, Some(Hours::from_tenths(500)));
        assert!(s.is_blocked_on(4));
        assert!(!s.is_blocked_on(5));
    }

    #[test]
    fn test_staff_shared_id() {
        let night = Staff::new("Sato", Role::NightDuty).with_id("sato");
        let care = Staff::new("Sato", Role::DayCare).with_id("sato");
        assert_eq!(night.id, care.id);
        assert_ne!(night.role, care.role);
    }
}
