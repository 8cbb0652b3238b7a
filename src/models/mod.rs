//! Roster scheduling domain models.
//!
//! Provides the core data types for representing a duty roster and its
//! solution: staff records grouped by site and role, the calendar
//! horizon, duty slots, assignments, and the workload summary.
//!
//! # Domain Mapping
//!
//! | duty-roster | Source roster |
//! |-------------|--------------|
//! | Site | Group home |
//! | Role | Night duty / day care row group |
//! | Staff | Named roster row with cap and constraint cell |
//! | DutySlot | One (site, role, date) cell column |
//! | Assignment | The one retained cell value per slot |

mod calendar;
mod roster;
mod schedule;
mod staff;

pub use calendar::{CalendarDay, Horizon, Weekday};
pub use roster::{DutySlot, Roster, Site};
pub use schedule::{Assignment, Schedule, StaffWorkload, Unfilled, UnfillableReason, WorkloadSummary};
pub use staff::{AvailabilityRule, Hours, Role, Staff};
