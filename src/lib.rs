//! # duty-roster
//!
//! A deterministic shift assignment engine for facilities that staff two
//! duty types per site and day: an overnight duty (12.5h) and a daytime
//! care duty (6h). Given a roster of sites and staff (with hour caps,
//! availability rules, and fixed-blocked days) and a scheduling horizon,
//! the engine produces a complete assignment or a diagnosis of why one
//! is impossible.
//!
//! ## Components
//!
//! - **Models** ([`models`]): calendar, staff, roster, and schedule types
//! - **Eligibility** ([`eligibility`]): the per-slot candidate predicate
//!   and the relaxation ladder that loosens soft rules under pressure
//! - **Ledger** ([`ledger`]): per-run accumulator of hours and last-worked
//!   days, shared across sites and roles by ledger id
//! - **Schedulers** ([`scheduler`]): a greedy day-by-day pass and an
//!   exact 0-1 integer program, behind one [`schedule_roster`] entry point
//! - **Validation** ([`validation`]): structural input checks that run
//!   before any slot is processed
//!
//! ## Quick Start
//!
//! ```rust
//! use duty_roster::models::{Horizon, Hours, Role, Roster, Site, Staff};
//! use duty_roster::scheduler::{schedule_roster, SchedulerConfig};
//!
//! let roster = Roster::new().with_site(
//!     Site::new("GH1")
//!         .with_staff(Staff::new("Asada", Role::NightDuty).with_cap(Hours::from_tenths(500)))
//!         .with_staff(Staff::new("Baba", Role::NightDuty))
//!         .with_staff(Staff::new("Chiba", Role::DayCare)),
//! );
//!
//! let schedule = schedule_roster(&roster, &Horizon::month(7), &SchedulerConfig::default())?;
//! assert!(schedule.is_complete());
//! for a in &schedule.assignments {
//!     println!("{} -> {} ({})", a.slot, a.staff_name, a.hours);
//! }
//! # Ok::<(), duty_roster::ScheduleError>(())
//! ```
//!
//! Identical inputs always produce identical schedules; ties between
//! equally loaded candidates break by name, never by chance.
//!
//! ## Reference
//! Pinedo, M. (2016). Scheduling: Theory, Algorithms, and Systems.

pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
pub use scheduler::{schedule_roster, FillMode, SchedulerConfig, Strategy};
