//! Calendar model: working days and weekday derivation.
//!
//! The scheduling horizon is an ordered sequence of day numbers (1–31).
//! Weekdays are derived positionally: day 1 is a Monday and the week
//! repeats every 7 days. The consumer decides which real month the day
//! numbers refer to.

use serde::{Deserialize, Serialize};

/// Day of the week.
///
/// Day number 1 maps to `Mon`; subsequent days follow `(day - 1) % 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Derives the weekday for a 1-based day number.
    pub fn from_day_number(day: u8) -> Self {
        match day.saturating_sub(1) % 7 {
            0 => Self::Mon,
            1 => Self::Tue,
            2 => Self::Wed,
            3 => Self::Thu,
            4 => Self::Fri,
            5 => Self::Sat,
            _ => Self::Sun,
        }
    }
}

/// A single working day in the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// 1-based day number within the month (1–31).
    pub day: u8,
    /// Weekday derived from the day number.
    pub weekday: Weekday,
}

impl CalendarDay {
    /// Creates a calendar day with its derived weekday.
    pub fn new(day: u8) -> Self {
        Self {
            day,
            weekday: Weekday::from_day_number(day),
        }
    }
}

/// The ordered scheduling horizon.
///
/// Day numbers must be strictly increasing;
/// [`validate_roster`](crate::validation::validate_roster) rejects
/// horizons that are not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Horizon {
    days: Vec<CalendarDay>,
}

impl Horizon {
    /// Builds a horizon from 1-based day numbers.
    pub fn from_days(days: impl IntoIterator<Item = u8>) -> Self {
        Self {
            days: days.into_iter().map(CalendarDay::new).collect(),
        }
    }

    /// A horizon of `n` consecutive days starting at day 1.
    pub fn month(n: u8) -> Self {
        Self::from_days(1..=n)
    }

    /// Iterates the days in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter()
    }

    /// The underlying day sequence.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Number of days in the horizon.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the horizon is empty.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
