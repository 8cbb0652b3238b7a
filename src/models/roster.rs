//! Roster model: sites, role groups, and duty slots.
//!
//! A roster is an ordered list of sites (independently staffed
//! facilities), each carrying its staff records. An external parser is
//! responsible for populating the model; the engine trusts it and
//! performs no layout inference.

use serde::{Deserialize, Serialize};

use super::{Role, Staff};

/// An independently staffed facility with its own duty slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Site identifier (e.g. "GH1").
    pub id: String,
    /// Staff records across both role groups.
    pub staff: Vec<Staff>,
}

impl Site {
    /// Creates an empty site.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            staff: Vec::new(),
        }
    }

    /// Adds a staff member.
    pub fn with_staff(mut self, staff: Staff) -> Self {
        self.staff.push(staff);
        self
    }

    /// Iterates the staff of one role group, in roster order.
    pub fn staff_in_role(&self, role: Role) -> impl Iterator<Item = &Staff> {
        self.staff.iter().filter(move |s| s.role == role)
    }
}

/// The complete input roster: all sites and their staff.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Sites in scheduling order (site A is resolved before site B).
    pub sites: Vec<Site>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a site.
    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    /// Looks up a staff record by site, role, and name.
    pub fn find_staff(&self, site_id: &str, role: Role, name: &str) -> Option<&Staff> {
        self.sites
            .iter()
            .find(|s| s.id == site_id)?
            .staff_in_role(role)
            .find(|s| s.name == name)
    }

    /// Iterates every staff record across all sites.
    pub fn all_staff(&self) -> impl Iterator<Item = (&Site, &Staff)> {
        self.sites
            .iter()
            .flat_map(|site| site.staff.iter().map(move |s| (site, s)))
    }
}

/// One assignable cell of the roster grid: (site, role, day).
///
/// Exactly one staff member must fill it in must-fill mode; in
/// best-effort mode it may remain empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DutySlot {
    /// Owning site.
    pub site: String,
    /// Duty role.
    pub role: Role,
    /// 1-based day number.
    pub day: u8,
}

impl DutySlot {
    /// Creates a slot.
    pub fn new(site: impl Into<String>, role: Role, day: u8) -> Self {
        Self {
            site: site.into(),
            role,
            day,
        }
    }
}

impl std::fmt::Display for DutySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/day {}", self.site, self.role, self.day)
    }
}
