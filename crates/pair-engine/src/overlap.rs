//! Overlap of two assignments on the same project.
//!
//! Two records overlap when they belong to different employees on the same
//! project and `max(from_a, from_b) <= min(end_a, end_b)`. An open-ended record
//! ends at the caller-supplied `as_of` instant.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::record::AssignmentRecord;

/// An unordered employee pair, stored with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: u32,
    high: u32,
}

impl PairKey {
    /// Build the canonical key for two employee ids, in either order.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }
}

/// Days two employees overlapped on one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverlap {
    #[serde(rename = "employee1Id")]
    pub employee_id_low: u32,
    #[serde(rename = "employee2Id")]
    pub employee_id_high: u32,
    pub project_id: u32,
    /// Elapsed days between overlap start and end, rounded up.
    pub days_worked: u64,
    /// First day of the overlap.
    pub date_from: NaiveDate,
    /// Last day of the overlap (the `as_of` date when both ends are open).
    pub date_to: NaiveDate,
}

impl ProjectOverlap {
    pub fn key(&self) -> PairKey {
        PairKey::new(self.employee_id_low, self.employee_id_high)
    }
}

/// The instant at which `date` begins.
pub fn start_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Where `record` ends for overlap purposes: its end date, or `as_of` if open.
pub fn effective_end(record: &AssignmentRecord, as_of: NaiveDateTime) -> NaiveDateTime {
    record.date_to.map_or(as_of, start_of)
}

/// Compute the overlap between two assignments, if they form a candidate pair
/// and their intervals intersect.
///
/// A same-day overlap yields `days_worked == 0` and is still returned. A
/// partial day, possible only when an end is the `as_of` instant, counts as a
/// full day.
pub fn project_overlap(
    a: &AssignmentRecord,
    b: &AssignmentRecord,
    as_of: NaiveDateTime,
) -> Option<ProjectOverlap> {
    if a.employee_id == b.employee_id || a.project_id != b.project_id {
        return None;
    }

    let start = start_of(a.date_from).max(start_of(b.date_from));
    let end = effective_end(a, as_of).min(effective_end(b, as_of));
    if start > end {
        return None;
    }

    let key = PairKey::new(a.employee_id, b.employee_id);
    Some(ProjectOverlap {
        employee_id_low: key.low(),
        employee_id_high: key.high(),
        project_id: a.project_id,
        days_worked: ceil_days(end - start),
        date_from: start.date(),
        date_to: end.date(),
    })
}

fn ceil_days(span: TimeDelta) -> u64 {
    let whole = span.num_days();
    let days = if span > TimeDelta::days(whole) {
        whole + 1
    } else {
        whole
    };
    days.unsigned_abs()
}
