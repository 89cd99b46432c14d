//! Record normalization: raw text rows → typed assignment records.
//!
//! Rows come from an external intake layer as sequences of string fields
//! (`EmpID, ProjectID, DateFrom, DateTo`). Malformed rows are dropped, never
//! reported as errors. An optional header row is detected heuristically.

use chrono::NaiveDate;
use std::fmt;
use tracing::{debug, warn};

use crate::date::parse_date;

/// Token that marks an open-ended assignment in the end-date column.
const OPEN_END_TOKEN: &str = "NULL";

/// One employee's tenure on one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssignmentRecord {
    /// Positive employee id.
    pub employee_id: u32,
    /// Positive project id.
    pub project_id: u32,
    /// Inclusive start of the assignment.
    pub date_from: NaiveDate,
    /// End of the assignment, or `None` when it is still running.
    pub date_to: Option<NaiveDate>,
}

impl AssignmentRecord {
    pub fn new(
        employee_id: u32,
        project_id: u32,
        date_from: NaiveDate,
        date_to: Option<NaiveDate>,
    ) -> Self {
        Self {
            employee_id,
            project_id,
            date_from,
            date_to,
        }
    }

    /// `true` when the assignment has no end date.
    pub fn is_open(&self) -> bool {
        self.date_to.is_none()
    }
}

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowRejection {
    TooFewFields(usize),
    EmployeeId(String),
    ProjectId(String),
    DateFrom(String),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::TooFewFields(n) => write!(f, "expected at least 3 fields, got {}", n),
            RowRejection::EmployeeId(v) => write!(f, "invalid employee id '{}'", v),
            RowRejection::ProjectId(v) => write!(f, "invalid project id '{}'", v),
            RowRejection::DateFrom(v) => write!(f, "unparseable start date '{}'", v),
        }
    }
}

/// Returns `true` when the first row looks like a header.
///
/// Only the first row is examined. A row with fewer than two fields is never a
/// header; otherwise it is one when its first two fields are not both integers.
pub fn has_header<R, F>(rows: &[R]) -> bool
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    let Some(first) = rows.first() else {
        return false;
    };
    let fields = first.as_ref();
    if fields.len() < 2 {
        return false;
    }
    !is_integer(fields[0].as_ref()) || !is_integer(fields[1].as_ref())
}

/// Convert raw rows into assignment records.
///
/// A detected header row is skipped. Rows with fewer than three fields, an
/// employee or project id that is not a positive integer, or an unparseable
/// start date are dropped. An end-date field that is missing, blank or `NULL`
/// (any case) yields an open-ended record.
pub fn normalize<R, F>(rows: &[R]) -> Vec<AssignmentRecord>
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    let skip = usize::from(has_header(rows));
    if skip == 1 {
        debug!("skipping header row");
    }

    let mut records = Vec::with_capacity(rows.len().saturating_sub(skip));
    for (index, row) in rows.iter().enumerate().skip(skip) {
        match parse_row(index, row.as_ref()) {
            Ok(record) => records.push(record),
            Err(reason) => debug!(row = index, %reason, "dropping malformed row"),
        }
    }
    records
}

fn parse_row<F: AsRef<str>>(
    index: usize,
    fields: &[F],
) -> std::result::Result<AssignmentRecord, RowRejection> {
    if fields.len() < 3 {
        return Err(RowRejection::TooFewFields(fields.len()));
    }

    let raw_employee = fields[0].as_ref().trim();
    let employee_id =
        parse_id(raw_employee).ok_or_else(|| RowRejection::EmployeeId(raw_employee.to_string()))?;

    let raw_project = fields[1].as_ref().trim();
    let project_id =
        parse_id(raw_project).ok_or_else(|| RowRejection::ProjectId(raw_project.to_string()))?;

    let raw_from = fields[2].as_ref().trim();
    let date_from = parse_date(raw_from).ok_or_else(|| RowRejection::DateFrom(raw_from.to_string()))?;

    let date_to = fields.get(3).and_then(|raw| parse_end_date(index, raw.as_ref()));

    Ok(AssignmentRecord {
        employee_id,
        project_id,
        date_from,
        date_to,
    })
}

/// A blank or `NULL` end date means "still running". An end date that matches
/// no layout is also read as open, with a warning.
fn parse_end_date(index: usize, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(OPEN_END_TOKEN) {
        return None;
    }
    let parsed = parse_date(raw);
    if parsed.is_none() {
        warn!(row = index, value = raw, "unparseable end date, treating assignment as open");
    }
    parsed
}

/// Ids are positive integers; zero is rejected.
fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|id| *id > 0)
}

fn is_integer(raw: &str) -> bool {
    raw.trim().parse::<i64>().is_ok()
}
