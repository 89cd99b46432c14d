//! End-to-end analysis: raw rows → longest-working pair.
//!
//! Chains [`normalize`] and [`aggregate_pairs`] and turns the three
//! input-level failure conditions into distinct [`PairError`] variants. No
//! partial result is ever returned.

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::aggregate::{aggregate_pairs, rank_pairs, select_longest, LongestPair, PairAggregate, TieBreak};
use crate::error::{PairError, Result};
use crate::record::{has_header, normalize};

/// Knobs for a single analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Where open-ended assignments end. `None` uses the local wall clock.
    pub as_of: Option<NaiveDateTime>,
    pub tie_break: TieBreak,
}

impl AnalysisOptions {
    pub fn as_of(mut self, as_of: NaiveDateTime) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    fn resolve_as_of(&self) -> NaiveDateTime {
        self.as_of.unwrap_or_else(|| Local::now().naive_local())
    }
}

/// Find the longest-working pair with default options.
///
/// # Errors
/// - [`PairError::EmptyInput`] if there are no rows, or only a header row.
/// - [`PairError::NoValidRecords`] if every row is malformed.
/// - [`PairError::NoOverlap`] if no two employees overlapped on a project.
pub fn analyze<R, F>(rows: &[R]) -> Result<LongestPair>
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    analyze_with(rows, &AnalysisOptions::default())
}

/// Find the longest-working pair. See [`analyze`] for the error conditions.
pub fn analyze_with<R, F>(rows: &[R], options: &AnalysisOptions) -> Result<LongestPair>
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    let aggregates = overlapping_pairs(rows, options)?;
    select_longest(aggregates, options.tie_break).ok_or(PairError::NoOverlap)
}

/// Rank every overlapping pair by total days, longest first.
///
/// The returned list is never empty; its first entry is what [`analyze_with`]
/// returns for the same input. Fails under the same conditions as [`analyze`].
pub fn rank<R, F>(rows: &[R], options: &AnalysisOptions) -> Result<Vec<PairAggregate>>
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    let aggregates = overlapping_pairs(rows, options)?;
    Ok(rank_pairs(aggregates, options.tie_break))
}

fn overlapping_pairs<R, F>(rows: &[R], options: &AnalysisOptions) -> Result<Vec<PairAggregate>>
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    if rows.is_empty() || (rows.len() == 1 && has_header(rows)) {
        return Err(PairError::EmptyInput);
    }

    let records = normalize(rows);
    info!(
        rows = rows.len(),
        records = records.len(),
        "normalized assignment rows"
    );
    if records.is_empty() {
        return Err(PairError::NoValidRecords);
    }

    let aggregates = aggregate_pairs(&records, options.resolve_as_of());
    if aggregates.is_empty() {
        return Err(PairError::NoOverlap);
    }
    info!(pairs = aggregates.len(), "found overlapping employee pairs");
    Ok(aggregates)
}
