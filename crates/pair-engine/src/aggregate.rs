//! Aggregate pairwise overlaps per employee pair and pick the longest pair.
//!
//! Every record is compared with every later record (`i < j`, input order).
//! Overlaps are grouped under their [`PairKey`]; aggregates keep the order in
//! which their keys were first seen, and overlaps within an aggregate keep
//! discovery order. That order is what [`TieBreak::FirstDiscovered`] relies on.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

use crate::overlap::{project_overlap, PairKey, ProjectOverlap};
use crate::record::AssignmentRecord;

/// How to choose between pairs with equal totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the pair whose first overlap was discovered earliest.
    #[default]
    FirstDiscovered,
    /// Keep the pair with the smallest `(low, high)` employee ids.
    /// Independent of input order.
    LowestPair,
}

impl TieBreak {
    /// Whether `candidate` should replace `current` as the best pair.
    fn prefers(self, candidate: &PairAggregate, current: &PairAggregate) -> bool {
        match self {
            TieBreak::FirstDiscovered => candidate.total_days_worked > current.total_days_worked,
            TieBreak::LowestPair => {
                (Reverse(candidate.total_days_worked), candidate.key())
                    < (Reverse(current.total_days_worked), current.key())
            }
        }
    }
}

/// All overlaps of one employee pair, across projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairAggregate {
    #[serde(rename = "employee1Id")]
    pub employee_id_low: u32,
    #[serde(rename = "employee2Id")]
    pub employee_id_high: u32,
    pub total_days_worked: u64,
    /// Per-project breakdown, in discovery order.
    pub projects: Vec<ProjectOverlap>,
}

/// The winning pair of an analysis.
pub type LongestPair = PairAggregate;

impl PairAggregate {
    fn new(key: PairKey) -> Self {
        Self {
            employee_id_low: key.low(),
            employee_id_high: key.high(),
            total_days_worked: 0,
            projects: Vec::new(),
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.employee_id_low, self.employee_id_high)
    }

    fn push(&mut self, overlap: ProjectOverlap) {
        self.total_days_worked += overlap.days_worked;
        self.projects.push(overlap);
    }
}

/// Compute every pairwise overlap and group them by employee pair.
///
/// Returns aggregates in the order their pair was first discovered. Pairs with
/// only zero-day overlaps are included.
pub fn aggregate_pairs(records: &[AssignmentRecord], as_of: NaiveDateTime) -> Vec<PairAggregate> {
    let mut aggregates: Vec<PairAggregate> = Vec::new();
    let mut slots: HashMap<PairKey, usize> = HashMap::new();
    let mut overlaps = 0usize;

    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            let Some(overlap) = project_overlap(a, b, as_of) else {
                continue;
            };
            overlaps += 1;
            let key = overlap.key();
            let slot = *slots.entry(key).or_insert_with(|| {
                aggregates.push(PairAggregate::new(key));
                aggregates.len() - 1
            });
            aggregates[slot].push(overlap);
        }
    }

    debug!(
        records = records.len(),
        overlaps,
        pairs = aggregates.len(),
        "aggregated project overlaps"
    );
    aggregates
}

/// Pick the pair with the largest total, scanning in discovery order.
///
/// Returns `None` only when `aggregates` is empty.
pub fn select_longest<I>(aggregates: I, tie_break: TieBreak) -> Option<LongestPair>
where
    I: IntoIterator<Item = PairAggregate>,
{
    let mut best: Option<PairAggregate> = None;
    for candidate in aggregates {
        let replace = match &best {
            None => true,
            Some(current) => tie_break.prefers(&candidate, current),
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}

/// Sort aggregates by descending total, breaking ties with `tie_break`.
///
/// The first element is always the pair [`select_longest`] would return.
pub fn rank_pairs(mut aggregates: Vec<PairAggregate>, tie_break: TieBreak) -> Vec<PairAggregate> {
    match tie_break {
        // Stable sort: equal totals keep discovery order.
        TieBreak::FirstDiscovered => aggregates.sort_by_key(|a| Reverse(a.total_days_worked)),
        TieBreak::LowestPair => aggregates.sort_by_key(|a| (Reverse(a.total_days_worked), a.key())),
    }
    aggregates
}

/// Find the longest-working pair, ending open assignments at the local
/// wall-clock time. Results for open-ended records therefore change over time.
pub fn find_longest_working_pair(records: &[AssignmentRecord]) -> Option<LongestPair> {
    find_longest_working_pair_at(records, Local::now().naive_local(), TieBreak::default())
}

/// Find the longest-working pair as of a fixed instant.
pub fn find_longest_working_pair_at(
    records: &[AssignmentRecord],
    as_of: NaiveDateTime,
    tie_break: TieBreak,
) -> Option<LongestPair> {
    select_longest(aggregate_pairs(records, as_of), tie_break)
}
