//! # pair-engine
//!
//! Find the pair of employees who worked together the longest.
//!
//! Input is a table of project assignments (`EmpID, ProjectID, DateFrom,
//! DateTo`) supplied as raw text rows. The engine normalizes the rows, computes
//! the date overlap of every two assignments on the same project, sums the
//! overlaps per employee pair and returns the pair with the largest total along
//! with a per-project breakdown.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pair_engine::{analyze_with, AnalysisOptions};
//!
//! let rows = vec![
//!     vec!["EmpID", "ProjectID", "DateFrom", "DateTo"],
//!     vec!["1", "10", "2024-01-01", "2024-01-10"],
//!     vec!["2", "10", "2024-01-05", "2024-01-15"],
//! ];
//! let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let pair = analyze_with(&rows, &AnalysisOptions::default().as_of(as_of)).unwrap();
//! assert_eq!((pair.employee_id_low, pair.employee_id_high), (1, 2));
//! assert_eq!(pair.total_days_worked, 5);
//! ```
//!
//! ## Modules
//!
//! - [`record`] — raw rows → [`AssignmentRecord`]s, header detection
//! - [`date`] — strict multi-layout date parsing
//! - [`overlap`] — overlap of two assignments on one project
//! - [`aggregate`] — per-pair aggregation and longest-pair selection
//! - [`analyze`](mod@analyze) — end-to-end analysis with input-level errors
//! - [`error`] — Error types

pub mod aggregate;
pub mod analyze;
pub mod date;
pub mod error;
pub mod overlap;
pub mod record;

pub use aggregate::{
    aggregate_pairs, find_longest_working_pair, find_longest_working_pair_at, rank_pairs,
    select_longest, LongestPair, PairAggregate, TieBreak,
};
pub use analyze::{analyze, analyze_with, rank, AnalysisOptions};
pub use date::{parse_date, parse_date_with_format, DateFormat, DATE_FORMATS};
pub use error::PairError;
pub use overlap::{project_overlap, PairKey, ProjectOverlap};
pub use record::{has_header, normalize, AssignmentRecord};
