//! Error types for pair-engine operations.

use thiserror::Error;

/// Input-level failures of a full analysis.
///
/// Individual malformed rows never produce an error; they are dropped during
/// normalization. Only these three conditions abort an analysis.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairError {
    /// No rows at all, or only a header row.
    #[error("the input contains no data rows")]
    EmptyInput,

    /// Every row was malformed and dropped.
    #[error("no valid employee records found in the input")]
    NoValidRecords,

    /// Records exist, but no two employees ever overlapped on a shared project.
    #[error("no overlapping work periods found between employees")]
    NoOverlap,
}

pub type Result<T> = std::result::Result<T, PairError>;
