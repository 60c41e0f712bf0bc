//! Error types for a generation run.
//!
//! Per-field anomalies never surface here: unrecognized shapes degrade to
//! the unknown classification and excluded fields are simply absent. Only
//! run-level emptiness and caller-contract violations are errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No records were supplied, or none survived exclusion filtering.
    #[error("no eligible records found for generation")]
    NoEligibleRecords,

    /// Filter or sort synthesis was requested for a field whose category
    /// does not support it. The orchestration layer must gate on
    /// filterability, so this aborts the record instead of dropping it.
    #[error("field `{0}` is not filterable")]
    NotFilterable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
