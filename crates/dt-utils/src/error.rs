//! Error types for dt-utils operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DtError {
    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Negative duration: {0}")]
    NegativeDuration(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, DtError>;
