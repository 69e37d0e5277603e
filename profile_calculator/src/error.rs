//! Error types for the profile pipeline.
//!
//! Every variant is fatal for the table or (season, day-type) computation it
//! occurs in; nothing here is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    #[error("column '{column}' has no value at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("expected {expected} rows, found {actual}")]
    RowCount { expected: usize, actual: usize },

    /// Quarter-hour tables must split evenly into hours.
    #[error("{rows} rows cannot be grouped into whole hours")]
    NotQuarterHourAligned { rows: usize },

    #[error("unparseable timestamp '{value}' at row {row}")]
    UnparseableTimestamp { row: usize, value: String },

    #[error("no observations for hour {hour}")]
    MissingHour { hour: usize },

    #[error("hour sets differ: left {left:?}, right {right:?}")]
    JoinMismatch { left: Vec<u32>, right: Vec<u32> },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProfileResult<T> = Result<T, ProfileError>;
