//! Centralised error type for the library.
//!
//! Validation errors (unknown country, invalid period) are raised immediately
//! and never recovered internally; I/O and HTTP errors propagate to the caller.

use crate::models::DatasetState;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("data file not found: {0}")]
    MissingFile(PathBuf),

    #[error("malformed data: {0}")]
    MalformedData(String),

    #[error("dataset not ready for this operation (currently {0})")]
    NotReady(DatasetState),

    #[error("unknown country: {0:?}")]
    UnknownCountry(String),

    #[error("invalid period: start {start} is after end {end}")]
    InvalidPeriod { start: i32, end: i32 },

    #[error("forecast horizon must be at least 1")]
    InvalidHorizon,

    #[error("insufficient data: {required} observations required, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("least-squares solve failed: design matrix is ill-conditioned")]
    IllConditioned,

    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
