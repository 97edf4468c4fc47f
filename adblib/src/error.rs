//! Единый тип ошибок публичного API.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdbError {
    #[error("source not found or unreadable: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("parse error at {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("no balance records found in input")]
    EmptyInput,

    #[error("invalid period: start {start} is after end {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("division by zero: period contains no days")]
    DivisionByZero,

    #[error("decimal overflow while summing daily balances")]
    Overflow,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdbError {
    pub(crate) fn parse(origin: impl ToString, message: impl Into<String>) -> Self {
        AdbError::Parse {
            origin: origin.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdbError>;
