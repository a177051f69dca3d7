use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CrateError>;
