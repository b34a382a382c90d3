//! Unified application error type.
//! All modules (db, storage, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Draft storage
    // ---------------------------
    #[error("Draft storage error: {0}")]
    Storage(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Unknown form field: {0}")]
    InvalidField(String),

    #[error("Missing value for field '{0}'")]
    MissingValue(String),

    #[error("Unknown signature role: {0}")]
    InvalidSignatureRole(String),

    #[error("Unknown vessel: {0}")]
    UnknownVessel(String),

    // ---------------------------
    // Form lifecycle errors
    // ---------------------------
    #[error("A clear request is awaiting confirmation")]
    ClearPending,

    #[error("No clear request to confirm")]
    ClearNotRequested,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("The treatment log has already been submitted")]
    AlreadySubmitted,

    #[error("The form is no longer mounted")]
    Unmounted,

    #[error("Form has {0} validation error(s)")]
    ValidationFailed(usize),

    #[error("Submission failed: {0}")]
    Submission(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
