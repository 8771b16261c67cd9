use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Case already exists: {0}")]
    CaseExists(String),

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
