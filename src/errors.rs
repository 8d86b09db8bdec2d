//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent, and every error knows which status it maps to.

use std::fmt;
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

    #[error("Could not assign a unique link after {0} attempts")]
    LinkExhausted(u32),

    // ---------------------------
    // Client input
    // ---------------------------
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No event found for link '{0}'")]
    NotFound(String),

    #[error("An access code is required")]
    MissingAccess,

    #[error("Access code does not match")]
    Forbidden,

    // ---------------------------
    // Access hashing
    // ---------------------------
    #[error("Access hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Request outcome, expressed with the HTTP status the web front end answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Found,
    BadRequest,
    Forbidden,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Found => 302,
            Status::BadRequest => 400,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Found => "Found",
            Status::BadRequest => "Bad Request",
            Status::Forbidden => "Forbidden",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.code() >= 500
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::Validation(_) | AppError::MissingAccess => Status::BadRequest,
            AppError::Forbidden => Status::Forbidden,
            AppError::NotFound(_) => Status::NotFound,
            _ => Status::InternalServerError,
        }
    }

    /// Message safe to show to the requester: server errors are not detailed.
    pub fn public_message(&self) -> String {
        let status = self.status();
        if status.is_server_error() {
            status.to_string()
        } else {
            format!("{}: {}", status, self)
        }
    }
}
