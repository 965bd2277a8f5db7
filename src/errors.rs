//! Unified application error type.
//! All modules (db, core, nlt, gateway, cli) return AppError to keep the
//! error handling consistent and easy to manage.

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

    // ---------------------------
    // Natural-language time parsing
    // ---------------------------
    #[error("Could not understand time expression: '{0}'")]
    TimeParse(String),

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("No item found matching '{0}'")]
    NotFound(String),

    #[error("Invalid event kind: {0}")]
    InvalidEventKind(String),

    // ---------------------------
    // Payment gateway
    // ---------------------------
    #[error("Invalid gateway signature")]
    InvalidSignature,

    #[error("Gateway error: {0}")]
    Gateway(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
