//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, ErrorKind};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid catalog seed {}: {message}", path.display())]
    InvalidSeed { path: PathBuf, message: String },

    #[error("catalog seed {} rejected: {source}", path.display())]
    SeedRejected {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot read catalog seed {}", path.display())]
    SeedUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApplicationError {
    /// Domain error kind behind this error, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApplicationError::Domain(e) | ApplicationError::SeedRejected { source: e, .. } => {
                Some(e.kind())
            }
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
