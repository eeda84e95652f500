#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive not found: {0}")]
    NotFound(String),

    #[error("invalid archive: {0}")]
    Invalid(String),

    #[error("path is outside input dir: {0}")]
    Outside(String),
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;
