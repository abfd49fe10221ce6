//! Error types for accolade-rs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate trophy identifier: {0}")]
    DuplicateTrophy(String),

    #[error("creator \"{0}\" has no stable id and cannot be scanned")]
    UnidentifiedCreator(String),

    #[error("scanner is shut down")]
    ShutDown,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("trophy check failed: {0}")]
    Check(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
