//! Error types for causerank-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Computation error: {0}")]
    Compute(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
