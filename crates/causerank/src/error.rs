//! Error types for the causerank crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CauserankError {
    #[error("Core error: {0}")]
    Core(#[from] causerank_core::CoreError),

    #[error("Pool error: {0}")]
    Pool(#[from] crate::pool::PoolError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] crate::corpus::CorpusError),

    #[error("Training log error: {0}")]
    TrainLog(#[from] crate::trainlog::TrainLogError),
}

pub type Result<T> = std::result::Result<T, CauserankError>;
