//! # Causerank
//!
//! Application layer for the causerank question answering front end:
//! the worker pool that keeps expensive answer computation off the
//! reactor, the training log sink, corpus loading and the baseline
//! answer engine.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod pool;
pub mod trainlog;

// Re-export core types
pub use causerank_core::{
    Answer, AnswerEngine, AnswerTask, CoreError, Index, Page, Query, QueryId, RankedAnswers,
    SharedEngine,
};

pub use config::CauserankConfig;
pub use corpus::load_corpus;
pub use engine::OverlapEngine;
pub use error::{CauserankError, Result};
pub use pool::{PoolConfig, PoolError, WorkerPool};
pub use trainlog::{FileTrainLog, MemoryTrainLog, TrainLog};
