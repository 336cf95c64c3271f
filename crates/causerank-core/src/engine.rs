//! The answer engine seam
//!
//! The answer-computation algorithm is an external collaborator; this
//! trait is the boundary the rest of the system programs against.

use crate::{AnswerTask, Index, Query, RankedAnswers, Result};
use std::sync::Arc;

/// Interface to the answer-computation component.
///
/// Implementations must be thread-safe: `prepare` runs on the request
/// path, `compute` only ever runs on worker-pool threads. `compute` is
/// synchronous: it is CPU-bound work that must never run on the
/// reactor, and the pool is the only caller.
pub trait AnswerEngine: Send + Sync {
    /// Build a task for a query against the shared index.
    ///
    /// Exposes the IR query form and the engine's corpus coverage for
    /// the query before any expensive computation happens.
    fn prepare(&self, index: &Index, query: &Query) -> Result<AnswerTask>;

    /// Compute ranked answers for a prepared task.
    fn compute(&self, index: &Index, task: &AnswerTask) -> Result<RankedAnswers>;
}

/// Arc-wrapped engine for thread-safe sharing
pub type SharedEngine = Arc<dyn AnswerEngine>;
