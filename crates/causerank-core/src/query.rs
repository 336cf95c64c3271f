//! Query and answer types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ranking breadth (`top` parameter).
pub const DEFAULT_TOP: usize = 5;
/// Default maximum number of answers rendered (`num` parameter).
pub const DEFAULT_NUM: usize = 100;
/// Default corpus offset (`start` parameter).
pub const DEFAULT_START: usize = 0;
/// Default similarity threshold (`lch` parameter).
pub const DEFAULT_LCH: f64 = 2.16;

/// NewType pattern for per-request identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryId(String);

impl QueryId {
    /// Create a new QueryId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create from existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One parsed question request.
///
/// Built once at parse time with the documented literal defaults and
/// never mutated; every request owns its own value, nothing is shared
/// across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// Unique request ID
    pub id: QueryId,
    /// Question text, verbatim as received
    pub text: String,
    /// Corpus offset
    pub start: usize,
    /// Upstream ranking breadth
    pub top: usize,
    /// Maximum answers to render
    pub num: usize,
    /// Similarity threshold
    pub lch: f64,
    /// Whether to record this response in the training log
    pub train: bool,
}

impl Query {
    /// Create a query with the default parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: QueryId::new(),
            text: text.into(),
            start: DEFAULT_START,
            top: DEFAULT_TOP,
            num: DEFAULT_NUM,
            lch: DEFAULT_LCH,
            train: false,
        }
    }
}

/// One unit of engine work.
///
/// Built by [`AnswerEngine::prepare`](crate::AnswerEngine::prepare)
/// from a query and the shared index, handed to the worker pool and
/// consumed exactly once. Serializable because it crosses the pool
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerTask {
    /// ID of the originating query
    pub query_id: QueryId,
    /// Question text, verbatim
    pub text: String,
    /// Ordered tokens of the information-retrieval query form
    pub ir_query: Vec<String>,
    /// Engine-reported corpus coverage for this query
    pub num_pages: usize,
    /// Corpus offset
    pub start: usize,
    /// Ranking breadth
    pub top: usize,
    /// Similarity threshold
    pub lch: f64,
}

/// A single ranked answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Display form of the answer
    pub display: String,
    /// Ordered feature values used for ranking and training logs
    pub features: Vec<f64>,
}

/// The engine's result for one task: ranked answers plus the tagged
/// query form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedAnswers {
    /// ID of the originating query
    pub query_id: QueryId,
    /// Answers in rank order
    pub answers: Vec<Answer>,
    /// Linguistically annotated form of the question
    pub tagged_query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = Query::new("why do birds sing");
        assert_eq!(query.text, "why do birds sing");
        assert_eq!(query.start, 0);
        assert_eq!(query.top, 5);
        assert_eq!(query.num, 100);
        assert_eq!(query.lch, 2.16);
        assert!(!query.train);
    }

    #[test]
    fn test_query_ids_are_unique() {
        let a = Query::new("a");
        let b = Query::new("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_task_round_trips_through_serde() {
        let task = AnswerTask {
            query_id: QueryId::from_string("q-1"),
            text: "why".to_string(),
            ir_query: vec!["why".to_string()],
            num_pages: 3,
            start: 0,
            top: 5,
            lch: 2.16,
        };
        let json = serde_json::to_string(&task).unwrap();
        let back: AnswerTask = serde_json::from_str(&json).unwrap();
        assert_eq!(back.query_id, task.query_id);
        assert_eq!(back.ir_query, task.ir_query);
    }
}
