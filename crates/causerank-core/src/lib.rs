//! # Causerank Core
//!
//! Core types and the engine seam for the causerank question answering
//! front end. The answer-computation algorithm lives behind the
//! [`AnswerEngine`] trait; this crate only defines the data that flows
//! across it.

pub mod engine;
pub mod error;
pub mod index;
pub mod query;

pub use engine::{AnswerEngine, SharedEngine};
pub use error::{CoreError, Result};
pub use index::{Index, Page};
pub use query::{Answer, AnswerTask, Query, QueryId, RankedAnswers};
