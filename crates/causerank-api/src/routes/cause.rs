//! GET /cause/, the question endpoint
//!
//! Per-request lifecycle: parse parameters (early 400 on validation
//! errors), build the answer task, dispatch it to the worker pool and
//! suspend, then render the result when the pool replies. All state
//! lives in handler locals; concurrent requests share nothing.

use crate::AppState;
use crate::error::{ApiError, ErrorBody};
use axum::extract::{Query as QueryString, State};
use axum::{Json, Router, routing::get};
use causerank_core::Query;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

/// One rendered answer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerDto {
    /// 1-indexed rank
    pub rank: usize,
    /// Display form
    pub display: String,
    /// Ordered feature values
    pub features: Vec<f64>,
}

/// Response for the question endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CauseResponse {
    /// Original question, verbatim
    pub query: String,
    /// Space-joined tokens of the pre-tag query form
    pub ir_query: String,
    /// Linguistically annotated form of the question
    pub tagged_query: String,
    /// Engine-reported corpus coverage
    pub num_pages: usize,
    /// Total answers produced (before truncation)
    pub num_answers: usize,
    /// First `num` answers in rank order
    pub answers: Vec<AnswerDto>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/cause/", get(cause))
}

fn parse_value<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    name: &str,
    default: T,
) -> Result<T, ApiError> {
    match params.get(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::Validation(format!("malformed value for {name}: {raw}"))),
    }
}

/// Parse request parameters with the documented literal defaults.
fn parse_params(params: &HashMap<String, String>) -> Result<Query, ApiError> {
    let text = params
        .get("q")
        .ok_or_else(|| ApiError::Validation("missing required parameter: q".to_string()))?;

    let mut query = Query::new(text);
    query.top = parse_value(params, "top", query.top)?;
    query.num = parse_value(params, "num", query.num)?;
    query.start = parse_value(params, "start", query.start)?;
    query.lch = parse_value(params, "lch", query.lch)?;
    query.train = parse_value(params, "train", query.train)?;
    Ok(query)
}

#[utoipa::path(
    get,
    path = "/cause/",
    tag = "cause",
    params(
        ("q" = String, Query, description = "Question text (required)"),
        ("top" = Option<usize>, Query, description = "Ranking breadth (default 5)"),
        ("num" = Option<usize>, Query, description = "Maximum answers rendered (default 100)"),
        ("start" = Option<usize>, Query, description = "Corpus offset (default 0)"),
        ("lch" = Option<f64>, Query, description = "Similarity threshold (default 2.16)"),
        ("train" = Option<bool>, Query, description = "Record this response in the training log (default false)"),
    ),
    responses(
        (status = 200, description = "Ranked answers", body = CauseResponse),
        (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
        (status = 503, description = "Worker pool overloaded", body = ErrorBody),
        (status = 504, description = "Answer computation timed out", body = ErrorBody),
    )
)]
pub async fn cause(
    State(state): State<AppState>,
    QueryString(params): QueryString<HashMap<String, String>>,
) -> Result<Json<CauseResponse>, ApiError> {
    let query = parse_params(&params)?;
    let task = state.engine.prepare(&state.index, &query)?;
    let ir_query = task.ir_query.join(" ");
    let num_pages = task.num_pages;

    // Dispatch and suspend; the reactor serves other connections
    // until the pool replies.
    let ranked = state.pool.submit(task).await?;

    let answers = ranked
        .answers
        .iter()
        .take(query.num)
        .enumerate()
        .map(|(i, answer)| AnswerDto {
            rank: i + 1,
            display: answer.display.clone(),
            features: answer.features.clone(),
        })
        .collect();
    let response = CauseResponse {
        query: query.text.clone(),
        ir_query,
        tagged_query: ranked.tagged_query.clone(),
        num_pages,
        num_answers: ranked.answers.len(),
        answers,
    };

    if query.train {
        // Logged off the response path; ranks cover all answers, not
        // the truncated render set. Failures are reported, never
        // surfaced to the client.
        let train_log = Arc::clone(&state.train_log);
        let tagged_query = ranked.tagged_query;
        let text = query.text;
        let all_answers = ranked.answers;
        tokio::spawn(async move {
            if let Err(e) = train_log.append(&tagged_query, &text, &all_answers).await {
                warn!("training log append failed: {e}");
            }
        });
    }

    Ok(Json(response))
}
