use axum::Router;
use axum::body::Body;
use axum::http::Request;
use causerank::pool::WorkerPool;
use causerank::trainlog::TrainLog;
use causerank_core::{Index, SharedEngine};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ApiConfig;
pub use error::ApiError;

/// Application state
///
/// Everything a request needs is built once at startup and injected
/// here; handlers keep per-request state in locals only.
#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
    pub index: Arc<Index>,
    pub pool: Arc<WorkerPool>,
    pub train_log: Arc<dyn TrainLog>,
}

impl AppState {
    /// Create the application state
    pub fn new(
        engine: SharedEngine,
        index: Arc<Index>,
        pool: Arc<WorkerPool>,
        train_log: Arc<dyn TrainLog>,
    ) -> Self {
        Self {
            engine,
            index,
            pool,
            train_log,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::cause::cause,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::cause::CauseResponse,
            crate::routes::cause::AnswerDto,
            crate::error::ErrorBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "cause", description = "Question answering endpoint")
    )
)]
pub struct ApiDoc;

/// Request span for the trace layer.
///
/// The forwarded-for header is trusted unconditionally; the intended
/// deployment sits behind a reverse proxy.
fn request_span(request: &Request<Body>) -> Span {
    let client_ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        client_ip = %client_ip,
    )
}

/// Build API application
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}
