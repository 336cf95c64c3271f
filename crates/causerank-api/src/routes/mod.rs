use crate::AppState;
use axum::Router;

pub mod cause;
pub mod health;
pub mod home;

/// Merge all routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(home::routes())
        .merge(health::routes())
        .merge(cause::routes())
}
