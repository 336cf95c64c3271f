//! GET /, the static question form

use crate::AppState;
use axum::response::Html;
use axum::{Router, routing::get};

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>causerank</title></head>
<body>
  <h1>Ask a why-question</h1>
  <form action="/cause/" method="get">
    <input type="text" name="q" size="60" autofocus>
    <input type="submit" value="Ask">
  </form>
</body>
</html>
"#;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Render the query input page. Stateless, no parameters.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
