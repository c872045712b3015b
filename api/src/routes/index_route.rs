//! GET / — the bundled single-page chat UI.

use axum::response::Html;

/// Chat page embedded at build time; posts `{question, context}` to `/chat`
/// and threads the returned context through the session.
const PAGE: &str = include_str!("../../static/index.html");

/// Handler: GET /
pub async fn index() -> Html<&'static str> {
    Html(PAGE)
}
