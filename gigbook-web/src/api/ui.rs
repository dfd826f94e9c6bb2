//! Home page
//!
//! The one static page the service serves; everything else is JSON.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /
///
/// Serves the home page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
