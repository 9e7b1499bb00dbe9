/// Search form and results.
mod handlers;

use axum::{extract::FromRef, routing::get, Router};
pub use handlers::{index_handler, SearchParams, SEARCH_FAILED_MESSAGE};

use crate::html_state::HtmlState;

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    Router::new().route("/", get(index_handler))
}
