/// Single movie page.
mod handlers;

use axum::{extract::FromRef, routing::get, Router};
pub use handlers::{movie_detail_handler, movie_id_from_path, INVALID_MOVIE_ID_MESSAGE};

use crate::html_state::HtmlState;

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    // Every shape under /movie goes to one handler, which decides from the raw path
    Router::new()
        .route("/movie", get(movie_detail_handler))
        .route("/movie/", get(movie_detail_handler))
        .route("/movie/{id}", get(movie_detail_handler))
        .route("/movie/{id}/{*rest}", get(movie_detail_handler))
}
