use axum::{extract::State, http::Uri, response::IntoResponse};
use common::{error::AppError, tmdb::MovieDetail};
use serde::Serialize;

use crate::{
    html_state::HtmlState,
    middlewares::response_middleware::{HtmlError, TemplateResponse},
};

pub const INVALID_MOVIE_ID_MESSAGE: &str = "Invalid movie ID";

/// Third `/`-separated segment of the raw path: `/movie/{id}` -> `{id}`.
/// Anything after it is ignored. The id itself is not validated.
pub fn movie_id_from_path(path: &str) -> Option<&str> {
    path.split('/').nth(2).filter(|id| !id.is_empty())
}

/// Context for `movie/detail.html`.
#[derive(Serialize)]
struct MoviePageData {
    /// Decoded detail, rendered as text.
    movie: MovieDetail,
}

pub async fn movie_detail_handler(
    State(state): State<HtmlState>,
    uri: Uri,
) -> Result<impl IntoResponse, HtmlError> {
    let Some(movie_id) = movie_id_from_path(uri.path()) else {
        return Err(AppError::Validation(INVALID_MOVIE_ID_MESSAGE.to_string()).into());
    };

    let movie = state.tmdb.movie_details(movie_id).await?;

    Ok(TemplateResponse::new_template(
        "movie/detail.html",
        MoviePageData { movie },
    ))
}
