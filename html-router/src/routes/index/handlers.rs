use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::tmdb::SearchResultItem;
use serde::Serialize;
use tracing::error;
use url::form_urlencoded;

use crate::{html_state::HtmlState, middlewares::response_middleware::TemplateResponse};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search movies";

/// Search form input. Only an absent or empty `keyword` means "no search".
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// The keyword exactly as submitted, never trimmed.
    keyword: Option<String>,
}

impl SearchParams {
    /// Reads the first `keyword` pair of a raw query string. Repeated or
    /// unrelated parameters never reject the request.
    pub fn from_query(raw_query: Option<&str>) -> Self {
        let keyword = raw_query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "keyword")
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
        });
        Self { keyword }
    }
}

/// One search hit as shown in the result list.
#[derive(Serialize)]
struct MovieLink {
    /// Target of `/movie/{id}`.
    id: i64,
    title: String,
    /// The raw `release_date`, shown in parentheses.
    year: String,
}

impl From<SearchResultItem> for MovieLink {
    fn from(item: SearchResultItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            year: item.release_date,
        }
    }
}

/// Context for `index.html`.
#[derive(Serialize)]
struct IndexPageData {
    /// Echoed back into the search box.
    keyword: String,
    /// Whether a search ran, so "No movies found." only shows after one.
    searched: bool,
    results: Vec<MovieLink>,
    /// Shown above the form when the search failed.
    error: Option<&'static str>,
}

pub async fn index_handler(
    State(state): State<HtmlState>,
    RawQuery(raw_query): RawQuery,
) -> impl IntoResponse {
    let Some(keyword) = SearchParams::from_query(raw_query.as_deref()).keyword else {
        return TemplateResponse::new_template(
            "index.html",
            IndexPageData {
                keyword: String::new(),
                searched: false,
                results: Vec::new(),
                error: None,
            },
        );
    };

    match state.tmdb.search_movies(&keyword).await {
        Ok(search) => TemplateResponse::new_template(
            "index.html",
            IndexPageData {
                keyword,
                searched: true,
                results: search.results.into_iter().map(MovieLink::from).collect(),
                error: None,
            },
        ),
        Err(err) => {
            error!(%keyword, "Error searching movies: {}", err);
            // The form is rendered alongside the error
            TemplateResponse::new_template(
                "index.html",
                IndexPageData {
                    keyword,
                    searched: true,
                    results: Vec::new(),
                    error: Some(SEARCH_FAILED_MESSAGE),
                },
            )
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
