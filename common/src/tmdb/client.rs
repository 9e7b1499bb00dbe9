use std::{fmt, time::Duration};

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::{MovieDetail, SearchResults};
use crate::{error::AppError, utils::config::AppConfig};

/// Path of the keyword search endpoint, appended to the base url.
const SEARCH_ENDPOINT: &str = "/search/movie";
/// Path prefix of the movie detail endpoint.
const MOVIE_ENDPOINT: &str = "/movie/";
/// Query parameter carrying the credential.
const API_KEY_PARAM: &str = "api_key";

/// Thin TMDB client. Every request carries the API key as a query parameter.
#[derive(Clone)]
pub struct TmdbClient {
    /// Shared connection pool with the configured timeout.
    http: Client,
    /// Base url without a trailing slash.
    base_url: String,
    /// Never logged or rendered.
    api_key: String,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        // Fail at startup rather than on the first request.
        Url::parse(&base_url)?;

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            &config.tmdb_base_url,
            config.tmdb_api_key.clone(),
            Duration::from_secs(config.tmdb_timeout_secs),
        )
    }

    /// `{base}/search/movie?api_key=..&query=..` with the keyword percent-encoded.
    pub fn search_url(&self, keyword: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("{}{SEARCH_ENDPOINT}", self.base_url))?;
        url.query_pairs_mut()
            .append_pair(API_KEY_PARAM, &self.api_key)
            .append_pair("query", keyword);
        Ok(url)
    }

    /// `{base}/movie/{id}?api_key=..`. The id is placed in the path as given.
    pub fn movie_url(&self, movie_id: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("{}{MOVIE_ENDPOINT}{movie_id}", self.base_url))?;
        url.query_pairs_mut().append_pair(API_KEY_PARAM, &self.api_key);
        Ok(url)
    }

    pub async fn search_movies(&self, keyword: &str) -> Result<SearchResults, AppError> {
        self.get_json(self.search_url(keyword)?).await
    }

    pub async fn movie_details(&self, movie_id: &str) -> Result<MovieDetail, AppError> {
        self.get_json(self.movie_url(movie_id)?).await
    }

    /// GETs `url`, checks the status, then decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let shown = redacted(&url);
        debug!(url = %shown, "Requesting TMDB");

        // reqwest errors embed the request url, which carries the key
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus { status, url: shown });
        }

        let body = response
            .json::<T>()
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(body)
    }
}

/// Renders a url with the API key value masked, for logs and error messages.
fn redacted(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == API_KEY_PARAM {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const KEY: &str = "test-key-123";

    fn client_for(base_url: &str) -> TmdbClient {
        TmdbClient::new(base_url, KEY, Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn keyword_with_reserved_characters_round_trips() {
        let client = client_for("https://api.themoviedb.org/3");
        let keyword = "sci-fi: a|b & c=d #1 ?";

        let url = client.search_url(keyword).expect("url");

        assert_eq!(url.path(), "/3/search/movie");
        let query: Option<String> = url
            .query_pairs()
            .find(|(key, _)| key == "query")
            .map(|(_, value)| value.into_owned());
        assert_eq!(query.as_deref(), Some(keyword));
        let key = url
            .query_pairs()
            .find(|(key, _)| key == API_KEY_PARAM)
            .map(|(_, value)| value.into_owned());
        assert_eq!(key.as_deref(), Some(KEY));
    }

    #[test]
    fn movie_id_is_inserted_into_path() {
        let client = client_for("https://api.themoviedb.org/3/");

        let url = client.movie_url("27205").expect("url");

        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/27205?api_key=test-key-123"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = TmdbClient::new("not a url", KEY, Duration::from_secs(1));
        assert!(matches!(result, Err(AppError::Url(_))));
    }

    #[test]
    fn redacted_url_hides_api_key() {
        let client = client_for("https://api.themoviedb.org/3");
        let url = client.search_url("alien").expect("url");

        let shown = redacted(&url);

        assert!(!shown.contains(KEY));
        assert!(shown.contains("api_key=REDACTED"));
        assert!(shown.contains("query=alien"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = client_for("https://api.themoviedb.org/3");
        assert!(!format!("{client:?}").contains(KEY));
    }

    #[tokio::test]
    async fn search_movies_decodes_results_in_order() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search/movie")
                    .query_param("api_key", KEY)
                    .query_param("query", "sci-fi: a|b");
                then.status(200).json_body(json!({
                    "page": 1,
                    "results": [
                        { "id": 2, "title": "Zeta", "release_date": "2001-01-01" },
                        { "id": 1, "title": "Alpha", "release_date": "1999-05-05" }
                    ]
                }));
            })
            .await;

        let results = client_for(&server.base_url())
            .search_movies("sci-fi: a|b")
            .await
            .expect("search");

        mock.assert_async().await;
        let ids: Vec<i64> = results.results.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(results.results[1].title, "Alpha");
        assert_eq!(results.results[1].release_date, "1999-05-05");
    }

    #[tokio::test]
    async fn movie_details_decodes_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/movie/27205")
                    .query_param("api_key", KEY);
                then.status(200)
                    .json_body(json!({ "title": "Inception", "overview": "A thief...", "runtime": 148 }));
            })
            .await;

        let detail = client_for(&server.base_url())
            .movie_details("27205")
            .await
            .expect("detail");

        mock.assert_async().await;
        assert_eq!(
            detail,
            MovieDetail {
                title: "Inception".to_string(),
                overview: "A thief...".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error_even_with_json_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/movie/0");
                then.status(404).json_body(json!({
                    "status_code": 34,
                    "status_message": "The resource you requested could not be found."
                }));
            })
            .await;

        let error = client_for(&server.base_url())
            .movie_details("0")
            .await
            .expect_err("404 must fail");

        match &error {
            AppError::UpstreamStatus { status, url } => {
                assert_eq!(status.as_u16(), 404);
                assert!(!url.contains(KEY));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.is_upstream());
    }

    #[tokio::test]
    async fn undecodable_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/movie");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let error = client_for(&server.base_url())
            .search_movies("alien")
            .await
            .expect_err("html body must fail");

        assert!(matches!(error, AppError::Reqwest(_)));
    }

    #[tokio::test]
    async fn connection_failure_does_not_leak_api_key() {
        // Nothing listens on port 1.
        let error = client_for("http://127.0.0.1:1")
            .search_movies("alien")
            .await
            .expect_err("connection must fail");

        assert!(error.is_upstream());
        assert!(!error.to_string().contains(KEY));
    }
}
