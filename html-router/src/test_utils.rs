use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::{
    tmdb::TmdbClient,
    utils::{config::AppConfig, template_engine::TemplateEngine},
};
use tower::ServiceExt;

use crate::{html_routes, html_state::HtmlState};

pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_config(tmdb_base_url: &str) -> AppConfig {
    AppConfig {
        tmdb_api_key: TEST_API_KEY.to_string(),
        http_port: 0,
        tmdb_base_url: tmdb_base_url.to_string(),
        tmdb_timeout_secs: 5,
    }
}

/// Full html router pointed at `tmdb_base_url`, using the on-disk templates.
pub fn test_app(tmdb_base_url: &str) -> Router {
    build_app(tmdb_base_url, None)
}

/// Same router, rendering with `engine` instead of the on-disk templates.
pub fn test_app_with_engine(tmdb_base_url: &str, engine: TemplateEngine) -> Router {
    build_app(tmdb_base_url, Some(Arc::new(engine)))
}

/// Router over `HtmlState`, with the disk templates unless `engine` is given.
fn build_app(tmdb_base_url: &str, engine: Option<Arc<TemplateEngine>>) -> Router {
    let config = test_config(tmdb_base_url);
    let tmdb = Arc::new(TmdbClient::from_config(&config).expect("tmdb client"));
    let state = HtmlState::new_with_resources(tmdb, engine);
    html_routes(&state).with_state(state)
}

pub async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}
