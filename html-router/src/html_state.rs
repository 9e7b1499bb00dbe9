use common::create_template_engine;
use common::error::AppError;
use common::tmdb::TmdbClient;
use common::utils::config::AppConfig;
use common::utils::template_engine::{ProvidesTemplateEngine, TemplateEngine};
use std::sync::Arc;
use tracing::debug;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct HtmlState {
    pub tmdb: Arc<TmdbClient>,
    pub templates: Arc<TemplateEngine>,
}

impl HtmlState {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let tmdb = Arc::new(TmdbClient::from_config(config)?);
        Ok(Self::new_with_resources(tmdb, None))
    }

    pub fn new_with_resources(
        tmdb: Arc<TmdbClient>,
        template_engine: Option<Arc<TemplateEngine>>,
    ) -> Self {
        let templates =
            template_engine.unwrap_or_else(|| Arc::new(create_template_engine!("templates")));
        debug!("Template engine configured for html_router.");

        Self { tmdb, templates }
    }
}

impl ProvidesTemplateEngine for HtmlState {
    fn template_engine(&self) -> &Arc<TemplateEngine> {
        &self.templates
    }
}
