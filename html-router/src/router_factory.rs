use axum::{extract::FromRef, middleware::from_fn_with_state, response::IntoResponse, Router};

use crate::{
    html_state::HtmlState,
    middlewares::{
        compression::compression_layer,
        response_middleware::{with_template_response, TemplateResponse},
    },
};

pub struct RouterFactory<S> {
    /// State handed to the template layer.
    app_state: HtmlState,
    /// Merged at the root, in insertion order.
    public_routers: Vec<Router<S>>,
    /// Wraps the built router in the compression layer.
    compression_enabled: bool,
}

impl<S> RouterFactory<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    pub fn new(app_state: &HtmlState) -> Self {
        Self {
            app_state: app_state.to_owned(),
            public_routers: Vec::new(),
            compression_enabled: false,
        }
    }

    // Add a public router that will be merged at the root level
    #[must_use]
    pub fn add_public_routes(mut self, routes: Router<S>) -> Self {
        self.public_routers.push(routes);
        self
    }

    /// Enables response compression when building the router.
    #[must_use]
    pub const fn with_compression(mut self) -> Self {
        self.compression_enabled = true;
        self
    }

    pub fn build(self) -> Router<S> {
        let mut app_router = Router::new();

        for router in self.public_routers {
            app_router = app_router.merge(router);
        }

        // Unknown paths get the regular error page, so the fallback sits inside the template layer
        app_router = app_router.fallback(not_found_handler);

        app_router = app_router.layer(from_fn_with_state(
            self.app_state.clone(),
            with_template_response::<HtmlState>,
        ));

        if self.compression_enabled {
            app_router = app_router.layer(compression_layer());
        }

        app_router
    }
}

/// Fallback for paths no router matched.
async fn not_found_handler() -> impl IntoResponse {
    TemplateResponse::not_found()
}
