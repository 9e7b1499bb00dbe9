use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Extension,
};
use common::{
    error::AppError,
    utils::template_engine::{ProvidesTemplateEngine, Value},
};
use minijinja::context;
use serde::Serialize;
use tracing::error;

/// Shown in every page title.
const SITE_TITLE: &str = "Movie Finder";

#[derive(Clone, Debug)]
pub enum TemplateKind {
    Full(String),
    Error,
}

/// A page to be rendered by [`with_template_response`] once the handler returns.
#[derive(Clone)]
pub struct TemplateResponse {
    /// Which template to render.
    template_kind: TemplateKind,
    /// Status of the rendered response.
    status: StatusCode,
    /// Serialized handler data; must be a map.
    context: Value,
}

impl TemplateResponse {
    pub fn new_template<T: Serialize>(name: impl Into<String>, context: T) -> Self {
        Self {
            template_kind: TemplateKind::Full(name.into()),
            status: StatusCode::OK,
            context: Value::from_serialize(&context),
        }
    }

    /// Renders the template as usual but answers with `status`.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn error(status: StatusCode, title: &str, description: &str) -> Self {
        let ctx = context! {
            status_code => status.as_u16(),
            title => title,
            description => description
        };
        Self {
            template_kind: TemplateKind::Error,
            status,
            context: ctx,
        }
    }

    pub fn not_found() -> Self {
        Self::error(
            StatusCode::NOT_FOUND,
            "Page Not Found",
            "The page you're looking for doesn't exist.",
        )
    }

    pub fn server_error() -> Self {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Something went wrong on our end.",
        )
    }

    pub fn bad_request(message: &str) -> Self {
        Self::error(StatusCode::BAD_REQUEST, "Bad Request", message)
    }
}

impl IntoResponse for TemplateResponse {
    fn into_response(self) -> Response {
        // Status is carried on the extension and applied after rendering
        Extension(self).into_response()
    }
}

/// Handler context flattened next to the site-wide values.
#[derive(Serialize)]
struct ContextWrapper<'a> {
    /// Exposed to templates as `site_title`.
    site_title: &'a str,
    /// Handler values, at the top level of the template context.
    #[serde(flatten)]
    context: HashMap<String, Value>,
}

/// Handler contexts must be maps; `None` and undefined count as empty.
fn context_to_map(value: &Value) -> Result<HashMap<String, Value>, minijinja::value::ValueKind> {
    match value.kind() {
        minijinja::value::ValueKind::Map => {
            let mut map = HashMap::new();
            if let Ok(keys) = value.try_iter() {
                for key in keys {
                    if let Ok(val) = value.get_item(&key) {
                        map.insert(key.to_string(), val);
                    }
                }
            }
            Ok(map)
        }
        minijinja::value::ValueKind::None | minijinja::value::ValueKind::Undefined => {
            Ok(HashMap::new())
        }
        other => Err(other),
    }
}

pub async fn with_template_response<S>(State(state): State<S>, req: Request, next: Next) -> Response
where
    S: ProvidesTemplateEngine + Clone + Send + Sync + 'static,
{
    let response = next.run(req).await;

    let Some(template_response) = response.extensions().get::<TemplateResponse>().cloned() else {
        return response;
    };

    let context_map = match context_to_map(&template_response.context) {
        Ok(map) => map,
        Err(kind) => {
            error!(
                "Template context must be a map or unit, got kind={:?} for template_kind={:?}",
                kind, template_response.template_kind
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(fallback_error())).into_response();
        }
    };

    let context = ContextWrapper {
        site_title: SITE_TITLE,
        context: context_map,
    };

    let name = match &template_response.template_kind {
        TemplateKind::Full(name) => name.as_str(),
        TemplateKind::Error => "errors/error.html",
    };

    match state.template_engine().render(name, &context) {
        Ok(html) => (template_response.status, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render template '{}': {:?}", name, e);
            let status = match template_response.template_kind {
                // Keep the intended status when only the error page itself failed
                TemplateKind::Error => template_response.status,
                TemplateKind::Full(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Html(fallback_error())).into_response()
        }
    }
}

#[derive(Debug)]
pub enum HtmlError {
    AppError(AppError),
}

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        Self::AppError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        match self {
            Self::AppError(AppError::Validation(msg)) => {
                TemplateResponse::bad_request(&msg).into_response()
            }
            // Cause stays in the log; the caller only sees a generic page
            Self::AppError(err) if err.is_upstream() => {
                error!("Upstream error: {}", err);
                TemplateResponse::server_error().into_response()
            }
            Self::AppError(err) => {
                error!("Internal error: {}", err);
                TemplateResponse::server_error().into_response()
            }
        }
    }
}

/// Static page used when rendering itself failed.
fn fallback_error() -> String {
    r#"
    <html>
        <body>
            <h1>Error</h1>
            <p>Sorry, something went wrong displaying this page.</p>
        </body>
    </html>
    "#
    .to_string()
}
