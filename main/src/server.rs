use axum::Router;
use common::{
    error::AppError,
    utils::config::{get_config, AppConfig},
};
use html_router::{html_routes, html_state::HtmlState};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Loads config, builds the router and serves until shutdown.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    // Get config, refusing to start without an API key
    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let http_port = config.http_port;
    let app = build_app(&config)?;

    info!("Starting server listening on 0.0.0.0:{}", http_port);
    let serve_address = format!("0.0.0.0:{http_port}");
    let listener = tokio::net::TcpListener::bind(serve_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Full application router with state applied.
fn build_app(config: &AppConfig) -> Result<Router, AppError> {
    let html_state = HtmlState::new(config)?;

    Ok(Router::new()
        .merge(html_routes(&html_state))
        .with_state(html_state))
}
