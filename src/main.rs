use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use faq_service::{build_app, run_server, server_port_from_env, AppConfig, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.gemini_api_key.is_empty() {
        info!("GEMINI_API_KEY not set; requests must supply a key in the form");
    }
    if config.serper_api_key.is_empty() {
        info!("SERPER_API_KEY not set; SERP research will be skipped unless the form supplies one");
    }

    let state = Arc::new(AppState::new(config));
    let app = build_app(state);

    let port = server_port_from_env();
    info!("faq-service listening on port {port}");
    run_server(app, port).await;
}
