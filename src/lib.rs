pub mod api;
pub mod config;
pub mod error;
pub mod faq;
pub mod gemini;
pub mod generate;
pub mod product;
pub mod prompt;
pub mod serper;

use std::sync::Arc;

use axum::Router;

pub use config::{server_port_from_env, AppConfig};
pub use error::FaqError;

/// Shared per-process state: the immutable startup configuration and one
/// reqwest client reused across requests. Per-call timeouts are applied at
/// the call sites, not on the client.
pub struct AppState {
    pub config: AppConfig,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server failed");
}
