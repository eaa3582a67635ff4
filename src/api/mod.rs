mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{generate, index, not_found};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/faqs", post(generate))
        .fallback(not_found)
        .with_state(state)
}
