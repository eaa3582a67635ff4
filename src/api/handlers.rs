use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::error::{ErrorResponse, FaqError};
use crate::generate::generate_faqs;
use crate::AppState;

use super::models::{FaqRequest, GenerateRequest, GenerateResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, FaqError> {
    let request = FaqRequest::validate(payload)?;
    let result = generate_faqs(&state, request).await?;
    Ok(Json(result))
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "route not found".to_string(),
        }),
    )
        .into_response()
}
