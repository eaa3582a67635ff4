use tracing::{debug, info};

use crate::api::models::{FaqRequest, GenerateResponse};
use crate::error::FaqError;
use crate::faq::{parse_faqs, to_jsonld, to_plain_text};
use crate::gemini::GeminiClient;
use crate::product::{fetch_product_details, ProductDetails};
use crate::prompt::build_prompt;
use crate::serper::{search_or_empty, SerperClient};
use crate::AppState;

/// The single orchestration pass: validate has already happened, so this
/// gathers optional context, composes the prompt, calls the generation
/// service and shapes the result. Context fetches are non-fatal; only the
/// generation call can fail the request.
pub async fn generate_faqs(
    state: &AppState,
    request: FaqRequest,
) -> Result<GenerateResponse, FaqError> {
    let details = match &request.product_url {
        Some(url) => {
            fetch_product_details(&state.http, url, state.config.scrape_timeout_ms).await
        }
        None => ProductDetails::default(),
    };

    let serper_key = request
        .serper_api_key
        .as_deref()
        .unwrap_or(&state.config.serper_api_key);
    let serper = SerperClient {
        http: &state.http,
        base_url: &state.config.serper_base_url,
        api_key: serper_key,
        timeout_ms: state.config.search_timeout_ms,
    };
    let serp = search_or_empty(&serper, &request.product_keywords).await;
    if serp.is_empty() {
        debug!("no SERP context for {:?}", request.product_keywords);
    }

    let prompt = build_prompt(&request, &details, &serp);

    let gemini_key = request
        .gemini_api_key
        .as_deref()
        .unwrap_or(&state.config.gemini_api_key);
    let gemini = GeminiClient {
        http: &state.http,
        base_url: &state.config.gemini_base_url,
        model: &state.config.gemini_model,
        api_key: gemini_key,
        timeout_ms: state.config.generation_timeout_ms,
    };
    let raw = gemini.generate(&prompt).await?;

    let faqs = parse_faqs(&raw);
    info!(
        "generated {} FAQ pairs for {:?} on {}",
        faqs.len(),
        request.product_keywords,
        request.platform
    );

    let text = if faqs.is_empty() {
        raw.clone()
    } else {
        to_plain_text(&faqs)
    };
    let jsonld = to_jsonld(&faqs);

    Ok(GenerateResponse {
        faqs,
        raw,
        text,
        jsonld,
    })
}
