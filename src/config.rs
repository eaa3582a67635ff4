use std::env;

/// Deployment-level defaults, loaded once at startup and immutable after.
/// User-supplied keys in a request override the key fields per call.
#[derive(Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub serper_api_key: String,
    pub serper_base_url: String,
    pub generation_timeout_ms: u64,
    pub search_timeout_ms: u64,
    pub scrape_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            serper_api_key: env::var("SERPER_API_KEY").unwrap_or_default(),
            serper_base_url: env::var("SERPER_BASE_URL")
                .unwrap_or_else(|_| "https://google.serper.dev".to_string()),
            generation_timeout_ms: env_u64("GENERATION_TIMEOUT_MS", 20_000),
            search_timeout_ms: env_u64("SEARCH_TIMEOUT_MS", 10_000),
            scrape_timeout_ms: env_u64("SCRAPE_TIMEOUT_MS", 10_000),
        }
    }
}

pub fn server_port_from_env() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3000)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}
