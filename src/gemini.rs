use serde::Deserialize;
use tokio::time::{timeout, Duration};

use crate::error::FaqError;

pub struct GeminiClient<'a> {
    pub http: &'a reqwest::Client,
    pub base_url: &'a str,
    pub model: &'a str,
    pub api_key: &'a str,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

impl GeminiClient<'_> {
    /// One `generateContent` round trip. Auth problems (missing or rejected
    /// key) are reported separately from transport and service failures.
    pub async fn generate(&self, prompt: &str) -> Result<String, FaqError> {
        if self.api_key.is_empty() {
            return Err(FaqError::Auth(
                "GEMINI_API_KEY is missing: set it in the environment or supply one in the form"
                    .to_string(),
            ));
        }

        let payload = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [ { "text": prompt } ]
                }
            ],
            "generationConfig": {
                "temperature": 1.0,
                "topP": 0.95,
                "topK": 0,
                "maxOutputTokens": 8192
            },
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
            ]
        });

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let fut = self
            .http
            .post(&url)
            .query(&[("key", self.api_key)])
            .json(&payload)
            .send();

        let response = timeout(Duration::from_millis(self.timeout_ms), fut)
            .await
            .map_err(|_| FaqError::Upstream("Generation request timed out".to_string()))?
            .map_err(|e| FaqError::Upstream(format!("Failed to send generation request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            if is_auth_failure(status, &body) {
                return Err(FaqError::Auth(format!(
                    "Generation service rejected the API key ({status}): check your credentials"
                )));
            }
            return Err(FaqError::Upstream(format!(
                "Generation request failed ({status}): {body}"
            )));
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| FaqError::Upstream(format!("Failed to decode generation response: {e}")))?;

        let text = extract_text(&parsed);
        if text.is_empty() {
            return Err(FaqError::Upstream(
                "Generation response did not contain any text".to_string(),
            ));
        }
        Ok(text)
    }
}

// Gemini reports an invalid key either as 401/403 or as a 400 whose body
// names the API key.
fn is_auth_failure(status: reqwest::StatusCode, body: &str) -> bool {
    status == reqwest::StatusCode::UNAUTHORIZED
        || status == reqwest::StatusCode::FORBIDDEN
        || (status == reqwest::StatusCode::BAD_REQUEST
            && (body.contains("API_KEY_INVALID") || body.contains("API key not valid")))
}

fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_across_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"1. Q? "},{"text":"A."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response), "1. Q? A.");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(extract_text(&response), "");
    }

    #[test]
    fn invalid_key_400_counts_as_auth_failure() {
        assert!(is_auth_failure(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":{"status":"INVALID_ARGUMENT","message":"API key not valid."}}"#,
        ));
        assert!(is_auth_failure(reqwest::StatusCode::FORBIDDEN, ""));
        assert!(!is_auth_failure(reqwest::StatusCode::BAD_REQUEST, "bad json"));
        assert!(!is_auth_failure(reqwest::StatusCode::INTERNAL_SERVER_ERROR, ""));
    }
}
