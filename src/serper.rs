use serde::Deserialize;
use tokio::time::{timeout, Duration};
use tracing::warn;

use crate::error::FaqError;

/// SERP research for a keyword query: top organic hits, "people also ask"
/// questions and related searches. All fields are optional in the wire
/// format, so everything defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct SerpResults {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
    #[serde(default, rename = "peopleAlsoAsk")]
    pub people_also_ask: Vec<PeopleAlsoAsk>,
    #[serde(default, rename = "relatedSearches")]
    pub related_searches: Vec<RelatedSearch>,
}

#[derive(Debug, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
pub struct PeopleAlsoAsk {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct RelatedSearch {
    #[serde(default)]
    pub query: String,
}

impl SerpResults {
    pub fn is_empty(&self) -> bool {
        self.organic.is_empty()
            && self.people_also_ask.is_empty()
            && self.related_searches.is_empty()
    }

    /// Renders the research as prompt sections, mirroring the order shown
    /// to the user: organic results first, then related searches, then
    /// people-also-ask questions.
    pub fn to_prompt_section(&self) -> String {
        let mut section = String::new();
        if !self.organic.is_empty() {
            section.push_str("Top Organic Results:\n");
            for (idx, item) in self.organic.iter().take(5).enumerate() {
                section.push_str(&format!("{}. {}: {}\n", idx + 1, item.title, item.snippet));
            }
        }
        if !self.related_searches.is_empty() {
            section.push_str("\nRelated Searches:\n");
            for related in &self.related_searches {
                section.push_str(&format!("- {}\n", related.query));
            }
        }
        if !self.people_also_ask.is_empty() {
            section.push_str("\nPeople Also Ask:\n");
            for paa in &self.people_also_ask {
                section.push_str(&format!("- {}\n", paa.question));
            }
        }
        section.trim().to_string()
    }
}

pub struct SerperClient<'a> {
    pub http: &'a reqwest::Client,
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub timeout_ms: u64,
}

impl SerperClient<'_> {
    pub async fn search(&self, query: &str) -> Result<SerpResults, FaqError> {
        if self.api_key.is_empty() {
            return Err(FaqError::Auth(
                "SERPER_API_KEY is missing: set it in the environment or supply one in the form"
                    .to_string(),
            ));
        }

        let payload = serde_json::json!({
            "q": query,
            "gl": "in",
            "hl": "en",
            "num": 10,
            "autocorrect": true,
            "page": 1,
            "type": "search",
            "engine": "google"
        });

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let fut = self
            .http
            .post(&url)
            .header("X-API-KEY", self.api_key)
            .json(&payload)
            .send();

        let response = timeout(Duration::from_millis(self.timeout_ms), fut)
            .await
            .map_err(|_| FaqError::Upstream("Search request timed out".to_string()))?
            .map_err(|e| FaqError::Upstream(format!("Failed to send search request: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(FaqError::Auth(format!(
                "Search service rejected the API key ({status})"
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(FaqError::Upstream(format!(
                "Search request failed ({status}): {body}"
            )));
        }

        response
            .json::<SerpResults>()
            .await
            .map_err(|e| FaqError::Upstream(format!("Failed to decode search response: {e}")))
    }
}

/// Degraded-mode wrapper: a failed search is logged and turned into empty
/// results rather than aborting the request.
pub async fn search_or_empty(client: &SerperClient<'_>, query: &str) -> SerpResults {
    match client.search(query).await {
        Ok(results) => results,
        Err(err) => {
            warn!("SERP research failed, proceeding without context: {err}");
            SerpResults::default()
        }
    }
}
