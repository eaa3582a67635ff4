use scraper::{Html, Selector};
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Details scraped from a product page. Every field is best effort; listing
/// markup varies wildly across storefronts.
#[derive(Debug, Default)]
pub struct ProductDetails {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

impl ProductDetails {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.features.is_empty()
    }

    pub fn to_prompt_section(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut section = String::from("Product Details from URL:\n");
        if !self.title.is_empty() {
            section.push_str(&format!("Title: {}\n", self.title));
        }
        if !self.description.is_empty() {
            section.push_str(&format!("Description: {}\n", self.description));
        }
        if !self.features.is_empty() {
            section.push_str("Features:\n");
            for feature in &self.features {
                section.push_str(&format!("- {feature}\n"));
            }
        }
        section.trim_end().to_string()
    }
}

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Fetches the product page and extracts title, meta description and bullet
/// features. Failures degrade to empty details; the caller never aborts on
/// a scrape problem.
pub async fn fetch_product_details(
    http: &reqwest::Client,
    url: &reqwest::Url,
    timeout_ms: u64,
) -> ProductDetails {
    let fut = http
        .get(url.clone())
        .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
        .send();

    let response = match timeout(Duration::from_millis(timeout_ms), fut).await {
        Ok(Ok(response)) if response.status().is_success() => response,
        Ok(Ok(response)) => {
            debug!("product page fetch returned {}", response.status());
            return ProductDetails::default();
        }
        Ok(Err(err)) => {
            debug!("product page fetch failed: {err}");
            return ProductDetails::default();
        }
        Err(_) => {
            debug!("product page fetch timed out");
            return ProductDetails::default();
        }
    };

    match response.text().await {
        Ok(html) => extract_details(&html),
        Err(err) => {
            debug!("product page body read failed: {err}");
            ProductDetails::default()
        }
    }
}

fn extract_details(html: &str) -> ProductDetails {
    let document = Html::parse_document(html);

    // These selectors are static and always parse.
    let title_sel = Selector::parse("title").unwrap();
    let meta_sel = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let ul_sel = Selector::parse("ul").unwrap();
    let li_sel = Selector::parse("li").unwrap();

    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description = document
        .select(&meta_sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    // First list that yields substantial bullets wins, Amazon/Flipkart style.
    let mut features = Vec::new();
    for ul in document.select(&ul_sel) {
        for li in ul.select(&li_sel) {
            let text = li.text().collect::<String>().trim().to_string();
            if !text.is_empty() && text.len() > 25 && features.len() < 10 {
                features.push(text);
            }
        }
        if !features.is_empty() {
            break;
        }
    }

    ProductDetails {
        title,
        description,
        features,
    }
}
