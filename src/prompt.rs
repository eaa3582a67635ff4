use crate::api::models::FaqRequest;
use crate::product::ProductDetails;
use crate::serper::SerpResults;

/// Composes the generation prompt: writer persona and output constraints
/// first, then the scraped product details, then the SERP research.
pub fn build_prompt(
    request: &FaqRequest,
    details: &ProductDetails,
    serp: &SerpResults,
) -> String {
    let mut prompt = format!(
        "You are an expert e-commerce content writer. Generate {count} unique, concise FAQs \
         (40-50 words each) for the product '{keywords}' on {platform}. \
         Use the following SERP research and product details for inspiration. \
         Write in {language}. Format as a numbered list for easy copy-paste.\n",
        count = request.faq_count,
        keywords = request.product_keywords,
        platform = request.platform,
        language = request.language,
    );

    let details_section = details.to_prompt_section();
    if !details_section.is_empty() {
        prompt.push('\n');
        prompt.push_str(&details_section);
        prompt.push('\n');
    }

    let serp_section = serp.to_prompt_section();
    if !serp_section.is_empty() {
        prompt.push('\n');
        prompt.push_str(&serp_section);
        prompt.push('\n');
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{GenerateRequest, Platform};
    use crate::serper::PeopleAlsoAsk;

    fn request() -> FaqRequest {
        FaqRequest::validate(GenerateRequest {
            product_keywords: "wireless earbuds".to_string(),
            platform: "Amazon".to_string(),
            product_url: None,
            language: "Spanish".to_string(),
            faq_count: 7,
            gemini_api_key: None,
            serper_api_key: None,
        })
        .unwrap()
    }

    #[test]
    fn prompt_embeds_keywords_platform_language_and_count() {
        let prompt = build_prompt(&request(), &ProductDetails::default(), &SerpResults::default());
        assert!(prompt.contains("Generate 7 unique"));
        assert!(prompt.contains("'wireless earbuds' on Amazon"));
        assert!(prompt.contains("Write in Spanish."));
        assert_eq!(request().platform, Platform::Amazon);
    }

    #[test]
    fn empty_context_adds_no_sections() {
        let prompt = build_prompt(&request(), &ProductDetails::default(), &SerpResults::default());
        assert!(!prompt.contains("Product Details from URL:"));
        assert!(!prompt.contains("People Also Ask:"));
    }

    #[test]
    fn context_sections_are_appended_when_present() {
        let details = ProductDetails {
            title: "Acme Buds".to_string(),
            description: String::new(),
            features: vec![],
        };
        let serp = SerpResults {
            organic: vec![],
            people_also_ask: vec![PeopleAlsoAsk {
                question: "Do they pair with Android?".to_string(),
            }],
            related_searches: vec![],
        };
        let prompt = build_prompt(&request(), &details, &serp);
        assert!(prompt.contains("Title: Acme Buds"));
        assert!(prompt.contains("- Do they pair with Android?"));
    }
}
