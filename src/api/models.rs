use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FaqError;

pub const MIN_FAQ_COUNT: u8 = 3;
pub const MAX_FAQ_COUNT: u8 = 10;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub product_keywords: String,
    pub platform: String,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_faq_count")]
    pub faq_count: u8,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub serper_api_key: Option<String>,
}

fn default_language() -> String {
    "English".to_string()
}

fn default_faq_count() -> u8 {
    5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Amazon,
    Flipkart,
    Walmart,
    Other,
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amazon" => Ok(Self::Amazon),
            "flipkart" => Ok(Self::Flipkart),
            "walmart" => Ok(Self::Walmart),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Amazon => "Amazon",
            Self::Flipkart => "Flipkart",
            Self::Walmart => "Walmart",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

/// A validated request. Built from [`GenerateRequest`] before any network
/// call; the generation service is never contacted for malformed input.
#[derive(Debug)]
pub struct FaqRequest {
    pub product_keywords: String,
    pub platform: Platform,
    pub product_url: Option<reqwest::Url>,
    pub language: String,
    pub faq_count: u8,
    pub gemini_api_key: Option<String>,
    pub serper_api_key: Option<String>,
}

impl FaqRequest {
    pub fn validate(raw: GenerateRequest) -> Result<Self, FaqError> {
        let product_keywords = raw.product_keywords.trim().to_string();
        if product_keywords.is_empty() {
            return Err(FaqError::Validation(
                "Field \"product_keywords\" must be a non-empty string".to_string(),
            ));
        }

        let platform = Platform::from_str(&raw.platform).map_err(|_| {
            FaqError::Validation(format!(
                "Unsupported platform \"{}\" (expected Amazon, Flipkart, Walmart or Other)",
                raw.platform
            ))
        })?;

        let product_url = match raw.product_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => {
                let url = reqwest::Url::parse(value).map_err(|e| {
                    FaqError::Validation(format!("Invalid product URL: {e}"))
                })?;
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(FaqError::Validation(
                        "Product URL must use http or https".to_string(),
                    ));
                }
                Some(url)
            }
        };

        if !(MIN_FAQ_COUNT..=MAX_FAQ_COUNT).contains(&raw.faq_count) {
            return Err(FaqError::Validation(format!(
                "Field \"faq_count\" must be between {MIN_FAQ_COUNT} and {MAX_FAQ_COUNT}"
            )));
        }

        let language = raw.language.trim();
        let language = if language.is_empty() {
            "English".to_string()
        } else {
            language.to_string()
        };

        Ok(Self {
            product_keywords,
            platform,
            product_url,
            language,
            faq_count: raw.faq_count,
            gemini_api_key: none_if_blank(raw.gemini_api_key),
            serper_api_key: none_if_blank(raw.serper_api_key),
        })
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FaqPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub faqs: Vec<FaqPair>,
    /// Raw generation output, kept even when structured parsing found pairs.
    pub raw: String,
    /// Plain-text export offered for download by the page.
    pub text: String,
    /// schema.org FAQPage export offered for download by the page.
    pub jsonld: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(keywords: &str, platform: &str) -> GenerateRequest {
        GenerateRequest {
            product_keywords: keywords.to_string(),
            platform: platform.to_string(),
            product_url: None,
            language: "English".to_string(),
            faq_count: 5,
            gemini_api_key: None,
            serper_api_key: None,
        }
    }

    #[test]
    fn rejects_whitespace_only_keywords() {
        let err = FaqRequest::validate(raw("   ", "Amazon")).unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_platform() {
        let err = FaqRequest::validate(raw("air fryer", "Etsy")).unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));
    }

    #[test]
    fn platform_parse_is_case_insensitive() {
        let req = FaqRequest::validate(raw("air fryer", "flipkart")).unwrap();
        assert_eq!(req.platform, Platform::Flipkart);
    }

    #[test]
    fn rejects_malformed_product_url() {
        let mut request = raw("air fryer", "Amazon");
        request.product_url = Some("not a url".to_string());
        let err = FaqRequest::validate(request).unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));
    }

    #[test]
    fn blank_product_url_is_treated_as_absent() {
        let mut request = raw("air fryer", "Amazon");
        request.product_url = Some("  ".to_string());
        let req = FaqRequest::validate(request).unwrap();
        assert!(req.product_url.is_none());
    }

    #[test]
    fn rejects_faq_count_out_of_range() {
        let mut request = raw("air fryer", "Amazon");
        request.faq_count = 11;
        let err = FaqRequest::validate(request).unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));
    }
}
