use crate::api::models::FaqPair;

/// Best-effort parse of generated free text into question/answer pairs.
///
/// First pass expects the numbered-list format the prompt asks for
/// ("1. Question? Answer."). If no line matches, falls back to splitting
/// the whole text on '?'. An empty result is acceptable; the raw text is
/// always shown to the user regardless.
pub fn parse_faqs(text: &str) -> Vec<FaqPair> {
    let mut pairs = Vec::new();

    for line in text.lines() {
        if let Some(pair) = parse_numbered_line(line) {
            pairs.push(pair);
        }
    }

    if pairs.is_empty() {
        let parts: Vec<&str> = text.split('?').collect();
        for chunk in parts.chunks(2) {
            if let [question, answer] = chunk {
                let question = question.trim();
                let answer = answer.trim();
                if !question.is_empty() && !answer.is_empty() {
                    pairs.push(FaqPair {
                        question: format!("{question}?"),
                        answer: answer.to_string(),
                    });
                }
            }
        }
    }

    pairs
}

fn parse_numbered_line(line: &str) -> Option<FaqPair> {
    let rest = strip_list_marker(line.trim())?;
    let (question, answer) = rest.split_once('?')?;
    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some(FaqPair {
        question: format!("{question}?"),
        answer: answer.to_string(),
    })
}

// "3. ..." / "3) ..." → "...", anything else → None.
fn strip_list_marker(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    Some(rest.trim_start())
}

/// Plain-text export: numbered question lines with the answer below each.
pub fn to_plain_text(pairs: &[FaqPair]) -> String {
    let mut out = String::new();
    for (idx, pair) in pairs.iter().enumerate() {
        out.push_str(&format!("{}. {}\n{}\n\n", idx + 1, pair.question, pair.answer));
    }
    out.trim_end().to_string()
}

/// schema.org FAQPage markup for embedding in a product page.
pub fn to_jsonld(pairs: &[FaqPair]) -> String {
    let main_entity: Vec<serde_json::Value> = pairs
        .iter()
        .map(|pair| {
            serde_json::json!({
                "@type": "Question",
                "name": pair.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": pair.answer
                }
            })
        })
        .collect();

    let doc = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": main_entity
    });

    // json! output is always serializable.
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_list() {
        let text = "1. Are the earbuds waterproof? Yes, they are IPX5 rated.\n\
                    2) How long is the battery life? Up to 30 hours with the case.";
        let pairs = parse_faqs(text);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].question, "Are the earbuds waterproof?");
        assert_eq!(pairs[0].answer, "Yes, they are IPX5 rated.");
        assert_eq!(pairs[1].question, "How long is the battery life?");
    }

    #[test]
    fn falls_back_to_question_mark_split() {
        let text = "Do they support Bluetooth 5.3? Yes, with multipoint pairing.";
        let pairs = parse_faqs(text);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].question, "Do they support Bluetooth 5.3?");
        assert_eq!(pairs[0].answer, "Yes, with multipoint pairing.");
    }

    #[test]
    fn unparseable_text_gives_no_pairs() {
        assert!(parse_faqs("no questions here, just prose").is_empty());
    }

    #[test]
    fn plain_text_numbers_pairs() {
        let pairs = vec![
            FaqPair {
                question: "Q one?".to_string(),
                answer: "A one.".to_string(),
            },
            FaqPair {
                question: "Q two?".to_string(),
                answer: "A two.".to_string(),
            },
        ];
        let text = to_plain_text(&pairs);
        assert!(text.starts_with("1. Q one?\nA one."));
        assert!(text.contains("2. Q two?"));
    }

    #[test]
    fn jsonld_is_a_faq_page() {
        let pairs = vec![FaqPair {
            question: "Is it good?".to_string(),
            answer: "Yes.".to_string(),
        }];
        let doc: serde_json::Value = serde_json::from_str(&to_jsonld(&pairs)).unwrap();
        assert_eq!(doc["@type"], "FAQPage");
        assert_eq!(doc["mainEntity"][0]["@type"], "Question");
        assert_eq!(doc["mainEntity"][0]["acceptedAnswer"]["text"], "Yes.");
    }
}
