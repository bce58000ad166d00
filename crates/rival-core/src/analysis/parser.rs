//! Structured output parsing.
//!
//! The model is asked for a bare JSON object but sometimes wraps it in a
//! markdown fence or a sentence. Unwrapping that is the only leniency:
//! decoding itself is strict and a mismatch is an error.

use super::model::AnalysisOutput;

/// Decode a raw model response into `AnalysisOutput`.
///
/// Text that already decodes is taken as is; only on failure is a wrapped
/// object looked for and decoded instead.
pub fn parse_output(raw: &str) -> Result<AnalysisOutput, serde_json::Error> {
    let trimmed = raw.trim();
    match serde_json::from_str(trimmed) {
        Ok(output) => Ok(output),
        Err(direct) => match extract_json(trimmed) {
            Some(inner) if inner != trimmed => serde_json::from_str(inner),
            _ => Err(direct),
        },
    }
}

/// Extract the JSON object from text that wraps it in a leading code fence
/// (any language tag, any case) or in surrounding prose.
pub fn extract_json(text: &str) -> Option<&str> {
    let trimmed = text.trim();

    if let Some(after_marker) = trimmed.strip_prefix("```") {
        // Skip the language tag line, e.g. ```json or ```JSON.
        let body = match after_marker.find('\n') {
            Some(newline) => &after_marker[newline + 1..],
            None => after_marker,
        };
        let body = match body.rfind("```") {
            Some(end) => &body[..end],
            None => body,
        };
        return Some(body.trim());
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => Some(&trimmed[start..=end]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "summary": "S",
        "positioning": "P",
        "top_competitors": [
            {"asin": "Y2", "title": "Gadget", "price": 7.5, "currency": "EUR", "rating": 4.0, "key_points": ["cheaper"]}
        ],
        "recommendations": ["Lower price"]
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let out = parse_output(VALID).unwrap();
        assert_eq!(out.summary, "S");
        assert_eq!(out.top_competitors.len(), 1);
        assert_eq!(out.top_competitors[0].key_points, vec!["cheaper"]);
        assert_eq!(out.recommendations, vec!["Lower price"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = format!("Here is the analysis:\n```json\n{}\n```\nThanks", VALID);
        assert_eq!(parse_output(&raw).unwrap().positioning, "P");
    }

    #[test]
    fn test_parse_json_surrounded_by_prose() {
        let raw = format!("Sure! {} Hope this helps.", VALID);
        assert_eq!(parse_output(&raw).unwrap().summary, "S");
    }

    #[test]
    fn test_lists_default_to_empty() {
        let out = parse_output(r#"{"summary": "S", "positioning": "P"}"#).unwrap();
        assert!(out.top_competitors.is_empty());
        assert!(out.recommendations.is_empty());
    }

    #[test]
    fn test_nullable_competitor_fields() {
        let raw = r#"{"summary": "S", "positioning": "P",
            "top_competitors": [{"asin": "", "title": null, "price": null, "currency": null, "rating": null}]}"#;
        let out = parse_output(raw).unwrap();
        assert_eq!(out.top_competitors[0].asin, "");
        assert!(out.top_competitors[0].key_points.is_empty());
    }

    #[test]
    fn test_missing_summary_rejected() {
        assert!(parse_output(r#"{"positioning": "P"}"#).is_err());
    }

    #[test]
    fn test_null_summary_rejected() {
        assert!(parse_output(r#"{"summary": null, "positioning": "P"}"#).is_err());
    }

    #[test]
    fn test_wrong_types_not_coerced() {
        let raw = r#"{"summary": "S", "positioning": "P",
            "top_competitors": [{"asin": "Y2", "price": "7.50"}]}"#;
        assert!(parse_output(raw).is_err());

        let raw = r#"{"summary": "S", "positioning": "P",
            "top_competitors": [{"asin": 42}]}"#;
        assert!(parse_output(raw).is_err());
    }

    #[test]
    fn test_backticks_inside_value_are_not_a_fence() {
        let raw = r#"{"summary": "Listing shows ```specs``` table", "positioning": "P", "top_competitors": [], "recommendations": []}"#;
        let out = parse_output(raw).unwrap();
        assert_eq!(out.summary, "Listing shows ```specs``` table");
    }

    #[test]
    fn test_parse_uppercase_fence() {
        let raw = format!("```JSON\n{}\n```", VALID);
        assert_eq!(parse_output(&raw).unwrap().summary, "S");
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = format!("```\n{}\n```", VALID);
        assert_eq!(parse_output(&raw).unwrap().positioning, "P");
    }

    #[test]
    fn test_extract_json_without_object() {
        assert_eq!(extract_json("no json here"), None);
    }

    #[test]
    fn test_not_json() {
        assert!(parse_output("I cannot help with that.").is_err());
    }
}
