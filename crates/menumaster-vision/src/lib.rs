//! Vision module - AI-powered menu photo analysis

pub mod ai;

// Re-export main types for convenience
pub use ai::backend::{encode_image, AiBackend, EncodedImage};
pub use ai::gemini::{GeminiBackend, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
pub use ai::prompts::{build_instruction, build_prompt, scenario_instruction};
pub use ai::schema::{response_schema, REQUIRED_SECTIONS};

use menumaster_types::{AnalysisResult, Error, MenuImage, Preferences, Result};

/// Analyze one menu photo against the user's preferences.
///
/// Makes exactly one backend call. Either the whole structured result comes
/// back or an error does; nothing is partially filled in.
pub async fn analyze_menu<B: AiBackend>(
    backend: &B,
    image: &MenuImage,
    preferences: &Preferences,
) -> Result<AnalysisResult> {
    let encoded = encode_image(image);
    let prompt = build_prompt(preferences);

    let response = backend
        .generate_with_image(prompt, encoded, response_schema())
        .await?;

    parse_response(&response)
}

/// Parse the model's reply into an `AnalysisResult`
pub fn parse_response(response: &str) -> Result<AnalysisResult> {
    let json_str = extract_json_from_response(response);

    serde_json::from_str(&json_str).map_err(|e| {
        tracing::error!("Failed to parse JSON response: {}", response);
        Error::MalformedResponse {
            reason: e.to_string(),
            raw: response.to_string(),
        }
    })
}

/// Strip whitespace and a surrounding markdown code fence, if any
pub fn extract_json_from_response(response: &str) -> String {
    let response = response.trim();

    if response.starts_with("```") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').map(|i| i + 1).unwrap_or(end);
            if start < end {
                return response[start..end].trim().to_string();
            }
        }
    }

    response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_markdown() {
        let response = "```json\n{\"test\": 123}\n```";
        assert_eq!(extract_json_from_response(response), "{\"test\": 123}");
    }

    #[test]
    fn test_extract_json_plain() {
        let response = "  {\"test\": 123}\n";
        assert_eq!(extract_json_from_response(response), "{\"test\": 123}");
    }

    #[test]
    fn test_extract_json_unterminated_fence_left_alone() {
        let response = "```json";
        assert_eq!(extract_json_from_response(response), "```json");
    }

    #[test]
    fn test_parse_response_rejects_prose() {
        let err = parse_response("Sorry, I cannot read this menu.").unwrap_err();
        match err {
            Error::MalformedResponse { raw, .. } => {
                assert_eq!(raw, "Sorry, I cannot read this menu.")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_rejects_missing_section() {
        let partial = r#"{"menuScanResults":{"cuisineType":"Thai","restaurantStyle":"Casual","language":"English"}}"#;
        assert!(matches!(
            parse_response(partial),
            Err(Error::MalformedResponse { .. })
        ));
    }
}
