use menumaster_types::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::backend::{AiBackend, EncodedImage};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    api_key: Option<String>,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiBackend {
    pub fn new(api_key: Option<String>, model_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model_name: model_name.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        )
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("Gemini API key is not configured");
            Error::MissingApiKey
        })?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                Error::Service(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(Error::Service(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode Gemini envelope: {}", e);
            Error::Service(format!("Failed to decode LLM envelope: {}", e))
        })?;

        extract_text(gemini_response)
    }
}

/// Pull the reply text out of a `generateContent` envelope
fn extract_text(response: GeminiResponse) -> Result<String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        tracing::error!("Gemini blocked the prompt: {}", reason);
        return Err(Error::Service(format!("Prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::Service("No response from LLM".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(Error::Service(format!(
            "Empty response from LLM (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

fn build_request(
    prompt: String,
    image: EncodedImage,
    response_schema: serde_json::Value,
) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type,
                        data: image.data,
                    },
                },
                Part::Text { text: prompt },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema,
        }),
    }
}

impl AiBackend for GeminiBackend {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: EncodedImage,
        response_schema: serde_json::Value,
    ) -> Result<String> {
        tracing::debug!(
            model = %self.model_name,
            mime_type = %image.mime_type,
            prompt_chars = prompt.len(),
            "calling Gemini generateContent"
        );
        let request = build_request(prompt, image, response_schema);
        self.call_gemini_api(request).await
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menumaster_types::ErrorKind;
    use serde_json::json;

    fn sample_image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/jpeg".to_string(),
            data: "AAEC".to_string(),
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let request = build_request("Describe".into(), sample_image(), json!({"type": "OBJECT"}));
        let value = serde_json::to_value(&request).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "AAEC");
        assert_eq!(parts[1]["text"], "Describe");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(response).unwrap_err().kind(), ErrorKind::Service);
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[test]
    fn test_extract_text_empty_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }))
        .unwrap();
        assert!(extract_text(response)
            .unwrap_err()
            .to_string()
            .contains("MAX_TOKENS"));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let backend = GeminiBackend::new(Some("k".into()), "gemini-2.5-flash")
            .with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            backend.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        assert!(!GeminiBackend::new(Some("  ".into()), DEFAULT_MODEL).has_api_key());
        assert!(GeminiBackend::new(Some("abc".into()), DEFAULT_MODEL).has_api_key());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let backend = GeminiBackend::new(None, DEFAULT_MODEL).with_base_url("http://127.0.0.1:9");
        let err = backend
            .generate_with_image("p".into(), sample_image(), json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }
}
