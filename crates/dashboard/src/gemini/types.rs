//! Types for the Gemini API.
//!
//! These types match the `models.generateContent` REST format. Only the
//! fields the dashboard reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns (a single user turn for analysis).
    pub contents: Vec<Content>,
    /// Sampling configuration.
    pub generation_config: GenerationConfig,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn carrying a single text part.
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

/// A content part. Non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Sampling configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,
}

/// Response from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates; empty when the prompt was blocked.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token usage information.
    pub usage_metadata: Option<UsageMetadata>,
    /// Model version that served the request.
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any text exists.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// A generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content (absent when filtered).
    pub content: Option<Content>,
    /// Why generation stopped (e.g. "STOP", "MAX_TOKENS", "SAFETY").
    pub finish_reason: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Prompt tokens.
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Generated tokens.
    #[serde(default)]
    pub candidates_token_count: u32,
    /// Total tokens.
    #[serde(default)]
    pub total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text("Analyze this")],
            generation_config: GenerationConfig { temperature: 0.5 },
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Analyze this");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Revenue is up. "}, {"text": "This week's overall health: Excellent"}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 812, "candidatesTokenCount": 240, "totalTokenCount": 1052},
            "modelVersion": "gemini-3-flash-preview"
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            response.text().as_deref(),
            Some("Revenue is up. This week's overall health: Excellent")
        );
        let usage = response.usage_metadata.expect("usage");
        assert_eq!(usage.total_token_count, 1052);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.text().is_none());
    }

    #[test]
    fn test_response_with_blank_text_has_no_text() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}, "finishReason": "STOP"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.text().is_none());
    }
}
