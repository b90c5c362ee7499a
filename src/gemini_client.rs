// src/gemini_client.rs
use crate::models::chat::ChatTurn;
use crate::services::stylist::ChatRelay;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Stylist relay is not configured (missing GEMINI_API_KEY)")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to decode Gemini response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Gemini returned no text (finish reason: {0})")]
    EmptyReply(String),
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    system_instruction: String,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: u32,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            parts: vec![Part { text: Some(text.to_string()) }],
            role: role.map(str::to_string),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn stop_reason(&self) -> String {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .or_else(|| self.candidates.first().and_then(|c| c.finish_reason.clone()))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        system_instruction: String,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            system_instruction,
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, history: &[ChatTurn], message: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(Some(turn.role.as_gemini_role()), &turn.text))
            .collect();
        contents.push(Content::text(Some("user"), message));

        GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text(None, &self.system_instruction)),
            generation_config: Some(GenerationConfig { temperature: self.temperature }),
        }
    }

    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RelayError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!(
            model = %self.model,
            contents = request.contents.len(),
            "sending Gemini generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RelayError::Api { status: status.as_u16(), body });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                completion_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "Gemini usage"
            );
        }
        Ok(parsed)
    }
}

#[async_trait]
impl ChatRelay for GeminiClient {
    async fn reply(&self, history: &[ChatTurn], message: &str) -> Result<String, RelayError> {
        let request = self.build_request(history, message);
        let response = self.generate_content(&request).await?;
        response
            .first_text()
            .ok_or_else(|| RelayError::EmptyReply(response.stop_reason()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> GeminiClient {
        GeminiClient::new(
            "test-key".to_string(),
            "https://example.invalid/v1beta/".to_string(),
            "gemini-test".to_string(),
            "You are Muse.".to_string(),
            0.7,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_request_wire_shape() {
        let history = vec![ChatTurn::user("hello"), ChatTurn::model("hi there")];
        let request = client().build_request(&history, "a wedding outfit?");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "You are Muse.");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"].as_array().unwrap().len(), 3);
        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["contents"][2]["role"], "user");
        assert_eq!(value["contents"][2]["parts"][0]["text"], "a wedding outfit?");
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_first_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Try the " }, { "text": "Terra Midi Dress." }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("Try the Terra Midi Dress."));
    }

    #[test]
    fn test_blocked_prompt_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(response.first_text().is_none());
        assert_eq!(response.stop_reason(), "SAFETY");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(client().base_url, "https://example.invalid/v1beta");
        assert_eq!(client().model(), "gemini-test");
    }
}
