//! Gemini `generateContent` adapter.
//!
//! Implements `AiPort` for one-shot generation (optionally schema-constrained) and
//! hands out `GeminiChatSession`s that keep the conversation history client-side.
//! Search grounding is enabled per request via the `googleSearch` tool.

use crate::domain::{DomainError, GroundingCitation};
use crate::ports::{AiPort, ChatConfig, ChatSessionPort, GenerateRequest, GenerateResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared HTTP endpoint; cloned into every chat session.
struct Endpoint {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

/// Gemini REST adapter.
pub struct GeminiAdapter {
    endpoint: Arc<Endpoint>,
    model: String,
}

impl GeminiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_base_url` - REST base (e.g. "https://generativelanguage.googleapis.com/v1beta")
    /// * `api_key` - Gemini API key, sent as `x-goog-api-key`
    /// * `model` - Model name (e.g. "gemini-3-flash-preview")
    pub fn new(api_base_url: String, api_key: String, model: String) -> Self {
        let url = format!(
            "{}/models/{}:generateContent",
            api_base_url.trim_end_matches('/'),
            model
        );
        Self {
            endpoint: Arc::new(Endpoint {
                client: reqwest::Client::new(),
                url,
                api_key,
            }),
            model,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<&'a Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize, Debug)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize, Debug)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

/// Whether `model` accepts `responseSchema` in the same request as built-in tools.
/// Older families reject the pairing with a 400.
fn supports_schema_with_tools(model: &str) -> bool {
    model.trim_start_matches("models/").starts_with("gemini-3")
}

fn search_tools(web_search: bool) -> Vec<Tool> {
    if web_search {
        vec![Tool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    }
}

/// Concatenate the text parts of the first candidate and collect its web citations.
fn into_generate_response(
    response: GenerateContentResponse,
) -> Result<GenerateResponse, DomainError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::Parse("No candidates returned".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(DomainError::Parse("Empty response text".to_string()));
    }

    let citations = candidate
        .grounding_metadata
        .map(|m| {
            m.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter_map(|web| {
                    web.uri.map(|uri| GroundingCitation {
                        uri,
                        title: web.title,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(GenerateResponse { text, citations })
}

impl Endpoint {
    async fn post(
        &self,
        body: &GenerateContentRequest<'_>,
    ) -> Result<GenerateResponse, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Gemini API returned error");
            return Err(DomainError::Ai(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Failed to parse API response: {}", e)))?;
        into_generate_response(parsed)
    }
}

#[async_trait::async_trait]
impl AiPort for GeminiAdapter {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, DomainError> {
        info!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            structured = request.response_schema.is_some(),
            web_search = request.web_search,
            "sending generation request"
        );

        let contents = [Content::text(Some("user"), &request.prompt)];
        let body = GenerateContentRequest {
            contents: &contents,
            system_instruction: None,
            tools: search_tools(request.web_search),
            generation_config: self.generation_config(request),
        };

        let result = self.endpoint.post(&body).await?;
        debug!(
            text_len = result.text.len(),
            citations = result.citations.len(),
            "received generation response"
        );
        Ok(result)
    }

    fn start_chat(&self, config: ChatConfig) -> Result<Box<dyn ChatSessionPort>, DomainError> {
        info!(model = %self.model, web_search = config.web_search, "opening chat session");
        Ok(Box::new(GeminiChatSession {
            endpoint: Arc::clone(&self.endpoint),
            system_instruction: Content::text(None, &config.system_instruction),
            web_search: config.web_search,
            history: Vec::new(),
        }))
    }
}

impl GeminiAdapter {
    /// Schema constraint for `request`, dropped when the model cannot combine it with search.
    /// The prompt still asks for JSON, and callers sanitize the text before parsing.
    fn generation_config(&self, request: &GenerateRequest) -> Option<GenerationConfig> {
        let schema = request.response_schema.clone()?;
        if request.web_search && !supports_schema_with_tools(&self.model) {
            debug!(model = %self.model, "schema not sent: model rejects schema with tools");
            return None;
        }
        Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        })
    }
}

/// Conversation with history kept locally; the full history is resent each turn.
pub struct GeminiChatSession {
    endpoint: Arc<Endpoint>,
    system_instruction: Content,
    web_search: bool,
    history: Vec<Content>,
}

#[async_trait::async_trait]
impl ChatSessionPort for GeminiChatSession {
    async fn send_message(&mut self, text: &str) -> Result<GenerateResponse, DomainError> {
        let user = Content::text(Some("user"), text);
        let mut contents = self.history.clone();
        contents.push(user.clone());

        let body = GenerateContentRequest {
            contents: &contents,
            system_instruction: Some(&self.system_instruction),
            tools: search_tools(self.web_search),
            generation_config: None,
        };
        let reply = self.endpoint.post(&body).await?;

        // History only grows on success so a failed turn leaves no dangling user entry.
        self.history.push(user);
        self.history.push(Content::text(Some("model"), &reply.text));
        info!(
            turns = self.turns(),
            citations = reply.citations.len(),
            "chat turn complete"
        );
        Ok(reply)
    }

    fn turns(&self) -> usize {
        self.history.len() / 2
    }
}
