//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, GroundingCitation};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// One-shot content generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub prompt: String,
    /// JSON schema the answer must conform to. `None` = free text.
    pub response_schema: Option<serde_json::Value>,
    /// Enable live web-search grounding.
    pub web_search: bool,
}

/// Generated text plus any grounding citations the provider attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub text: String,
    pub citations: Vec<GroundingCitation>,
}

/// Configuration fixed at chat session creation.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub system_instruction: String,
    pub web_search: bool,
}

/// Generative-language provider.
#[async_trait::async_trait]
pub trait AiPort: Send + Sync {
    /// Single request/response generation.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, DomainError>;

    /// Open a conversational session that retains history across calls.
    fn start_chat(&self, config: ChatConfig) -> Result<Box<dyn ChatSessionPort>, DomainError>;
}

/// A live conversation with the provider. Each successful call extends its history.
#[async_trait::async_trait]
pub trait ChatSessionPort: Send {
    async fn send_message(&mut self, text: &str) -> Result<GenerateResponse, DomainError>;

    /// Completed turns (user + model pairs) in this session.
    fn turns(&self) -> usize;
}

/// Destination for exported reports.
#[async_trait::async_trait]
pub trait ReportPort: Send + Sync {
    /// Persist `contents` under `file_name`. Returns the final location.
    async fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, DomainError>;
}

/// Wall clock. Injected so timestamps are testable.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
