//! Mock AI adapter for running without an API key and for tests.
//!
//! Returns canned, grounded news and an echoing analyst. Responses, failures and an
//! optional gate on chat replies are scriptable; every request is recorded.

use crate::domain::{DomainError, GroundingCitation};
use crate::ports::{AiPort, ChatConfig, ChatSessionPort, GenerateRequest, GenerateResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::info;

/// Canned news batch. No `category` field: the service falls back to the requested one.
const DEMO_NEWS: &str = r#"[
  {
    "id": "mock-1",
    "title": "[MOCK] Central bank holds interest rates steady",
    "summary": "Policy makers kept the benchmark rate unchanged, citing easing inflation.",
    "sources": ["Demo Wire", "Sample Times"],
    "url": "https://news.example/mock-1",
    "timestamp": "2026-01-01T08:00:00Z",
    "isVerified": true,
    "verificationDetails": "Reported independently by two outlets."
  },
  {
    "id": "mock-2",
    "title": "[MOCK] Regional grid operator reports overnight outage",
    "summary": "Several districts lost power for two hours; the cause is under investigation.",
    "sources": ["Demo Wire"],
    "url": "https://news.example/mock-2",
    "timestamp": "2026-01-01T07:30:00Z",
    "isVerified": false,
    "verificationDetails": "Single source so far; awaiting confirmation."
  }
]"#;

#[derive(Debug, Clone)]
enum Scripted {
    Reply(GenerateResponse),
    Fail,
}

/// Mock AI adapter.
///
/// Simulates network latency with a configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    news: Scripted,
    chat_fails: bool,
    chat_gate: Option<Arc<Notify>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    sessions_started: Arc<AtomicUsize>,
    chat_inputs: Arc<Mutex<Vec<String>>>,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms) and demo news.
    pub fn new() -> Self {
        Self {
            delay_ms: 100,
            news: Scripted::Reply(GenerateResponse {
                text: DEMO_NEWS.to_string(),
                citations: vec![GroundingCitation {
                    uri: "https://news.example".to_string(),
                    title: Some("news.example".to_string()),
                }],
            }),
            chat_fails: false,
            chat_gate: None,
            requests: Arc::default(),
            sessions_started: Arc::default(),
            chat_inputs: Arc::default(),
        }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Answer every generation request with `text` and `citations`.
    pub fn with_news_response(mut self, text: &str, citations: Vec<GroundingCitation>) -> Self {
        self.news = Scripted::Reply(GenerateResponse {
            text: text.to_string(),
            citations,
        });
        self
    }

    /// Fail every generation request with a transport error.
    pub fn with_failing_news(mut self) -> Self {
        self.news = Scripted::Fail;
        self
    }

    /// Fail every chat turn with a transport error.
    pub fn with_failing_chat(mut self) -> Self {
        self.chat_fails = true;
        self
    }

    /// Hold each chat reply until `gate` is notified.
    pub fn with_chat_gate(mut self, gate: Arc<Notify>) -> Self {
        self.chat_gate = Some(gate);
        self
    }

    /// Generation requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of chat sessions opened.
    pub fn sessions_started(&self) -> usize {
        self.sessions_started.load(Ordering::SeqCst)
    }

    /// Messages sent through any chat session.
    pub fn chat_inputs(&self) -> Vec<String> {
        self.chat_inputs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AiPort for MockAiAdapter {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, DomainError> {
        info!(
            prompt_len = request.prompt.len(),
            "[MOCK] Simulating generation"
        );
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        match &self.news {
            Scripted::Reply(reply) => Ok(reply.clone()),
            Scripted::Fail => Err(DomainError::Ai("[MOCK] simulated transport failure".into())),
        }
    }

    fn start_chat(&self, config: ChatConfig) -> Result<Box<dyn ChatSessionPort>, DomainError> {
        let n = self.sessions_started.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            sessions = n,
            instruction_len = config.system_instruction.len(),
            "[MOCK] Opening chat session"
        );
        Ok(Box::new(MockChatSession {
            delay_ms: self.delay_ms,
            fails: self.chat_fails,
            gate: self.chat_gate.clone(),
            inputs: Arc::clone(&self.chat_inputs),
            turns: 0,
        }))
    }
}

struct MockChatSession {
    delay_ms: u64,
    fails: bool,
    gate: Option<Arc<Notify>>,
    inputs: Arc<Mutex<Vec<String>>>,
    turns: usize,
}

#[async_trait::async_trait]
impl ChatSessionPort for MockChatSession {
    async fn send_message(&mut self, text: &str) -> Result<GenerateResponse, DomainError> {
        self.inputs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.fails {
            return Err(DomainError::Ai("[MOCK] simulated chat failure".into()));
        }
        self.turns += 1;
        Ok(GenerateResponse {
            text: format!(
                "[MOCK] Turn {}: I could not check live sources for \"{}\"; treat this as not yet verified.",
                self.turns,
                text.trim()
            ),
            citations: Vec::new(),
        })
    }

    fn turns(&self) -> usize {
        self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_requests() {
        let adapter = MockAiAdapter::new().with_delay(0);
        let request = GenerateRequest {
            prompt: "hello".to_string(),
            response_schema: None,
            web_search: true,
        };
        let reply = adapter.generate(&request).await.unwrap();
        assert!(reply.text.contains("mock-1"));
        assert_eq!(reply.citations.len(), 1);
        assert_eq!(adapter.requests().len(), 1);
        assert_eq!(adapter.requests()[0].prompt, "hello");
    }

    #[tokio::test]
    async fn test_mock_chat_session_counts_turns() {
        let adapter = MockAiAdapter::new().with_delay(0);
        let mut session = adapter.start_chat(ChatConfig::default()).unwrap();
        session.send_message("one").await.unwrap();
        let reply = session.send_message("two").await.unwrap();
        assert!(reply.text.contains("Turn 2"));
        assert_eq!(session.turns(), 2);
        assert_eq!(adapter.sessions_started(), 1);
        assert_eq!(adapter.chat_inputs(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let adapter = MockAiAdapter::new()
            .with_delay(0)
            .with_failing_news()
            .with_failing_chat();
        assert!(adapter.generate(&GenerateRequest::default()).await.is_err());
        let mut session = adapter.start_chat(ChatConfig::default()).unwrap();
        assert!(session.send_message("hi").await.is_err());
        assert_eq!(session.turns(), 0);
    }
}
