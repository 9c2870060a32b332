//! Analyst chat: one lazily created provider session per application run.
//!
//! The session handle is owned here, built on the first message with a system
//! instruction stamped with the wall-clock time, and dropped by `end_session`.

use crate::domain::DomainError;
use crate::ports::{AiPort, ChatConfig, ChatSessionPort, ClockPort};
use crate::usecases::prompts::analyst_system_instruction;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct ChatService {
    ai: Arc<dyn AiPort>,
    clock: Arc<dyn ClockPort>,
    session: Mutex<Option<Box<dyn ChatSessionPort>>>,
}

impl ChatService {
    pub fn new(ai: Arc<dyn AiPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            ai,
            clock,
            session: Mutex::new(None),
        }
    }

    /// Send one user message and return the analyst's reply text.
    ///
    /// Blank input is rejected without touching the provider. A second call while one is
    /// in flight fails with `DomainError::Busy`.
    pub async fn send(&self, text: &str) -> Result<String, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput("empty chat message".to_string()));
        }

        let mut guard = self.session.try_lock().map_err(|_| DomainError::Busy)?;
        if guard.is_none() {
            let now = self.clock.now().with_timezone(&Local);
            let config = ChatConfig {
                system_instruction: analyst_system_instruction(&now),
                web_search: true,
            };
            info!(started_at = %now.to_rfc3339(), "starting analyst session");
            *guard = Some(self.ai.start_chat(config)?);
        }
        let Some(session) = guard.as_mut() else {
            return Err(DomainError::Ai("chat session unavailable".to_string()));
        };

        let reply = session.send_message(text).await?;
        Ok(reply.text)
    }

    pub async fn has_session(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Drop the session. Returns the number of completed turns, if one existed.
    pub async fn end_session(&self) -> Option<usize> {
        let session = self.session.lock().await.take()?;
        let turns = session.turns();
        info!(turns, "analyst session ended");
        Some(turns)
    }
}
