//! News desk controller. Front ends call these operations; state changes go through the reducer.
//!
//! Failure policy: retrieval and chat errors are logged and leave the visible state as it
//! was (previous list, transcript without a reply), but the typed error is still returned
//! so callers and tests can see what happened.

use crate::domain::{Category, DomainError, Language};
use crate::ports::ClockPort;
use crate::usecases::state::{Action, AppState, reduce};
use crate::usecases::{ChatService, ExportService, NewsService};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct NewsDesk {
    state: RwLock<AppState>,
    news: NewsService,
    chat: ChatService,
    export: ExportService,
    clock: Arc<dyn ClockPort>,
    next_seq: AtomicU64,
}

impl NewsDesk {
    pub fn new(
        initial: AppState,
        news: NewsService,
        chat: ChatService,
        export: ExportService,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let next_seq = AtomicU64::new(initial.news_seq);
        Self {
            state: RwLock::new(initial),
            news,
            chat,
            export,
            clock,
            next_seq,
        }
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn dispatch(&self, action: Action) -> bool {
        reduce(&mut *self.state.write().await, action)
    }

    /// Switch category and load its news. Returns the number of items loaded.
    pub async fn select_category(&self, category: Category) -> Result<usize, DomainError> {
        self.load(category).await
    }

    /// Reload the current category.
    pub async fn refresh(&self) -> Result<usize, DomainError> {
        let category = self.state.read().await.category;
        self.load(category).await
    }

    async fn load(&self, category: Category) -> Result<usize, DomainError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(Action::NewsRequested { category, seq }).await;
        let language = self.state.read().await.language;

        match self.news.fetch(category, language).await {
            Ok(items) => {
                let count = items.len();
                let at = self.clock.now();
                if !self.dispatch(Action::NewsLoaded { seq, items, at }).await {
                    info!(category = %category, seq, "discarding superseded news batch");
                }
                Ok(count)
            }
            Err(e) => {
                warn!(
                    category = %category,
                    error = %e,
                    "news retrieval failed; keeping previous list"
                );
                self.dispatch(Action::NewsFailed { seq }).await;
                Err(e)
            }
        }
    }

    /// Send a chat message. The user entry is appended before the provider answers.
    ///
    /// Blank input and submissions while a reply is pending are rejected without
    /// touching the transcript.
    pub async fn submit_chat(&self, text: &str) -> Result<String, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput("empty chat message".to_string()));
        }
        {
            let mut state = self.state.write().await;
            if state.awaiting_reply {
                return Err(DomainError::Busy);
            }
            reduce(
                &mut state,
                Action::ChatSubmitted {
                    text: text.to_string(),
                },
            );
        }

        match self.chat.send(text).await {
            Ok(reply) => {
                let text = reply.clone();
                self.dispatch(Action::ChatReplied { text }).await;
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, "analyst chat failed; reply dropped");
                self.dispatch(Action::ChatFailed).await;
                Err(e)
            }
        }
    }

    /// Export the list currently on screen.
    pub async fn export_report(&self) -> Result<PathBuf, DomainError> {
        let items = self.state.read().await.news.clone();
        self.export.export(&items).await
    }

    /// Language-change signal: re-select the bundle; later prompts use the new language.
    pub async fn change_language(&self, language: Language) {
        info!(language = language.code(), "language changed");
        self.dispatch(Action::LanguageChanged(language)).await;
    }

    /// End the chat session. Call once when the front end exits.
    pub async fn shutdown(&self) -> Option<usize> {
        self.chat.end_session().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;
    use crate::adapters::clock::FixedClock;
    use crate::domain::{ChatRole, GroundingCitation, NewsItem};
    use crate::ports::ReportPort;
    use chrono::{TimeZone, Utc};
    use tokio::sync::Notify;

    struct NullSink;

    #[async_trait::async_trait]
    impl ReportPort for NullSink {
        async fn save(&self, file_name: &str, _contents: &str) -> Result<PathBuf, DomainError> {
            Ok(PathBuf::from(file_name))
        }
    }

    fn desk(mock: Arc<MockAiAdapter>) -> NewsDesk {
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
        ));
        NewsDesk::new(
            AppState::new(Language::English, Category::General),
            NewsService::new(mock.clone(), Arc::clone(&clock)),
            ChatService::new(mock, Arc::clone(&clock)),
            ExportService::new(Arc::new(NullSink), Arc::clone(&clock)),
            clock,
        )
    }

    fn seeded_item() -> NewsItem {
        NewsItem {
            id: "old".to_string(),
            title: "Earlier story".to_string(),
            summary: String::new(),
            sources: vec![],
            url: String::new(),
            timestamp: String::new(),
            category: Category::General,
            is_verified: true,
            verification_details: String::new(),
            grounding: None,
        }
    }

    #[tokio::test]
    async fn test_each_selection_issues_one_call_with_token() {
        let mock = Arc::new(MockAiAdapter::new().with_delay(0));
        let desk = desk(mock.clone());

        for (n, category) in Category::ALL.into_iter().enumerate() {
            desk.select_category(category).await.unwrap();
            let requests = mock.requests();
            assert_eq!(requests.len(), n + 1);
            assert!(requests[n].prompt.contains(category.prompt_token()));
            assert_eq!(desk.snapshot().await.category, category);
        }
    }

    #[tokio::test]
    async fn test_malformed_response_leaves_list_unchanged() {
        let mock = Arc::new(
            MockAiAdapter::new()
                .with_delay(0)
                .with_news_response("The news is not available right now.", vec![]),
        );
        let desk = desk(mock);
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
        desk.dispatch(Action::NewsLoaded {
            seq: 0,
            items: vec![seeded_item()],
            at,
        })
        .await;

        let result = desk.select_category(Category::Crisis).await;
        assert!(matches!(result, Err(DomainError::Parse(_))));

        let state = desk.snapshot().await;
        assert_eq!(state.news, vec![seeded_item()]);
        assert_eq!(state.last_synced, Some(at));
        assert!(!state.news_loading);
    }

    #[tokio::test]
    async fn test_refresh_attaches_shared_citations() {
        let body = r#"[{"id":"1","title":"a"},{"id":"2","title":"b"},{"id":"3","title":"c"}]"#;
        let citations = vec![GroundingCitation {
            uri: "https://a.example".to_string(),
            title: Some("A".to_string()),
        }];
        let mock = Arc::new(
            MockAiAdapter::new()
                .with_delay(0)
                .with_news_response(body, citations.clone()),
        );
        let desk = desk(mock);

        assert_eq!(desk.refresh().await.unwrap(), 3);
        let state = desk.snapshot().await;
        assert_eq!(state.news.len(), 3);
        assert!(state.news.iter().all(|n| n.citations() == citations.as_slice()));
        assert!(state.last_synced.is_some());
    }

    #[tokio::test]
    async fn test_transcript_alternates_after_n_turns() {
        let mock = Arc::new(MockAiAdapter::new().with_delay(0));
        let desk = desk(mock.clone());
        let questions = ["What happened today?", "Any update?", "Thanks"];

        for q in questions {
            desk.submit_chat(q).await.unwrap();
        }

        let state = desk.snapshot().await;
        assert_eq!(state.transcript.len(), 2 * questions.len());
        for (i, msg) in state.transcript.iter().enumerate() {
            let expected = if i % 2 == 0 { ChatRole::User } else { ChatRole::Model };
            assert_eq!(msg.role, expected);
        }
        let users: Vec<&str> = state
            .transcript
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(users, questions);
        assert_eq!(mock.sessions_started(), 1);
    }

    #[tokio::test]
    async fn test_blank_chat_input_is_noop() {
        let mock = Arc::new(MockAiAdapter::new().with_delay(0));
        let desk = desk(mock.clone());
        assert!(desk.submit_chat("   ").await.is_err());
        assert!(desk.snapshot().await.transcript.is_empty());
        assert!(mock.chat_inputs().is_empty());
    }

    #[tokio::test]
    async fn test_chat_failure_keeps_user_message_only() {
        let mock = Arc::new(MockAiAdapter::new().with_delay(0).with_failing_chat());
        let desk = desk(mock);
        assert!(desk.submit_chat("Is the summit confirmed?").await.is_err());
        let state = desk.snapshot().await;
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].role, ChatRole::User);
        assert!(!state.awaiting_reply);
    }

    #[tokio::test]
    async fn test_concurrent_submission_is_rejected() {
        let gate = Arc::new(Notify::new());
        let mock = Arc::new(
            MockAiAdapter::new()
                .with_delay(0)
                .with_chat_gate(Arc::clone(&gate)),
        );
        let desk = desk(mock.clone());

        let (first, second) = tokio::join!(desk.submit_chat("first"), async {
            let second = desk.submit_chat("second").await;
            gate.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(DomainError::Busy)));
        let state = desk.snapshot().await;
        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[0].text, "first");
        assert_eq!(mock.chat_inputs(), vec!["first"]);
    }

    #[tokio::test]
    async fn test_language_change_applies_to_next_prompt() {
        let mock = Arc::new(MockAiAdapter::new().with_delay(0));
        let desk = desk(mock.clone());
        desk.change_language(Language::Spanish).await;
        desk.refresh().await.unwrap();
        assert!(mock.requests()[0].prompt.contains("in Spanish"));
        assert_eq!(desk.snapshot().await.bundle().language, Language::Spanish);
    }

    #[tokio::test]
    async fn test_export_uses_displayed_list() {
        let mock = Arc::new(MockAiAdapter::new().with_delay(0));
        let desk = desk(mock);
        let empty = desk.export_report().await.unwrap();
        assert!(empty.to_string_lossy().starts_with("MrDaniel_Report_"));
        desk.refresh().await.unwrap();
        let path = desk.export_report().await.unwrap();
        assert!(path.to_string_lossy().starts_with("MrDaniel_Report_"));
    }
}
