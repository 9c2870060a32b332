//! Application state and its reducer.
//!
//! All view state lives in `AppState` and changes only through `reduce`. The reducer
//! is synchronous and side-effect free; services perform I/O and dispatch results.

use crate::domain::{Category, ChatMessage, Language, LocaleBundle, NewsItem};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub language: Language,
    pub category: Category,
    /// Items of the latest successful retrieval. Replaced wholesale, never merged.
    pub news: Vec<NewsItem>,
    pub news_loading: bool,
    pub last_synced: Option<DateTime<Utc>>,
    /// Sequence number of the most recently issued retrieval.
    pub news_seq: u64,
    /// Append-only chat transcript.
    pub transcript: Vec<ChatMessage>,
    /// In-flight gate for chat turns.
    pub awaiting_reply: bool,
}

impl AppState {
    pub fn new(language: Language, category: Category) -> Self {
        Self {
            language,
            category,
            news: Vec::new(),
            news_loading: false,
            last_synced: None,
            news_seq: 0,
            transcript: Vec::new(),
            awaiting_reply: false,
        }
    }

    pub fn bundle(&self) -> &'static LocaleBundle {
        LocaleBundle::for_language(self.language)
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    NewsRequested { category: Category, seq: u64 },
    NewsLoaded {
        seq: u64,
        items: Vec<NewsItem>,
        at: DateTime<Utc>,
    },
    NewsFailed { seq: u64 },
    ChatSubmitted { text: String },
    ChatReplied { text: String },
    ChatFailed,
    LanguageChanged(Language),
}

/// Apply `action`. Returns false when the action was ignored (stale retrieval result).
pub fn reduce(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::NewsRequested { category, seq } => {
            state.category = category;
            state.news_seq = seq;
            state.news_loading = true;
        }
        Action::NewsLoaded { seq, items, at } => {
            if seq != state.news_seq {
                return false;
            }
            state.news = items;
            state.last_synced = Some(at);
            state.news_loading = false;
        }
        Action::NewsFailed { seq } => {
            if seq != state.news_seq {
                return false;
            }
            state.news_loading = false;
        }
        Action::ChatSubmitted { text } => {
            state.transcript.push(ChatMessage::user(text));
            state.awaiting_reply = true;
        }
        Action::ChatReplied { text } => {
            state.transcript.push(ChatMessage::model(text));
            state.awaiting_reply = false;
        }
        Action::ChatFailed => {
            state.awaiting_reply = false;
        }
        Action::LanguageChanged(language) => {
            state.language = language;
        }
    }
    true
}
